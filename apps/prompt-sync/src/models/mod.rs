pub mod listing;
pub mod prompt;

pub use listing::{FileDescriptor, RawListingEntry};
pub use prompt::{PromptRecord, PromptSource};
