// Prompt record handling: extraction from raw files, title dedup, persistence.

pub mod dedup;
pub mod extract;
pub mod store;
