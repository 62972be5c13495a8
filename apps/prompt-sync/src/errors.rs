use std::path::PathBuf;

use thiserror::Error;

/// Pipeline-level error type.
/// Every variant is fatal: the driver logs it and exits non-zero.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Listing request failed with status {status}: {body}")]
    Listing { status: u16, body: String },

    #[error("Request for {url} failed with status {status}: {body}")]
    Fetch {
        url: String,
        status: u16,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(what: impl Into<String>, source: serde_json::Error) -> Self {
        SyncError::Parse {
            what: what.into(),
            source,
        }
    }
}
