use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize store record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("in-memory storage lock was poisoned")]
    Poisoned,
}
