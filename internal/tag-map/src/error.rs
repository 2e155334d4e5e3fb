use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("index out of bounds: {index} (length {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("cannot replace tag map: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    #[error("unknown tag map version: {0:?}")]
    UnknownVersion(String),
}
