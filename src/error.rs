use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid corpus: {0}")]
    InvalidCorpus(String),
    #[error("empty input: nothing to tag")]
    EmptyInput,
    #[error("undecodable state space: no tag was ever followed by another tag in training")]
    UndecodableState,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
