use pagecraft_common::CommonError;
use pagecraft_document::DocumentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<CommonError> for BridgeError {
    fn from(e: CommonError) -> Self {
        match e {
            CommonError::Io(e) => BridgeError::Io(e),
            e @ CommonError::WriteRefused(_) => BridgeError::Store(e.to_string()),
        }
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
