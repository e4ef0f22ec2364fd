//! Error types for the editor

use pagecraft_common::CommonError;
use pagecraft_document::DocumentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Storage error: {0}")]
    Storage(#[from] CommonError),

    #[error("No template in {0}")]
    NoTemplate(String),
}
