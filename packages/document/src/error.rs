use thiserror::Error;

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Invalid template JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Payload has no sections array")]
    MissingSections,

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
}
