use std::path::PathBuf;
use thiserror::Error;

/// Errors from the shared storage helpers
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Write to {} refused", .0.display())]
    WriteRefused(PathBuf),
}

pub type CommonResult<T> = Result<T, CommonError>;
