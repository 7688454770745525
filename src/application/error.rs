use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Unsupported file type! Streamwo only accepts MP4!")]
    UnsupportedFileType,

    #[error("File too big! Streamwo supports 512MB maximum!")]
    FileTooBig,

    #[error("{0}")]
    Transport(String),

    #[error("Could not find link_id on Streamwo home page")]
    LinkIdNotFound,

    #[error("Cannot read video file: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UploadError {
    /// Validation failures are raised before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, UploadError::UnsupportedFileType | UploadError::FileTooBig)
    }
}
