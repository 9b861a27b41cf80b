#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("document contains no readable text")]
    EmptyDocument,
    #[error("document is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),
    #[error("extraction failed: {0}")]
    Dependency(String),
    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}
