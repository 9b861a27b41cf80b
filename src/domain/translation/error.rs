#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("translation failed: {0}")]
    Dependency(String),
    #[error("translation returned no text")]
    EmptyTranslation,
    #[error("invalid input: {0}")]
    Invalid(String),
}
