use crate::domain::audio::DecodeError;
use crate::domain::document::ExtractionError;
use crate::domain::translation::TranslationError;
use crate::domain::tts::SynthesisError;
use crate::infrastructure::export::ExportError;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Extraction(ExtractionError::UnsupportedFormat(name)) => {
                format!("Unsupported file type: {}. Use a PDF, DOCX or TXT file.", name)
            }
            Self::Extraction(ExtractionError::EmptyDocument) => {
                "The document does not contain any readable text.".to_string()
            }
            Self::Extraction(_) => "Failed to extract text from the document.".to_string(),
            Self::Translation(_) => "Failed to translate the document.".to_string(),
            Self::Synthesis(SynthesisError::Cancelled) => "Audio generation was cancelled.".to_string(),
            Self::Synthesis(_) => "Failed to generate audio.".to_string(),
            Self::Decode(_) => "The generated audio could not be decoded.".to_string(),
            Self::Export(_) => "Failed to save the audio file.".to_string(),
            Self::BadRequest(msg) => msg.clone(),
            Self::Config(msg) => format!("Configuration problem: {}", msg),
            Self::Internal(_) => "Something went wrong.".to_string(),
        }
    }

    /// Process exit code for the command line
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BadRequest(_) | Self::Config(_) => 2,
            Self::Extraction(_) => 3,
            Self::Translation(_) => 4,
            Self::Synthesis(SynthesisError::Cancelled) => 130,
            Self::Synthesis(_) | Self::Decode(_) => 5,
            Self::Export(_) => 6,
            Self::Internal(_) => 1,
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
