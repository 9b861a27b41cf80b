pub mod error;
pub mod service;

pub use error::TranslationError;
pub use service::{translation_instruction, TranslationService, TranslationServiceApi};
