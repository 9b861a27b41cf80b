pub mod document_repository;
pub mod gemini_repository;
pub mod speech_repository;
pub mod translation_repository;

pub use document_repository::DocumentRepository;
pub use gemini_repository::GeminiRepository;
pub use speech_repository::{SpeechRepository, SpeechRequest};
pub use translation_repository::TranslationRepository;
