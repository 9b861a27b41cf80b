pub mod chunker;
pub mod error;
pub mod language;
pub mod service;

pub use chunker::split_text_safe;
pub use error::SynthesisError;
pub use language::{voice_for_language, LanguageCode, SUPPORTED_LANGUAGES};
pub use service::{TtsService, TtsServiceApi, TtsSynthesisResult};

/// Default chunk budget in characters
pub const DEFAULT_MAX_CHUNK_LENGTH: usize = 3000;
