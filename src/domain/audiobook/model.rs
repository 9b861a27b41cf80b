use crate::domain::audio::DecodedAudioBuffer;
use crate::domain::document::Document;
use crate::domain::tts::DEFAULT_MAX_CHUNK_LENGTH;

/// Choices the user makes on the review step
#[derive(Debug, Clone)]
pub struct AudiobookOptions {
    /// Narrate in this language, translating if the document is in another one
    pub target_language: Option<String>,
    /// Voice override; otherwise chosen from the narration language
    pub voice: Option<String>,
    pub max_chunk_length: usize,
}

impl Default for AudiobookOptions {
    fn default() -> Self {
        Self {
            target_language: None,
            voice: None,
            max_chunk_length: DEFAULT_MAX_CHUNK_LENGTH,
        }
    }
}

/// A finished narration and the audio decoded from it
#[derive(Debug, Clone)]
pub struct Audiobook {
    pub document: Document,
    pub narration_text: String,
    pub narration_language: String,
    pub voice: String,
    pub buffer: DecodedAudioBuffer,
    pub missing_chunks: Vec<usize>,
}

impl Audiobook {
    pub fn duration_secs(&self) -> f64 {
        self.buffer.duration_secs()
    }
}
