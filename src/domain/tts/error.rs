use crate::domain::audio::DecodeError;

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("speech request for chunk {chunk_index} failed: {message}")]
    Dependency { chunk_index: usize, message: String },
    #[error("chunk {chunk_index} returned an unreadable payload: {source}")]
    InvalidPayload {
        chunk_index: usize,
        #[source]
        source: DecodeError,
    },
    #[error("no audio generated")]
    NoAudio,
    #[error("synthesis cancelled")]
    Cancelled,
}
