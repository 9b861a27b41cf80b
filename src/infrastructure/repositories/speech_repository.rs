use async_trait::async_trait;

/// One synthesis call: a single chunk of text read by a single voice.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: String,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Repository for speech synthesis calls.
/// Abstracts the underlying speech provider.
///
/// Implementations issue exactly one remote request per call and never split, merge or retry.
/// Chunking and ordering are the caller's concern.
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Synthesize one chunk of text
    ///
    /// Returns the base64-encoded raw PCM payload (16-bit LE, `sample_rate`, `channels`),
    /// or `None` when the provider answered without audio.
    ///
    /// # Errors
    /// Returns error if the request fails at the transport level or times out
    async fn synthesize_chunk(&self, request: &SpeechRequest) -> Result<Option<String>, String>;

    /// Short provider name used in logs
    fn provider(&self) -> &'static str;
}
