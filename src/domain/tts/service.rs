use super::chunker::split_text_safe;
use super::error::SynthesisError;
use crate::domain::audio::{base64_to_bytes, concatenate_bytes, TTS_CHANNELS, TTS_SAMPLE_RATE};
use crate::infrastructure::repositories::{SpeechRepository, SpeechRequest};
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct TtsSynthesisResult {
    /// Raw PCM of every chunk that produced audio, in chunk order
    pub audio_data: Vec<u8>,
    pub chunk_count: usize,
    pub synthesized_chunks: usize,
    /// Indices of chunks the provider answered without audio
    pub missing_chunks: Vec<usize>,
    pub char_count: usize,
}

pub struct TtsService {
    speech_repo: Arc<dyn SpeechRepository>,
    cache: Option<Cache<String, TtsSynthesisResult>>,
}

impl TtsService {
    pub fn new(speech_repo: Arc<dyn SpeechRepository>, cache_enabled: bool) -> Self {
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(100)
                    .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
                    .build(),
            )
        } else {
            None
        };

        Self { speech_repo, cache }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize text to raw PCM
    ///
    /// This operation:
    /// - Splits the text into chunks of at most `max_chunk_length` characters
    /// - Requests each non-blank chunk in order, one request at a time
    /// - Skips chunks that come back without audio
    /// - Concatenates the chunk audio in chunk order
    ///
    /// Fails if any request fails, or if no chunk produced audio.
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        max_chunk_length: usize,
    ) -> Result<TtsSynthesisResult, SynthesisError>;

    /// Same as [`TtsServiceApi::synthesize`], checking `cancel` before every request
    async fn synthesize_with_cancellation(
        &self,
        text: &str,
        voice: &str,
        max_chunk_length: usize,
        cancel: &CancellationToken,
    ) -> Result<TtsSynthesisResult, SynthesisError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        max_chunk_length: usize,
    ) -> Result<TtsSynthesisResult, SynthesisError> {
        self.synthesize_with_cancellation(text, voice, max_chunk_length, &CancellationToken::new())
            .await
    }

    async fn synthesize_with_cancellation(
        &self,
        text: &str,
        voice: &str,
        max_chunk_length: usize,
        cancel: &CancellationToken,
    ) -> Result<TtsSynthesisResult, SynthesisError> {
        let cache_key = format!("{}\u{0}{}\u{0}{}", voice, max_chunk_length, text);

        if let Some(cache) = &self.cache {
            if let Some(cached_result) = cache.get(&cache_key).await {
                tracing::info!(
                    voice = voice,
                    cached_audio_size = cached_result.audio_data.len(),
                    cached_char_count = cached_result.char_count,
                    "TTS cache hit - returning cached audio"
                );
                return Ok(cached_result);
            }
        }

        let start_time = std::time::Instant::now();

        let chunks = split_text_safe(text, max_chunk_length);
        tracing::info!(
            chunk_count = chunks.len(),
            text_length = text.len(),
            max_chunk_length = max_chunk_length,
            "Text split into chunks"
        );

        let (collected, missing_chunks) = self.synthesize_chunks(&chunks, voice, cancel).await?;

        if collected.is_empty() {
            tracing::error!(
                chunk_count = chunks.len(),
                missing_chunks = missing_chunks.len(),
                "No chunk produced audio"
            );
            return Err(SynthesisError::NoAudio);
        }

        let result = TtsSynthesisResult {
            audio_data: concatenate_bytes(&collected),
            chunk_count: chunks.len(),
            synthesized_chunks: collected.len(),
            missing_chunks,
            char_count: text.chars().count(),
        };

        let duration = start_time.elapsed();
        let throughput_chars_per_sec = if duration.as_secs_f64() > 0.0 {
            result.char_count as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        tracing::info!(
            provider = self.speech_repo.provider(),
            voice = voice,
            latency_ms = duration.as_millis(),
            latency_secs = duration.as_secs_f64(),
            characters_count = result.char_count,
            chunk_count = result.chunk_count,
            synthesized_chunks = result.synthesized_chunks,
            missing_chunks = result.missing_chunks.len(),
            audio_size_bytes = result.audio_data.len(),
            throughput_chars_per_sec = format!("{:.2}", throughput_chars_per_sec),
            "TTS synthesis completed"
        );

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, result.clone()).await;
            tracing::debug!(audio_size = result.audio_data.len(), "TTS result cached");
        }

        Ok(result)
    }
}

impl TtsService {
    /// Request each chunk in order and collect the audio that came back.
    ///
    /// Returns the per-chunk buffers and the indices of chunks that produced no audio.
    async fn synthesize_chunks(
        &self,
        chunks: &[&str],
        voice: &str,
        cancel: &CancellationToken,
    ) -> Result<(Vec<Vec<u8>>, Vec<usize>), SynthesisError> {
        let mut collected = Vec::with_capacity(chunks.len());
        let mut missing = Vec::new();
        let mut total_audio_size = 0usize;

        for (index, chunk) in chunks.iter().enumerate() {
            if chunk.trim().is_empty() {
                tracing::debug!(chunk_index = index, "Skipping blank chunk");
                continue;
            }

            if cancel.is_cancelled() {
                tracing::warn!(
                    chunk_index = index,
                    collected_chunks = collected.len(),
                    "Synthesis cancelled"
                );
                return Err(SynthesisError::Cancelled);
            }

            tracing::info!(
                chunk_index = index,
                chunk_size = chunk.chars().count(),
                "Synthesizing chunk"
            );

            let request = SpeechRequest {
                text: chunk.to_string(),
                voice: voice.to_string(),
                sample_rate: TTS_SAMPLE_RATE,
                channels: TTS_CHANNELS,
            };

            let payload = self
                .speech_repo
                .synthesize_chunk(&request)
                .await
                .map_err(|message| {
                    tracing::error!(
                        chunk_index = index,
                        error = %message,
                        "Speech request failed, aborting synthesis"
                    );
                    SynthesisError::Dependency {
                        chunk_index: index,
                        message,
                    }
                })?;

            let audio = match payload {
                Some(encoded) => base64_to_bytes(&encoded).map_err(|source| {
                    SynthesisError::InvalidPayload {
                        chunk_index: index,
                        source,
                    }
                })?,
                None => Vec::new(),
            };

            if audio.is_empty() {
                tracing::warn!(chunk_index = index, "Chunk returned no audio, skipping");
                missing.push(index);
                continue;
            }

            total_audio_size += audio.len();
            collected.push(audio);

            tracing::info!(
                chunk_index = index,
                total_audio_size = total_audio_size,
                "Chunk synthesized and collected"
            );
        }

        Ok((collected, missing))
    }
}
