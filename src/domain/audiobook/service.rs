use super::model::{Audiobook, AudiobookOptions};
use super::session::Session;
use crate::domain::audio::{decode_pcm, TTS_SAMPLE_RATE};
use crate::domain::document::{Document, DocumentFile, DocumentServiceApi};
use crate::domain::translation::TranslationServiceApi;
use crate::domain::tts::{voice_for_language, TtsServiceApi};
use crate::error::{AppError, AppResult};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Runs a document through extraction, translation, synthesis and decoding,
/// keeping the session's state in step.
pub struct AudiobookService {
    document_service: Arc<dyn DocumentServiceApi>,
    translation_service: Arc<dyn TranslationServiceApi>,
    tts_service: Arc<dyn TtsServiceApi>,
}

impl AudiobookService {
    pub fn new(
        document_service: Arc<dyn DocumentServiceApi>,
        translation_service: Arc<dyn TranslationServiceApi>,
        tts_service: Arc<dyn TtsServiceApi>,
    ) -> Self {
        Self {
            document_service,
            translation_service,
            tts_service,
        }
    }

    /// Extract a new document into the session, leaving it on the review step
    pub async fn extract(&self, session: &mut Session, file: &DocumentFile) -> AppResult<Document> {
        session.begin_document();

        match self.document_service.extract(file).await {
            Ok(document) => {
                session.set_document(document.clone());
                Ok(document)
            }
            Err(e) => Err(fail(session, e.into())),
        }
    }

    /// Narrate the session's document and store the decoded audio in the session
    pub async fn generate(
        &self,
        session: &mut Session,
        options: &AudiobookOptions,
        cancel: &CancellationToken,
    ) -> AppResult<()> {
        if options.max_chunk_length == 0 {
            return Err(AppError::BadRequest(
                "Chunk length must be at least one character".to_string(),
            ));
        }

        let Some(document) = session.document().cloned() else {
            return Err(AppError::BadRequest(
                "No document has been extracted yet".to_string(),
            ));
        };

        let narration_language = options
            .target_language
            .clone()
            .unwrap_or_else(|| document.detected_language.clone());

        let narration_text = match &options.target_language {
            Some(target) => {
                session.begin_translation();
                match self
                    .translation_service
                    .translate(&document.text, &document.detected_language, target)
                    .await
                {
                    Ok(text) => text,
                    Err(e) => return Err(fail(session, e.into())),
                }
            }
            None => document.text.clone(),
        };

        let voice = options
            .voice
            .clone()
            .unwrap_or_else(|| voice_for_language(&narration_language).to_string());

        session.begin_generation();
        tracing::info!(
            session_id = %session.id(),
            narration_language = %narration_language,
            voice = %voice,
            text_length = narration_text.len(),
            "Generating audiobook"
        );

        let synthesis = match self
            .tts_service
            .synthesize_with_cancellation(&narration_text, &voice, options.max_chunk_length, cancel)
            .await
        {
            Ok(result) => result,
            Err(e) => return Err(fail(session, e.into())),
        };

        if !synthesis.missing_chunks.is_empty() {
            tracing::warn!(
                missing_chunks = ?synthesis.missing_chunks,
                "Audiobook has gaps where chunks produced no audio"
            );
        }

        let buffer = match decode_pcm(&synthesis.audio_data, TTS_SAMPLE_RATE) {
            Ok(buffer) => buffer,
            Err(e) => return Err(fail(session, e.into())),
        };

        tracing::info!(
            session_id = %session.id(),
            duration_secs = buffer.duration_secs(),
            samples = buffer.len(),
            "Audiobook ready"
        );

        session.finish(Audiobook {
            document,
            narration_text,
            narration_language,
            voice,
            buffer,
            missing_chunks: synthesis.missing_chunks,
        });

        Ok(())
    }

    /// Extract and narrate in one go
    pub async fn process(
        &self,
        session: &mut Session,
        file: &DocumentFile,
        options: &AudiobookOptions,
        cancel: &CancellationToken,
    ) -> AppResult<()> {
        self.extract(session, file).await?;
        self.generate(session, options, cancel).await
    }
}

fn fail(session: &mut Session, error: AppError) -> AppError {
    tracing::error!(session_id = %session.id(), error = %error, "Audiobook pipeline failed");
    session.fail(error.user_message());
    error
}
