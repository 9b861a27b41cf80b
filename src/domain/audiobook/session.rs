use super::model::Audiobook;
use crate::domain::document::Document;
use crate::infrastructure::export::{ExportError, WavExport};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

/// Where the pipeline currently is for this session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Extracting,
    Review,
    Translating,
    Generating,
    Ready,
    Failed(String),
}

/// Step shown to the user. Translation is presented as part of generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStep {
    Upload,
    Extracting,
    Review,
    Generating,
    Ready,
    Error,
}

impl SessionState {
    pub fn display_step(&self) -> DisplayStep {
        match self {
            SessionState::Idle => DisplayStep::Upload,
            SessionState::Extracting => DisplayStep::Extracting,
            SessionState::Review => DisplayStep::Review,
            SessionState::Translating | SessionState::Generating => DisplayStep::Generating,
            SessionState::Ready => DisplayStep::Ready,
            SessionState::Failed(_) => DisplayStep::Error,
        }
    }
}

/// One user's working state: the current document, its audio and the audio's export file.
///
/// Starting a new document or resetting drops the previous audio and deletes its export.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    state: SessionState,
    document: Option<Document>,
    audiobook: Option<Audiobook>,
    export: Option<WavExport>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            state: SessionState::Idle,
            document: None,
            audiobook: None,
            export: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn audiobook(&self) -> Option<&Audiobook> {
        self.audiobook.as_ref()
    }

    pub fn export(&self) -> Option<&WavExport> {
        self.export.as_ref()
    }

    /// Start over with a new document, discarding the previous one and its audio
    pub fn begin_document(&mut self) {
        self.clear();
        self.transition(SessionState::Extracting);
    }

    pub fn set_document(&mut self, document: Document) {
        self.document = Some(document);
        self.transition(SessionState::Review);
    }

    pub fn begin_translation(&mut self) {
        self.transition(SessionState::Translating);
    }

    pub fn begin_generation(&mut self) {
        self.release_audio();
        self.transition(SessionState::Generating);
    }

    pub fn finish(&mut self, audiobook: Audiobook) {
        self.audiobook = Some(audiobook);
        self.transition(SessionState::Ready);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.transition(SessionState::Failed(message.into()));
    }

    /// Return to the upload step, releasing everything
    pub fn reset(&mut self) {
        self.clear();
        self.transition(SessionState::Idle);
    }

    /// Render the current audio as a WAV file in `dir`, replacing any previous export
    pub fn export_wav(&mut self, dir: &Path) -> Result<Option<&WavExport>, ExportError> {
        let Some(audiobook) = &self.audiobook else {
            return Ok(None);
        };

        let export = WavExport::create(&audiobook.buffer, dir)?;
        self.release_export();
        self.export = Some(export);
        Ok(self.export.as_ref())
    }

    /// Hand the export file over to the caller, who becomes responsible for it
    pub fn take_export(&mut self) -> Option<WavExport> {
        self.export.take()
    }

    fn clear(&mut self) {
        self.release_audio();
        self.document = None;
    }

    fn release_audio(&mut self) {
        self.release_export();
        self.audiobook = None;
    }

    fn release_export(&mut self) {
        if let Some(export) = self.export.take() {
            if let Err(e) = export.release() {
                tracing::warn!(session_id = %self.id, error = %e, "Failed to release WAV export");
            }
        }
    }

    fn transition(&mut self, state: SessionState) {
        tracing::debug!(
            session_id = %self.id,
            from = ?self.state,
            to = ?state,
            "Session state changed"
        );
        self.state = state;
    }
}
