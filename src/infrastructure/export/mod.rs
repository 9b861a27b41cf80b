use crate::domain::audio::{encode_wav, DecodedAudioBuffer, EncodeError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not encode audio: {0}")]
    Encode(#[from] EncodeError),
    #[error("could not write export: {0}")]
    Io(#[from] std::io::Error),
}

/// A WAV rendering of the current audio, backed by a temporary file.
///
/// The file is removed when the handle is released or dropped, unless it was persisted.
#[derive(Debug)]
pub struct WavExport {
    file: NamedTempFile,
    size_bytes: usize,
}

impl WavExport {
    /// Encode `buffer` into a new temporary `.wav` file inside `dir`
    pub fn create(buffer: &DecodedAudioBuffer, dir: &Path) -> Result<Self, ExportError> {
        let bytes = encode_wav(buffer)?;

        let mut file = tempfile::Builder::new()
            .prefix("booktape-")
            .suffix(".wav")
            .tempfile_in(dir)?;
        file.write_all(&bytes)?;
        file.flush()?;

        tracing::debug!(
            path = %file.path().display(),
            size_bytes = bytes.len(),
            "WAV export created"
        );

        Ok(Self {
            file,
            size_bytes: bytes.len(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Delete the export file now
    pub fn release(self) -> Result<(), ExportError> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        tracing::debug!(path = %path.display(), "WAV export released");
        Ok(())
    }

    /// Keep the export at `target`, consuming the handle
    pub fn persist(self, target: &Path) -> Result<PathBuf, ExportError> {
        self.file
            .persist(target)
            .map_err(|e| ExportError::Io(e.error))?;
        tracing::info!(path = %target.display(), size_bytes = self.size_bytes, "WAV export saved");
        Ok(target.to_path_buf())
    }
}
