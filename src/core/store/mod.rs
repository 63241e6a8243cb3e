//! Scratch-artifact lifecycle
//!
//! Every transient audio file (upload, transcoded waveform, synthesized
//! reply) is owned by exactly one `TempArtifact` guard: the file is created
//! with a unique name and removed when the guard drops, so cleanup runs on
//! every exit path without an explicit cleanup step. Synthesized replies are
//! parked in an `AudioStore` keyed by opaque tokens until downloaded;
//! clients never see a filesystem path.

use dashmap::DashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// A uniquely named scratch file, deleted on drop.
///
/// Deletion failure is best-effort by contract: it is logged and swallowed,
/// never surfaced.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    /// Write `data` to a fresh uniquely named file in `dir`.
    pub fn create(dir: &Path, suffix: &str, data: &[u8]) -> std::io::Result<Self> {
        let (mut file, path) = tempfile::Builder::new()
            .prefix("voxrelay-")
            .suffix(suffix)
            .tempfile_in(dir)?
            .keep()
            .map_err(|e| e.error)?;
        file.write_all(data)?;
        file.flush()?;
        Ok(Self { path })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full contents of the backing file
    pub fn read(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to remove scratch artifact");
        }
    }
}

/// Token-addressed store for synthesized-reply artifacts.
///
/// Tokens are random UUIDs minted per artifact; concurrent requests cannot
/// collide and a token resolves server-side only, closing the path-traversal
/// exposure of accepting raw paths in the download URL.
#[derive(Debug, Default)]
pub struct AudioStore {
    artifacts: DashMap<Uuid, TempArtifact>,
}

impl AudioStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Park an artifact and mint its download token
    pub fn insert(&self, artifact: TempArtifact) -> Uuid {
        let token = Uuid::new_v4();
        self.artifacts.insert(token, artifact);
        token
    }

    /// Remove and return the artifact for `token`, if present.
    ///
    /// Tokens are single-use: the returned guard deletes the file when the
    /// caller is done with it.
    pub fn take(&self, token: &Uuid) -> Option<TempArtifact> {
        self.artifacts.remove(token).map(|(_, artifact)| artifact)
    }

    /// Number of artifacts currently parked
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// True when no artifacts are parked
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
