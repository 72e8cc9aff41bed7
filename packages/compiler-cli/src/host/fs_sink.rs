// File System Sink
//
// Writes generated sources under an output directory and keeps the dependency manifest
// next to them.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::processor::incremental::{DependencyManifest, DependencyTracker};
use crate::processor::transform::{EmitError, EmitterSink, GeneratedArtifact};

pub const DEFAULT_MANIFEST_FILE: &str = ".statestore-deps.json";

/// Writes `<out_dir>/<package path>/<Name>.kt`.
#[derive(Debug)]
pub struct FileSystemSink {
    out_dir: PathBuf,
    written: BTreeSet<String>,
}

impl FileSystemSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        FileSystemSink {
            out_dir: out_dir.into(),
            written: BTreeSet::new(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Relative paths written so far, sorted.
    pub fn written(&self) -> impl Iterator<Item = &str> {
        self.written.iter().map(String::as_str)
    }
}

impl EmitterSink for FileSystemSink {
    fn write(&mut self, artifact: &GeneratedArtifact) -> Result<(), EmitError> {
        let relative = artifact.path();
        if self.written.contains(&relative) {
            return Err(EmitError::DuplicateArtifact { path: relative });
        }
        let path = self.out_dir.join(&relative);
        let io_error = |source| EmitError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&path, &artifact.body).map_err(io_error)?;
        debug!(path = %path.display(), "wrote artifact");
        self.written.insert(relative);
        Ok(())
    }
}

/// Read a manifest written by a previous pass. A missing file yields an empty tracker.
pub fn load_manifest(path: &Path) -> anyhow::Result<DependencyTracker> {
    if !path.exists() {
        return Ok(DependencyTracker::new());
    }
    let content = fs::read_to_string(path)?;
    let manifest: DependencyManifest = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid dependency manifest {}: {}", path.display(), e))?;
    Ok(DependencyTracker::from_manifest(&manifest))
}

pub fn save_manifest(path: &Path, tracker: &DependencyTracker) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&tracker.to_manifest())?;
    fs::write(path, json + "\n")?;
    Ok(())
}
