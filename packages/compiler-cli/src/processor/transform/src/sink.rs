use std::collections::BTreeMap;
use thiserror::Error;

use super::api::GeneratedArtifact;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("artifact `{path}` was already written in this pass")]
    DuplicateArtifact { path: String },

    #[error("cannot write `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for generated files.
pub trait EmitterSink {
    fn write(&mut self, artifact: &GeneratedArtifact) -> Result<(), EmitError>;
}

/// Keeps written artifacts in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    artifacts: BTreeMap<String, GeneratedArtifact>,
    order: Vec<String>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&GeneratedArtifact> {
        self.artifacts.get(path)
    }

    /// Body of the artifact at `path`.
    pub fn read(&self, path: &str) -> Option<&str> {
        self.artifacts.get(path).map(|a| a.body.as_str())
    }

    /// Paths in write order.
    pub fn paths(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.order.iter().filter_map(|path| self.artifacts.get(path))
    }
}

impl EmitterSink for InMemorySink {
    fn write(&mut self, artifact: &GeneratedArtifact) -> Result<(), EmitError> {
        let path = artifact.path();
        if self.artifacts.contains_key(&path) {
            return Err(EmitError::DuplicateArtifact { path });
        }
        self.order.push(path.clone());
        self.artifacts.insert(path, artifact.clone());
        Ok(())
    }
}
