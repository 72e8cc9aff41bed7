// Dependency Tracking
//
// Tracks which source files each generated artifact depends on, so a host can decide
// what to regenerate after files change.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::dependencies::Dependencies;
use crate::processor::reflection::SourceFile;

pub const MANIFEST_VERSION: u32 = 1;

/// Artifact/file dependency graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyTracker {
    /// Forward dependencies: artifact -> origins.
    forward: BTreeMap<String, Dependencies>,
    /// Reverse dependencies: file -> artifacts derived from it.
    reverse: BTreeMap<SourceFile, BTreeSet<String>>,
}

impl DependencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the origins of `artifact`, replacing whatever was known before.
    pub fn record(&mut self, artifact: &str, dependencies: &Dependencies) {
        self.forget(artifact);
        for file in &dependencies.files {
            self.reverse
                .entry(file.clone())
                .or_default()
                .insert(artifact.to_string());
        }
        self.forward
            .insert(artifact.to_string(), dependencies.clone());
    }

    pub fn forget(&mut self, artifact: &str) {
        let Some(previous) = self.forward.remove(artifact) else {
            return;
        };
        for file in &previous.files {
            if let Some(artifacts) = self.reverse.get_mut(file) {
                artifacts.remove(artifact);
                if artifacts.is_empty() {
                    self.reverse.remove(file);
                }
            }
        }
    }

    pub fn dependencies_of(&self, artifact: &str) -> Option<&Dependencies> {
        self.forward.get(artifact)
    }

    /// Artifacts derived from `file`, sorted.
    pub fn affected_by(&self, file: &SourceFile) -> Vec<&str> {
        self.reverse
            .get(file)
            .map(|artifacts| artifacts.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &str> {
        self.forward.keys().map(String::as_str)
    }

    /// Whether `artifact` must be regenerated after `changed` files were modified.
    ///
    /// Unknown artifacts and artifacts without origin information are always stale.
    /// Aggregating artifacts are stale whenever anything changed.
    pub fn is_stale(&self, artifact: &str, changed: &BTreeSet<SourceFile>) -> bool {
        let Some(dependencies) = self.forward.get(artifact) else {
            return true;
        };
        if dependencies.is_unknown() {
            return true;
        }
        if dependencies.aggregating {
            return !changed.is_empty();
        }
        dependencies.files.iter().any(|file| changed.contains(file))
    }

    pub fn to_manifest(&self) -> DependencyManifest {
        DependencyManifest {
            version: MANIFEST_VERSION,
            artifacts: self.forward.clone(),
        }
    }

    pub fn from_manifest(manifest: &DependencyManifest) -> Self {
        let mut tracker = DependencyTracker::new();
        for (artifact, dependencies) in &manifest.artifacts {
            tracker.record(artifact, dependencies);
        }
        tracker
    }
}

/// Serializable form of a tracker, kept by the host between passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyManifest {
    pub version: u32,
    /// Artifact path -> origins.
    pub artifacts: BTreeMap<String, Dependencies>,
}

impl Default for DependencyManifest {
    fn default() -> Self {
        DependencyManifest {
            version: MANIFEST_VERSION,
            artifacts: BTreeMap::new(),
        }
    }
}
