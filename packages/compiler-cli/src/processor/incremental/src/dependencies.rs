// Dependencies
//
// Source files a generated artifact was derived from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::processor::reflection::SourceFile;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    /// An aggregating output may be affected by any input, not just its own origins.
    pub aggregating: bool,
    pub files: BTreeSet<SourceFile>,
}

impl Dependencies {
    pub fn new(aggregating: bool) -> Self {
        Dependencies {
            aggregating,
            files: BTreeSet::new(),
        }
    }

    /// Record `file` as an origin. Declarations without a known file contribute nothing.
    pub fn add(&mut self, file: Option<&SourceFile>) {
        if let Some(file) = file {
            self.files.insert(file.clone());
        }
    }

    pub fn with(mut self, file: Option<&SourceFile>) -> Self {
        self.add(file);
        self
    }

    /// No origin information: the artifact must be regenerated on every pass.
    pub fn is_unknown(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, file: &SourceFile) -> bool {
        self.files.contains(file)
    }
}
