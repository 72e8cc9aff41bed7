use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use statestore_compiler::util::simple_name_of;
use statestore_compiler::ClassName;

pub const DEFAULT_CLASS_PREFIX: &str = "Abs";
pub const DEFAULT_HOLDER: &str = "androidx.lifecycle.LiveData";
pub const DEFAULT_MUTABLE_HOLDER: &str = "androidx.lifecycle.MutableLiveData";
pub const DEFAULT_MARKER: &str = "app.junhyounglee.statestore.annotation.StateStore";
pub const DEFAULT_SPEC_ARGUMENT: &str = "stateSpec";
pub const DEFAULT_CONFIG_FILE: &str = "statestore.json";

/// Processor settings, read from `statestore.json`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct ProcessorOptions {
    /// Prepended to the target's simple name to form the generated class name.
    pub class_prefix: String,
    /// Qualified name of the read-only holder recognized on spec properties.
    pub holder: String,
    /// Qualified name of the mutable holder used for backing fields.
    pub mutable_holder: String,
    /// Qualified name of the marker annotation.
    pub marker: String,
    pub spec_argument: String,
    /// Names placed in the `@Suppress` annotation of generated classes.
    pub suppress_warnings: Vec<String>,
    /// Whether outputs depend on every input (`true`) or only on their own origins.
    pub aggregating: bool,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        ProcessorOptions {
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            holder: DEFAULT_HOLDER.to_string(),
            mutable_holder: DEFAULT_MUTABLE_HOLDER.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            spec_argument: DEFAULT_SPEC_ARGUMENT.to_string(),
            suppress_warnings: vec![
                "MemberVisibilityCanBePrivate".to_string(),
                "PropertyName".to_string(),
            ],
            aggregating: true,
        }
    }
}

impl ProcessorOptions {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let options: ProcessorOptions = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid options file {}: {}", path.display(), e))?;
        options.validate()?;
        Ok(options)
    }

    /// Load `path` if given, else `statestore.json` in `dir` if present, else defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.holder_class()?;
        self.mutable_holder_class()?;
        if self.marker.is_empty() {
            anyhow::bail!("`marker` must not be empty");
        }
        if self.spec_argument.is_empty() {
            anyhow::bail!("`spec_argument` must not be empty");
        }
        Ok(())
    }

    pub fn holder_class(&self) -> anyhow::Result<ClassName> {
        ClassName::best_guess(&self.holder)
            .map_err(|e| anyhow::anyhow!("invalid `holder`: {}", e))
    }

    pub fn mutable_holder_class(&self) -> anyhow::Result<ClassName> {
        ClassName::best_guess(&self.mutable_holder)
            .map_err(|e| anyhow::anyhow!("invalid `mutable_holder`: {}", e))
    }

    /// Simple name a property type must resolve to, e.g. `LiveData`.
    pub fn holder_simple_name(&self) -> &str {
        simple_name_of(&self.holder)
    }
}
