//! Perform Compile
//!
//! Loads the program models, runs one processing pass and writes the results.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{debug, info};

use crate::config::ProcessorOptions;
use crate::host::{load_manifest, save_manifest, FileSystemSink, JsonProgramHost, DEFAULT_MANIFEST_FILE};
use crate::processor::annotations::StateStoreHandler;
use crate::processor::diagnostics::{CollectingDiagnostics, Diagnostic};
use crate::processor::reflection::SourceFile;
use crate::processor::transform::{EmitFilter, PassSummary, ProcessingPass};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_DIAGNOSTICS: i32 = 1;
pub const EXIT_HOST_FAILURE: i32 = 2;

/// Inputs of one `ssc` run.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Program model files or glob patterns.
    pub inputs: Vec<String>,
    pub out_dir: PathBuf,
    /// Explicit options file. Without one, `statestore.json` in `base_dir` is used if present.
    pub config: Option<PathBuf>,
    /// Defaults to `<out_dir>/.statestore-deps.json`.
    pub manifest: Option<PathBuf>,
    /// Source files changed since the previous run. Empty means regenerate everything.
    pub changed: Vec<String>,
    pub base_dir: PathBuf,
}

impl CompileOptions {
    pub fn new(inputs: Vec<String>, out_dir: impl Into<PathBuf>) -> Self {
        CompileOptions {
            inputs,
            out_dir: out_dir.into(),
            config: None,
            manifest: None,
            changed: Vec::new(),
            base_dir: PathBuf::from("."),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| self.out_dir.join(DEFAULT_MANIFEST_FILE))
    }
}

#[derive(Debug)]
pub struct CompileOutcome {
    pub diagnostics: Vec<Diagnostic>,
    pub summary: PassSummary,
    /// Relative paths of the files written, sorted.
    pub written: Vec<String>,
}

impl CompileOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            EXIT_DIAGNOSTICS
        } else {
            EXIT_SUCCESS
        }
    }
}

/// Expand glob patterns; plain paths must exist. The result is sorted and deduplicated.
pub fn expand_inputs(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for pattern in patterns {
        if Path::new(pattern).is_file() {
            files.insert(PathBuf::from(pattern));
            continue;
        }
        let matches: Vec<PathBuf> = glob(pattern)
            .map_err(|e| anyhow::anyhow!("Failed to read glob pattern: {}", e))?
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            anyhow::bail!("No program model matches `{}`", pattern);
        }
        files.extend(matches);
    }
    Ok(files.into_iter().collect())
}

pub fn perform_compile(options: &CompileOptions) -> anyhow::Result<CompileOutcome> {
    let processor_options = ProcessorOptions::discover(options.config.as_deref(), &options.base_dir)?;
    debug!(?processor_options, "processor options");

    let inputs = expand_inputs(&options.inputs)?;
    let host = JsonProgramHost::load(&inputs)?;
    info!(inputs = inputs.len(), declarations = host.len(), "loaded program");

    let manifest_path = options.manifest_path();
    let previous = load_manifest(&manifest_path)?;
    let changed: BTreeSet<SourceFile> = options.changed.iter().map(SourceFile::new).collect();
    let filter = if changed.is_empty() {
        EmitFilter::All
    } else {
        EmitFilter::Stale {
            previous: &previous,
            changed: &changed,
        }
    };

    let handler = StateStoreHandler::new(processor_options)?;
    let mut sink = FileSystemSink::new(&options.out_dir);
    let mut diagnostics = CollectingDiagnostics::new();
    let summary = ProcessingPass::new(&handler, &host).run(&mut sink, &mut diagnostics, filter);

    save_manifest(&manifest_path, &summary.dependencies)?;

    Ok(CompileOutcome {
        diagnostics: diagnostics.into_diagnostics(),
        summary,
        written: sink.written().map(str::to_string).collect(),
    })
}

/// One diagnostic per line.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("{}\n", d))
        .collect()
}
