// Main Entry Point
//
// Argument parsing and logging setup for the `ssc` binary.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use crate::perform_compile::{
    format_diagnostics, perform_compile, CompileOptions, EXIT_HOST_FAILURE,
};

pub fn build_command() -> Command {
    Command::new("ssc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates StateStore base classes from a program model")
        .arg(
            Arg::new("inputs")
                .value_name("PROGRAM.json")
                .help("Program model files or glob patterns")
                .num_args(1..)
                .required(true),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .help("Directory generated sources are written to")
                .required(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Processor options (defaults to ./statestore.json when present)"),
        )
        .arg(
            Arg::new("manifest")
                .long("manifest")
                .value_name("FILE")
                .help("Dependency manifest (defaults to <out-dir>/.statestore-deps.json)"),
        )
        .arg(
            Arg::new("changed")
                .long("changed")
                .value_name("FILE")
                .action(ArgAction::Append)
                .help("Source file changed since the last run; only stale outputs are regenerated"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log pipeline progress"),
        )
}

pub fn compile_options(matches: &ArgMatches) -> CompileOptions {
    let strings = |id: &str| -> Vec<String> {
        matches
            .get_many::<String>(id)
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    };
    let path = |id: &str| matches.get_one::<String>(id).map(PathBuf::from);

    let mut options = CompileOptions::new(
        strings("inputs"),
        path("out-dir").unwrap_or_else(|| PathBuf::from(".")),
    );
    options.config = path("config");
    options.manifest = path("manifest");
    options.changed = strings("changed");
    options
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `-v`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run `ssc` with `args` (program name first) and return the process exit code.
pub fn main_entry<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = match build_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(error) => {
            let _ = error.print();
            return if error.use_stderr() { EXIT_HOST_FAILURE } else { 0 };
        }
    };
    init_logging(matches.get_flag("verbose"));

    match perform_compile(&compile_options(&matches)) {
        Ok(outcome) => {
            eprint!("{}", format_diagnostics(&outcome.diagnostics));
            outcome.exit_code()
        }
        Err(error) => {
            eprintln!("error: {:#}", error);
            EXIT_HOST_FAILURE
        }
    }
}
