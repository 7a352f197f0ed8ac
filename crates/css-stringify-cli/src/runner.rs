//! Input discovery and per-file stringification.

use crate::cli::Args;
use crate::config::StringifyConfig;
use crate::output::{css_path, write_files, Formatter};
use camino::{Utf8Path, Utf8PathBuf};
use css_ast::CssDocument;
use css_stringify::{stringify, StringifyError, StringifyOptions, StringifyOutput};
use miette::Diagnostic;
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised while processing inputs.
#[derive(Debug, Error, Diagnostic)]
pub enum RunError {
    /// No tree files were found among the inputs.
    #[error("no stylesheet trees found")]
    #[diagnostic(
        code(css_stringify::no_inputs),
        help("pass `.json` tree files or directories containing them")
    )]
    NoInputs,

    /// An input could not be read.
    #[error("failed to read {path}")]
    #[diagnostic(code(css_stringify::read))]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input is not a valid stylesheet tree.
    #[error("invalid stylesheet tree in {path}")]
    #[diagnostic(
        code(css_stringify::parse),
        help("expected the JSON produced by a CSS parser: {{\"stylesheet\": {{\"rules\": [...]}}}}")
    )]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization failed.
    #[error("failed to stringify {path}")]
    #[diagnostic(code(css_stringify::stringify))]
    Stringify {
        path: Utf8PathBuf,
        #[source]
        source: StringifyError,
    },

    /// A result could not be formatted for stdout.
    #[error("failed to format output for {path}")]
    #[diagnostic(code(css_stringify::format))]
    Format {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An output could not be written.
    #[error("failed to write output for {path}")]
    #[diagnostic(code(css_stringify::write))]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Inputs stringified successfully.
    pub succeeded: usize,
    /// Inputs that failed.
    pub failed: usize,
}

/// Expands the command-line inputs into tree files.
///
/// Files are taken as given; directories are searched recursively for
/// `*.json` files, excluding the configuration file. Results are sorted and
/// deduplicated.
pub fn collect_inputs(inputs: &[Utf8PathBuf]) -> Vec<Utf8PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        files.extend(
            WalkDir::new(input)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter_map(|e| Utf8PathBuf::try_from(e.into_path()).ok())
                .filter(|p| p.extension() == Some("json"))
                .filter(|p| p.file_name() != Some(crate::config::CONFIG_FILE)),
        );
    }

    files.sort();
    files.dedup();
    files
}

/// Reads, parses and stringifies one tree file.
pub fn stringify_file(
    path: &Utf8Path,
    options: &StringifyOptions,
) -> Result<StringifyOutput, RunError> {
    let json = fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_owned(),
        source,
    })?;
    let document: CssDocument =
        serde_json::from_str(&json).map_err(|source| RunError::Parse {
            path: path.to_owned(),
            source,
        })?;
    stringify(&document, options).map_err(|source| RunError::Stringify {
        path: path.to_owned(),
        source,
    })
}

/// Options for one input: the generated file name defaults to the CSS file
/// written for it.
fn options_for(base: &StringifyOptions, out_dir: Option<&Utf8Path>, input: &Utf8Path) -> StringifyOptions {
    let mut options = base.clone();
    if let (None, Some(out_dir)) = (&options.file, out_dir) {
        options.file = css_path(out_dir, input).file_name().map(str::to_string);
    }
    options
}

/// Stringifies every input and emits the results.
///
/// Inputs are processed in parallel; output is emitted in input order.
/// Per-file failures are reported and counted, not fatal.
pub fn run(args: &Args) -> Result<RunSummary, RunError> {
    let config = match &args.config {
        Some(path) => StringifyConfig::load_file(path),
        None => StringifyConfig::load(&args.workspace),
    };
    let base = config.to_options(args);

    let files = collect_inputs(&args.inputs);
    if files.is_empty() {
        return Err(RunError::NoInputs);
    }
    tracing::info!(files = files.len(), "stringifying stylesheet trees");

    let out_dir = args.out_dir.as_deref();
    let results: Vec<Result<StringifyOutput, RunError>> = files
        .par_iter()
        .map(|file| stringify_file(file, &options_for(&base, out_dir, file)))
        .collect();

    let formatter = Formatter::new(args.output);
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    let mut summary = RunSummary::default();

    for (file, result) in files.iter().zip(results) {
        let emitted = result.and_then(|output| match out_dir {
            Some(dir) => write_files(dir, file, &output)
                .map(|written| {
                    for path in written {
                        tracing::info!(input = %file, output = %path, "wrote");
                    }
                })
                .map_err(|source| RunError::Write {
                    path: file.clone(),
                    source,
                }),
            None => formatter
                .format(file, &output)
                .map_err(|source| RunError::Format {
                    path: file.clone(),
                    source,
                })
                .and_then(|text| {
                    stdout
                        .write_all(text.as_bytes())
                        .map_err(|source| RunError::Write {
                            path: file.clone(),
                            source,
                        })
                }),
        });

        match emitted {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                summary.failed += 1;
                eprintln!("{:?}", miette::Report::new(e));
            }
        }
    }

    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "done"
    );
    Ok(summary)
}
