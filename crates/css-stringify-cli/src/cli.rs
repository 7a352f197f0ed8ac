//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Turn parsed stylesheet trees (JSON) back into CSS, with optional source maps.
#[derive(Debug, Parser)]
#[command(name = "css-stringify")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Stylesheet tree files, or directories searched for `*.json` trees
    #[arg(required = true)]
    pub inputs: Vec<Utf8PathBuf>,

    /// Directory holding `css-stringify.json`
    #[arg(long, default_value = ".")]
    pub workspace: Utf8PathBuf,

    /// Explicit configuration file (overrides the workspace lookup)
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Omit indentation and line breaks
    #[arg(long)]
    pub compress: bool,

    /// Indentation unit (default: two spaces)
    #[arg(long)]
    pub indent: Option<String>,

    /// Generate a source map
    #[arg(long)]
    pub map: bool,

    /// Generate a source map and append a sourceMappingURL comment
    #[arg(long = "map-url")]
    pub map_url: Option<String>,

    /// Generated file name recorded in the source map
    #[arg(long)]
    pub file: Option<String>,

    /// Source root recorded in the source map
    #[arg(long = "root-url")]
    pub root_url: Option<String>,

    /// Original file name for rules without their own
    #[arg(long)]
    pub original: Option<String>,

    /// Write `<name>.css` (and `<name>.css.map`) here instead of stdout
    #[arg(long = "out-dir")]
    pub out_dir: Option<Utf8PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain CSS (default)
    #[default]
    Human,
    /// One JSON object per input with the CSS and the map
    Json,
}
