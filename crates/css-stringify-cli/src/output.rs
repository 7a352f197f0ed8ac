//! Output formatting and file emission.

use crate::cli::OutputFormat;
use camino::{Utf8Path, Utf8PathBuf};
use css_stringify::StringifyOutput;
use serde::Serialize;
use std::fs;

/// One stringified input in JSON output.
#[derive(Debug, Serialize)]
pub struct FormattedOutput<'a> {
    /// The tree file the CSS was generated from.
    pub input: &'a str,
    /// The generated CSS.
    pub css: &'a str,
    /// The serialized source map, if one was generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<&'a str>,
}

/// Formats stringify results for stdout.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the result for one input.
    pub fn format(
        &self,
        input: &Utf8Path,
        output: &StringifyOutput,
    ) -> serde_json::Result<String> {
        match self.format {
            OutputFormat::Human => Ok(Self::format_human(output)),
            OutputFormat::Json => Self::format_json(input, output),
        }
    }

    /// The CSS as generated, newline terminated.
    fn format_human(output: &StringifyOutput) -> String {
        let mut text = output.css.clone();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text
    }

    /// One JSON object per line.
    fn format_json(input: &Utf8Path, output: &StringifyOutput) -> serde_json::Result<String> {
        let formatted = FormattedOutput {
            input: input.as_str(),
            css: &output.css,
            map: output.map.as_deref(),
        };
        let mut line = serde_json::to_string(&formatted)?;
        line.push('\n');
        Ok(line)
    }
}

/// Path of the CSS file generated for `input` inside `out_dir`.
pub fn css_path(out_dir: &Utf8Path, input: &Utf8Path) -> Utf8PathBuf {
    let stem = input.file_stem().unwrap_or("stylesheet");
    out_dir.join(format!("{stem}.css"))
}

/// Path of the map file accompanying `css_path`.
pub fn map_path(css_path: &Utf8Path) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{css_path}.map"))
}

/// Writes the CSS, and the map when there is one. Returns the written paths.
pub fn write_files(
    out_dir: &Utf8Path,
    input: &Utf8Path,
    output: &StringifyOutput,
) -> std::io::Result<Vec<Utf8PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let css = css_path(out_dir, input);
    fs::write(&css, &output.css)?;
    let mut written = vec![css];

    if let Some(map) = &output.map {
        let path = map_path(&written[0]);
        fs::write(&path, map)?;
        written.push(path);
    }

    Ok(written)
}
