//! Plugin identifier extraction from `Ola.proto`.
//!
//! Extraction is purely line-oriented: a line is an identifier line when its
//! content, after leading whitespace, starts with [`PLUGIN_PREFIX`]. The proto
//! grammar is never parsed, so partial or malformed definition files still
//! yield whatever identifier lines they contain.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// Prefix that marks a plugin identifier line.
pub const PLUGIN_PREFIX: &str = "OLA_PLUGIN_";

/// One extracted identifier line, rewritten as a C enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumerator {
    line: String,
}

impl Enumerator {
    /// Build an enumerator from a raw identifier line.
    ///
    /// The first `;` becomes `,`. Nothing else about the line changes,
    /// including its leading whitespace.
    pub fn from_line(line: &str) -> Self {
        Self {
            line: line.replacen(';', ",", 1),
        }
    }

    /// The line as it appears in the enum body.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Best-effort identifier name: the text before `=`, or the whole line
    /// without its terminator when there is no `=`.
    pub fn name(&self) -> &str {
        let body = self.body();
        match body.split_once('=') {
            Some((name, _)) => name.trim(),
            None => body,
        }
    }

    /// Best-effort integer value from a `NAME = VALUE` line.
    ///
    /// Only decimal literals parse. Hex values (`0x10`) and values followed
    /// by field options (`= 1 [deprecated = true]`) yield `None`.
    pub fn value(&self) -> Option<i64> {
        let (_, value) = self.body().split_once('=')?;
        value.trim().parse().ok()
    }

    /// Manifest view of this enumerator.
    pub fn manifest_entry(&self) -> ManifestEntry<'_> {
        ManifestEntry {
            name: self.name(),
            value: self.value(),
        }
    }

    /// Trimmed line with the rewritten terminator and any trailing comment
    /// removed.
    fn body(&self) -> &str {
        let line = self.line.trim();
        let line = line.split_once("//").map_or(line, |(code, _)| code);
        let line = line.split_once(',').map_or(line, |(code, _)| code);
        line.trim()
    }
}

/// A `{"name": .., "value": ..}` record in the JSON manifest.
#[derive(Debug, Serialize)]
pub struct ManifestEntry<'a> {
    pub name: &'a str,
    pub value: Option<i64>,
}

/// Returns `true` when `line` is a plugin identifier line.
pub fn is_identifier_line(line: &str) -> bool {
    line.trim_start().starts_with(PLUGIN_PREFIX)
}

/// Split on `\n` only. A `\r` before the newline stays part of the line.
fn raw_lines(text: &str) -> std::str::SplitTerminator<'_, char> {
    text.split_terminator('\n')
}

/// Select the identifier lines of `text`, in file order.
pub fn extract_enumerators(text: &str) -> Vec<Enumerator> {
    raw_lines(text)
        .filter(|line| is_identifier_line(line))
        .map(Enumerator::from_line)
        .collect()
}

/// Read the protocol-definition file and extract its identifier lines.
///
/// Also returns the number of lines scanned, for reporting.
pub fn load_enumerators(path: &Path) -> Result<(Vec<Enumerator>, usize)> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::InputNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    let enumerators = extract_enumerators(&text);
    log::debug!(
        "{}: {} identifier lines",
        path.display(),
        enumerators.len()
    );
    Ok((enumerators, raw_lines(&text).count()))
}
