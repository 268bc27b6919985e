//! `plugin_id.h` generation.
//!
//! Renders the extracted [`Enumerator`]s into a C++ header:
//! - A fixed LGPL banner
//! - The `INCLUDE_OLA_PLUGIN_ID_H_` include guard
//! - `namespace ola` wrapping `typedef enum { .. } ola_plugin_id;`
//!
//! The generated output is deterministic: identical input always produces
//! byte-identical output. Files are written through a temp file in the
//! destination directory and renamed into place, so a failed run never
//! leaves a truncated header behind.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::extract::{Enumerator, ManifestEntry, load_enumerators};

/// Include guard macro of the generated header.
pub const INCLUDE_GUARD: &str = "INCLUDE_OLA_PLUGIN_ID_H_";

/// Namespace the enum is declared in.
pub const NAMESPACE: &str = "ola";

/// Name of the generated enum type.
pub const ENUM_NAME: &str = "ola_plugin_id";

const BANNER: &str = "\
/*
 * This library is free software; you can redistribute it and/or
 * modify it under the terms of the GNU Lesser General Public
 * License as published by the Free Software Foundation; either
 * version 2.1 of the License, or (at your option) any later version.
 *
 * This library is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * Lesser General Public License for more details.
 *
 * You should have received a copy of the GNU Lesser General Public
 * License along with this library; if not, write to the Free Software
 * Foundation, Inc., 59 Temple Place - Suite 330, Boston, MA 02111-1307, USA.
 *
 * plugin_id.h
 * Contains the id for each plugin
 * Copyright (C) 2005-2009 Simon Newton
 */
";

/// Statistics collected during generation for reporting.
#[derive(Debug, Default)]
pub struct GenerationStats {
    pub lines_scanned: usize,
    pub enumerators_generated: usize,
    /// Enumerators whose value is not an integer literal. They are still
    /// emitted, but the manifest records their value as `null`.
    pub values_unparsed: usize,
}

impl GenerationStats {
    fn new(enumerators: &[Enumerator], lines_scanned: usize) -> Self {
        Self {
            lines_scanned,
            enumerators_generated: enumerators.len(),
            values_unparsed: enumerators.iter().filter(|e| e.value().is_none()).count(),
        }
    }
}

/// Generate `output` from the identifier lines of `input`.
///
/// The input is read completely before anything is written, so a missing
/// input never creates or touches `output`.
pub fn generate(input: &Path, output: &Path) -> Result<GenerationStats> {
    generate_with_manifest(input, output, None)
}

/// Like [`generate`], additionally writing a JSON manifest of the
/// enumerators to `manifest` when given.
pub fn generate_with_manifest(
    input: &Path,
    output: &Path,
    manifest: Option<&Path>,
) -> Result<GenerationStats> {
    let (enumerators, lines_scanned) = load_enumerators(input)?;
    if enumerators.is_empty() {
        log::warn!(
            "no {} lines in {}; generating an empty enum",
            crate::extract::PLUGIN_PREFIX,
            input.display()
        );
    }

    write_file(output, &render_header(&enumerators))?;
    if let Some(path) = manifest {
        write_manifest(&enumerators, path)?;
    }

    Ok(GenerationStats::new(&enumerators, lines_scanned))
}

/// Verify that `output` matches what [`generate`] would write for `input`.
///
/// Never writes. A missing or differing header is [`Error::Stale`].
pub fn check(input: &Path, output: &Path) -> Result<GenerationStats> {
    let (enumerators, lines_scanned) = load_enumerators(input)?;
    let expected = render_header(&enumerators);

    match std::fs::read(output) {
        Ok(existing) if existing == expected.as_bytes() => {
            Ok(GenerationStats::new(&enumerators, lines_scanned))
        }
        Ok(_) => Err(Error::Stale {
            path: output.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::Stale {
            path: output.to_path_buf(),
        }),
        Err(e) => Err(Error::OutputRead {
            path: output.to_path_buf(),
            source: e,
        }),
    }
}

/// Render the complete header text for `enumerators`.
pub fn render_header(enumerators: &[Enumerator]) -> String {
    let mut out = String::from(BANNER);

    writeln!(out).unwrap();
    writeln!(out, "#ifndef {INCLUDE_GUARD}").unwrap();
    writeln!(out, "#define {INCLUDE_GUARD}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "namespace {NAMESPACE} {{").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "typedef enum {{").unwrap();
    for e in enumerators {
        writeln!(out, "{}", e.line()).unwrap();
    }
    writeln!(out, "}} {ENUM_NAME};").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "}}  // namespace {NAMESPACE}").unwrap();
    writeln!(out, "#endif  // {INCLUDE_GUARD}").unwrap();

    out
}

// ── Manifest (JSON reference) ──────────────────────────────────────────

#[derive(Serialize)]
struct Manifest<'a> {
    #[serde(rename = "enum")]
    enum_name: &'a str,
    enumerators: Vec<ManifestEntry<'a>>,
}

/// Write a JSON listing of `enumerators` to `path`, in file order.
pub fn write_manifest(enumerators: &[Enumerator], path: &Path) -> Result<()> {
    let manifest = Manifest {
        enum_name: ENUM_NAME,
        enumerators: enumerators.iter().map(Enumerator::manifest_entry).collect(),
    };
    let mut json = serde_json::to_string_pretty(&manifest)?;
    json.push('\n');
    write_file(path, &json)
}

// ── Shared helpers ─────────────────────────────────────────────────────

/// Atomically replace `path` with `content`.
///
/// The parent directory must already exist. An existing file keeps its
/// permissions; a new one gets `0666` minus the process umask on unix, as
/// a plain `File::create` would.
fn write_file(path: &Path, content: &str) -> Result<()> {
    let write_err = |source: std::io::Error| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;

    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    log::debug!("wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enumerators(lines: &[&str]) -> Vec<Enumerator> {
        lines.iter().map(|l| Enumerator::from_line(l)).collect()
    }

    #[test]
    fn empty_enum_body() {
        let header = render_header(&[]);
        assert!(header.contains("typedef enum {\n} ola_plugin_id;\n"));
    }

    #[test]
    fn header_scaffold() {
        let header = render_header(&enumerators(&["  OLA_PLUGIN_DUMMY = 1;"]));

        assert!(header.starts_with("/*\n * This library is free software"));
        assert!(header.contains("version 2.1 of the License"));
        assert!(header.contains("Copyright (C) 2005-2009 Simon Newton"));
        assert!(header.contains("#ifndef INCLUDE_OLA_PLUGIN_ID_H_\n#define INCLUDE_OLA_PLUGIN_ID_H_\n"));
        assert!(header.contains("namespace ola {"));
        assert!(header.contains("typedef enum {\n  OLA_PLUGIN_DUMMY = 1,\n} ola_plugin_id;"));
        assert!(header.ends_with("}  // namespace ola\n#endif  // INCLUDE_OLA_PLUGIN_ID_H_\n"));
    }

    #[test]
    fn guard_opens_before_namespace() {
        let header = render_header(&[]);
        let ifndef = header.find("#ifndef").unwrap();
        let ns = header.find("namespace ola {").unwrap();
        let body = header.find("typedef enum {").unwrap();
        let endif = header.find("#endif").unwrap();
        assert!(ifndef < ns && ns < body && body < endif);
    }

    #[test]
    fn stats_count_unparsed_values() {
        let stats = GenerationStats::new(
            &enumerators(&["OLA_PLUGIN_A = 1;", "OLA_PLUGIN_B = OTHER;", "OLA_PLUGIN_C"]),
            10,
        );
        assert_eq!(stats.lines_scanned, 10);
        assert_eq!(stats.enumerators_generated, 3);
        assert_eq!(stats.values_unparsed, 2);
    }

    #[cfg(unix)]
    #[test]
    fn new_file_mode_follows_umask() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("reference.h");
        std::fs::File::create(&reference).unwrap();
        let path = dir.path().join("plugin_id.h");

        write_file(&path, "x").unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&reference));
    }

    #[cfg(unix)]
    #[test]
    fn existing_file_keeps_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugin_id.h");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        write_file(&path, "new").unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o640);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn check_reports_unreadable_header_as_output_read() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Ola.proto");
        std::fs::write(&input, "  OLA_PLUGIN_DUMMY = 1;\n").unwrap();
        // A directory in place of the header opens but cannot be read.
        let output = dir.path().join("plugin_id.h");
        std::fs::create_dir(&output).unwrap();

        let err = check(&input, &output).unwrap_err();
        assert!(matches!(err, Error::OutputRead { .. }));
        assert!(err.to_string().contains("plugin_id.h"));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("plugin_id.h");

        let err = write_file(&path, "x").unwrap_err();
        assert!(matches!(err, Error::OutputWrite { .. }));
        assert!(!path.exists());
    }
}
