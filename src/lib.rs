//! Generate OLA's `plugin_id.h` from the plugin identifiers in `Ola.proto`.
//!
//! `ola-plugin-id-gen` scans the protocol-definition file line by line for
//! `OLA_PLUGIN_*` enumerators and emits a C++ header declaring them as the
//! `ola::ola_plugin_id` enum, wrapped in the project's LGPL banner and an
//! include guard.
//!
//! # Features
//!
//! - Line-oriented extraction: no proto grammar, so partial files still work
//! - Order-preserving; the first `;` of each line becomes `,`
//! - Deterministic output: byte-identical across runs
//! - Atomic writes: a failed run never leaves a truncated header
//! - `check` mode to verify a committed header is current
//! - Optional JSON manifest of the extracted names and values
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! let stats = ola_plugin_id_gen::codegen::generate(
//!     Path::new("../../common/protocol/Ola.proto"),
//!     Path::new("plugin_id.h"),
//! )?;
//! eprintln!("Generated {} plugin ids", stats.enumerators_generated);
//! # Ok::<(), ola_plugin_id_gen::error::Error>(())
//! ```

pub mod codegen;
pub mod error;
pub mod extract;
