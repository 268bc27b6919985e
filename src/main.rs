use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::LevelFilter;

/// Generate plugin_id.h from the OLA_PLUGIN_* enumerators in Ola.proto.
///
/// With no arguments, reads ../../common/protocol/Ola.proto and writes
/// plugin_id.h, both relative to the current directory.
#[derive(Parser)]
#[command(name = "ola-plugin-id-gen", version, about)]
struct Cli {
    /// Protocol-definition file to scan.
    #[arg(long, default_value = "../../common/protocol/Ola.proto")]
    input: PathBuf,

    /// Header file to generate.
    #[arg(long, default_value = "plugin_id.h")]
    output: PathBuf,

    /// Also write a JSON manifest of the extracted enumerators.
    #[arg(long, conflicts_with = "check")]
    manifest: Option<PathBuf>,

    /// Verify the header is up to date instead of writing it.
    #[arg(long)]
    check: bool,

    /// Suppress non-error output.
    #[arg(long, short)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Info
        })
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");

        // Print cause chain.
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = std::error::Error::source(cause);
        }

        process::exit(1);
    }
}

fn run(cli: Cli) -> ola_plugin_id_gen::error::Result<()> {
    log::info!("Scanning {}", cli.input.display());

    if cli.check {
        let stats = ola_plugin_id_gen::codegen::check(&cli.input, &cli.output)?;
        log::info!(
            "{} is up to date ({} plugin ids)",
            cli.output.display(),
            stats.enumerators_generated
        );
        return Ok(());
    }

    let stats = ola_plugin_id_gen::codegen::generate_with_manifest(
        &cli.input,
        &cli.output,
        cli.manifest.as_deref(),
    )?;

    log::info!(
        "Generated {} plugin ids from {} lines into {}",
        stats.enumerators_generated,
        stats.lines_scanned,
        cli.output.display()
    );
    if let Some(manifest) = &cli.manifest {
        log::info!("Wrote manifest {}", manifest.display());
        if stats.values_unparsed > 0 {
            log::info!(
                "{} enumerators had no integer value (null in manifest)",
                stats.values_unparsed
            );
        }
    }

    Ok(())
}
