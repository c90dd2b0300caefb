//! Command line interface for munki_rebrand.
//!
//! Parses arguments, merges the configuration file, resolves the conversion
//! toolchain and runs the [`Rebrander`].

mod args;

pub use args::Args;

use crate::error::{CliError, Result};
use crate::rebrand::{RebrandReport, Rebrander, Toolchain};

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    run_with(&args)?;
    Ok(0)
}

/// Executes a rebrand for already parsed arguments.
pub fn run_with(args: &Args) -> Result<RebrandReport> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = args.load_config()?;
    let backend = args.backend(&config);
    let settings = args.to_settings(config)?;
    let toolchain = Toolchain::for_backend(backend)?;
    log::debug!("Using {:?} conversion backend", toolchain.backend());

    let report = Rebrander::new(settings, toolchain).run()?;
    log::info!(
        "✓ Rebrand complete: {} replacement(s) in {} file(s)",
        report.replacements(),
        report.files_rewritten()
    );
    for icon in &report.icons_installed {
        log::info!("  icon: {}", icon.display());
    }
    if let Some(script) = &report.postinstall {
        log::info!("  postinstall: {}", script.display());
    }

    Ok(report)
}
