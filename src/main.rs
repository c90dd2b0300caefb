//! munki_rebrand - rebrands Managed Software Center in an unpacked munkitools package.
//!
//! Rewrites the application name in every supported localization and
//! optionally installs a new icon and postinstall script.

use std::process;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match munki_rebrand::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
