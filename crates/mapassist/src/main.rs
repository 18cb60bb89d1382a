//! MapAssist entry point.
//!
//! Reads the settings file, builds the configuration, and starts the overlay
//! with the platform keyboard hook.  A configuration error is shown once (a
//! message box on Windows) and the process exits without an overlay.
//! Ctrl-C stops the keyboard hook, and the overlay exits normally.
//!
//! # Usage
//!
//! ```text
//! mapassist [OPTIONS]
//!
//! Options:
//!   --config <PATH>      Settings file [default: platform settings path]
//!   --log-level <FILTER> tracing filter, e.g. `debug` or `mapassist_core=trace` [default: info]
//!   --check              Validate the configuration and exit
//!   --dump               Print the resolved configuration as TOML and exit
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable            | Description                  |
//! |---------------------|------------------------------|
//! | `MAPASSIST_CONFIG`  | Settings file path           |
//! | `RUST_LOG`          | Log filter                   |
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ Cli::parse()
//!  └─ tracing init
//!  └─ bootstrap::run()
//!       ├─ SettingsFile        (TOML → MemorySettings)
//!       ├─ MapAssistConfig     (typed, all-or-nothing)
//!       └─ HeadlessOverlay     (keyboard hook thread on Windows)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mapassist::application::bootstrap::{self, read_configuration, render_configuration};
use mapassist::application::overlay::HeadlessOverlay;
use mapassist::infrastructure::dialog::{
    platform_reporter, ConsoleReporter, ErrorReporter, CONFIGURATION_ERROR_TITLE,
};
use mapassist::infrastructure::input_hook::platform_hook;
use mapassist::infrastructure::storage::SettingsFile;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// MapAssist map overlay.
#[derive(Debug, Parser)]
#[command(name = "mapassist", about = "Map overlay for Diablo II", version)]
struct Cli {
    /// Path of the settings file.
    ///
    /// Defaults to `settings.toml` in the platform config directory.
    #[arg(long, env = "MAPASSIST_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter in `tracing` env-filter syntax.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Validate the configuration, report the result, and exit.
    #[arg(long, conflicts_with = "dump")]
    check: bool,

    /// Print the resolved configuration as TOML and exit.
    #[arg(long)]
    dump: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("MapAssist {} starting", env!("CARGO_PKG_VERSION"));

    // --check and --dump are terminal commands; no dialog for them.
    let reporter: Box<dyn ErrorReporter> = if cli.check || cli.dump {
        Box::new(ConsoleReporter)
    } else {
        platform_reporter()
    };

    let source = match cli.config {
        Some(path) => SettingsFile::new(path),
        None => match SettingsFile::platform_default() {
            Ok(file) => file,
            Err(e) => {
                reporter.report(CONFIGURATION_ERROR_TITLE, &e.to_string());
                return ExitCode::FAILURE;
            }
        },
    };

    if cli.check {
        return match read_configuration(&source, reporter.as_ref()) {
            Some(_) => {
                println!("{}: configuration OK", source.path().display());
                ExitCode::SUCCESS
            }
            None => ExitCode::FAILURE,
        };
    }

    if cli.dump {
        let Some(config) = read_configuration(&source, reporter.as_ref()) else {
            return ExitCode::FAILURE;
        };
        return match render_configuration(&config) {
            Ok(text) => {
                print!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("could not render configuration: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let outcome = bootstrap::run(
        &source,
        reporter.as_ref(),
        platform_hook(),
        Box::new(HeadlessOverlay::new()),
    );
    info!(?outcome, "MapAssist stopped");
    outcome.exit_code()
}
