//! Startup sequence.
//!
//! ```text
//! run()
//!  └─ read_configuration()
//!       ├─ SettingsSource::load          -- settings file → MemorySettings
//!       └─ MapAssistConfig::from_settings
//!            └─ error? → ErrorReporter::report("Configuration parsing error", …)
//!                        → Outcome::ConfigurationFailed   (overlay never starts)
//!  └─ Overlay::run(hook, config)
//! ```
//!
//! A failure is reported exactly once, with the error's own message, and
//! nothing is retried or filled in with defaults.

use std::process::ExitCode;

use mapassist_core::{ConfigurationReadError, MapAssistConfig};
use thiserror::Error;
use tracing::{error, info};

use super::overlay::Overlay;
use crate::infrastructure::dialog::{ErrorReporter, CONFIGURATION_ERROR_TITLE};
use crate::infrastructure::input_hook::InputHook;
use crate::infrastructure::storage::{SettingsFileError, SettingsSource};

/// Why no configuration could be produced.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsFileError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationReadError),
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The overlay ran and closed normally.
    Finished,
    /// The configuration could not be read; the overlay was not started.
    ConfigurationFailed,
    /// The overlay returned an error.
    OverlayFailed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Finished => ExitCode::SUCCESS,
            Outcome::ConfigurationFailed => ExitCode::from(1),
            Outcome::OverlayFailed => ExitCode::from(2),
        }
    }
}

/// Loads the settings and builds the complete configuration.
///
/// # Errors
///
/// Returns the first [`SettingsFileError`] or [`ConfigurationReadError`].
pub fn load_configuration(source: &dyn SettingsSource) -> Result<MapAssistConfig, StartupError> {
    info!(source = %source.describe(), "reading configuration");
    let store = source.load()?;
    let config = MapAssistConfig::from_settings(&store)?;
    info!("configuration ready");
    Ok(config)
}

/// [`load_configuration`], with any failure shown through `reporter` under
/// [`CONFIGURATION_ERROR_TITLE`].
pub fn read_configuration(
    source: &dyn SettingsSource,
    reporter: &dyn ErrorReporter,
) -> Option<MapAssistConfig> {
    match load_configuration(source) {
        Ok(config) => Some(config),
        Err(e) => {
            error!("configuration could not be read: {e}");
            reporter.report(CONFIGURATION_ERROR_TITLE, &e.to_string());
            None
        }
    }
}

/// Serializes the configuration as TOML for `--dump`.
///
/// # Errors
///
/// Returns the serializer error; not expected for a configuration built by
/// [`load_configuration`].
pub fn render_configuration(config: &MapAssistConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}

/// Reads the configuration and, if that worked, runs `overlay` until it
/// closes.
pub fn run(
    source: &dyn SettingsSource,
    reporter: &dyn ErrorReporter,
    hook: Box<dyn InputHook>,
    overlay: Box<dyn Overlay>,
) -> Outcome {
    let Some(config) = read_configuration(source, reporter) else {
        return Outcome::ConfigurationFailed;
    };

    info!("starting overlay");
    match overlay.run(hook, config) {
        Ok(()) => {
            info!("overlay closed");
            Outcome::Finished
        }
        Err(e) => {
            error!("overlay failed: {e:#}");
            Outcome::OverlayFailed
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use mapassist_core::{MemorySettings, SettingsStore};

    use super::*;
    use crate::infrastructure::dialog::MockErrorReporter;
    use crate::infrastructure::input_hook::mock::MockInputHook;
    use crate::infrastructure::storage::parse_settings;

    const EXAMPLE_SETTINGS: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../config/settings.example.toml"
    ));

    fn example_settings() -> MemorySettings {
        parse_settings(EXAMPLE_SETTINGS).expect("example settings parse")
    }

    /// Overlay that records whether it was launched.
    struct FlagOverlay {
        launched: Rc<Cell<bool>>,
        fail: bool,
    }

    impl Overlay for FlagOverlay {
        fn run(
            self: Box<Self>,
            _hook: Box<dyn InputHook>,
            _config: MapAssistConfig,
        ) -> anyhow::Result<()> {
            self.launched.set(true);
            if self.fail {
                anyhow::bail!("window creation failed");
            }
            Ok(())
        }
    }

    fn flag_overlay(fail: bool) -> (Box<dyn Overlay>, Rc<Cell<bool>>) {
        let launched = Rc::new(Cell::new(false));
        let overlay = FlagOverlay {
            launched: Rc::clone(&launched),
            fail,
        };
        (Box::new(overlay), launched)
    }

    #[test]
    fn test_valid_settings_produce_configuration_without_report() {
        // Arrange: a reporter that must never be called.
        let mut reporter = MockErrorReporter::new();
        reporter.expect_report().times(0);

        // Act
        let config = read_configuration(&example_settings(), &reporter);

        // Assert
        assert!(config.is_some());
    }

    #[test]
    fn test_missing_key_is_reported_once_with_title_and_message() {
        // Arrange
        let mut store = example_settings();
        store.remove("Opacity");
        let mut reporter = MockErrorReporter::new();
        reporter
            .expect_report()
            .withf(|title: &str, message: &str| {
                title == "Configuration parsing error"
                    && message == "Could not read configuration parameter \"Opacity\" as f64."
            })
            .times(1)
            .return_const(());

        // Act
        let config = read_configuration(&store, &reporter);

        // Assert
        assert!(config.is_none());
    }

    #[test]
    fn test_settings_file_error_is_reported() {
        // Arrange
        let source = crate::infrastructure::storage::SettingsFile::new(
            "/nonexistent/path/that/cannot/exist/settings.toml",
        );
        let mut reporter = MockErrorReporter::new();
        reporter
            .expect_report()
            .withf(|title: &str, message: &str| {
                title == CONFIGURATION_ERROR_TITLE && message.contains("settings.toml")
            })
            .times(1)
            .return_const(());

        // Act / Assert
        assert!(read_configuration(&source, &reporter).is_none());
    }

    #[test]
    fn test_run_does_not_launch_overlay_on_failure() {
        // Arrange
        let mut store = example_settings();
        store.insert("MapPosition", "Sideways");
        let mut reporter = MockErrorReporter::new();
        reporter.expect_report().times(1).return_const(());
        let (overlay, launched) = flag_overlay(false);

        // Act
        let outcome = run(&store, &reporter, Box::new(MockInputHook::new()), overlay);

        // Assert
        assert_eq!(outcome, Outcome::ConfigurationFailed);
        assert!(!launched.get(), "overlay must not start without a configuration");
    }

    #[test]
    fn test_run_launches_overlay_with_valid_configuration() {
        let mut reporter = MockErrorReporter::new();
        reporter.expect_report().times(0);
        let (overlay, launched) = flag_overlay(false);

        let outcome = run(&example_settings(), &reporter, Box::new(MockInputHook::new()), overlay);

        assert_eq!(outcome, Outcome::Finished);
        assert!(launched.get());
    }

    #[test]
    fn test_overlay_error_is_not_a_configuration_error() {
        let mut reporter = MockErrorReporter::new();
        reporter.expect_report().times(0);
        let (overlay, _) = flag_overlay(true);

        let outcome = run(&example_settings(), &reporter, Box::new(MockInputHook::new()), overlay);

        assert_eq!(outcome, Outcome::OverlayFailed);
    }

    #[test]
    fn test_rendered_configuration_omits_token() {
        // Arrange
        let mut store = example_settings();
        store.insert("ApiToken", "secret-token");
        let config = MapAssistConfig::from_settings(&store).unwrap();

        // Act
        let text = render_configuration(&config).expect("render");

        // Assert
        assert!(!text.contains("secret-token"));
        assert!(text.contains("[map]"));
        assert!(text.contains(&format!("endpoint = \"{}\"", config.api.endpoint)));
        assert!(store.get("ApiToken").is_some());
    }
}
