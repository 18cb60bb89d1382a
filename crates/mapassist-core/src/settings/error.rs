//! The single error kind produced by the configuration reader.
//!
//! A missing key and a malformed value are deliberately the same error: the
//! user fixes both the same way, by editing the settings file.  What the user
//! needs to know is *which* key, *what* type was expected and, for enums,
//! which values would have been accepted.

use thiserror::Error;

/// A configuration parameter could not be read as the requested type.
///
/// # Display format
///
/// ```text
/// Could not read configuration parameter "MapPosition" as MapPosition. Valid values are: TopLeft, TopRight, Center.
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.render())]
pub struct ConfigurationReadError {
    /// The settings key that failed.
    pub parameter: String,
    /// Name of the type the value was being converted to.
    pub expected_type: &'static str,
    /// Accepted values, populated for enum parsing.
    pub valid_values: Option<Vec<&'static str>>,
    /// Extra remediation text (e.g. the unknown name in a list).
    pub hint: Option<String>,
}

impl ConfigurationReadError {
    pub fn new(parameter: impl Into<String>, expected_type: &'static str) -> Self {
        Self {
            parameter: parameter.into(),
            expected_type,
            valid_values: None,
            hint: None,
        }
    }

    /// Attaches the list of accepted values.
    pub fn with_valid_values(mut self, values: Vec<&'static str>) -> Self {
        self.valid_values = Some(values);
        self
    }

    /// Attaches a free-form remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn render(&self) -> String {
        let mut out = format!(
            "Could not read configuration parameter \"{}\" as {}.",
            self.parameter, self.expected_type
        );
        if let Some(values) = &self.valid_values {
            out.push_str(&format!(" Valid values are: {}.", values.join(", ")));
        }
        if let Some(hint) = &self.hint {
            out.push(' ');
            out.push_str(hint);
        }
        out
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
