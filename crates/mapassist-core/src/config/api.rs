//! Map-data API connection settings.

use serde::Serialize;

use super::ConfigSection;
use crate::settings::{ConfigurationReadError, ConfigurationReader};

/// Where map seeds are resolved and how to authenticate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiConfig {
    /// Base URL of the map API (`ApiEndpoint`).
    pub endpoint: String,
    /// Access token (`ApiToken`).  May be empty.
    #[serde(skip_serializing)]
    pub token: String,
}

impl ConfigSection for ApiConfig {
    const NAME: &'static str = "api";

    fn read(reader: &ConfigurationReader<'_>) -> Result<Self, ConfigurationReadError> {
        Ok(Self {
            endpoint: reader.read_string("ApiEndpoint")?,
            token: reader.read_string("ApiToken")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettings;

    #[test]
    fn test_reads_endpoint_and_token() {
        let store: MemorySettings = [
            ("ApiEndpoint", "http://localhost:8080/"),
            ("ApiToken", "secret"),
        ]
        .into_iter()
        .collect();

        let api = ApiConfig::read(&ConfigurationReader::new(&store)).unwrap();

        assert_eq!(api.endpoint, "http://localhost:8080/");
        assert_eq!(api.token, "secret");
    }

    #[test]
    fn test_missing_token_fails_section() {
        let store: MemorySettings = [("ApiEndpoint", "http://localhost:8080/")]
            .into_iter()
            .collect();

        let err = ApiConfig::read(&ConfigurationReader::new(&store)).unwrap_err();

        assert_eq!(err.parameter, "ApiToken");
    }
}
