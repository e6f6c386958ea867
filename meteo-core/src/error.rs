use std::path::PathBuf;

/// Errors raised by the provider and configuration layers.
///
/// "No location matched" is not represented here: the resolver reports it as
/// `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed forecast response: {0}")]
    Malformed(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("could not determine platform config directory")]
    NoConfigDir,

    #[error("failed to access config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration to TOML: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl WeatherError {
    /// True for failures of the geocoding or forecast round trip, as opposed
    /// to local configuration problems.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Request { .. } | Self::Status { .. } | Self::Decode { .. } | Self::Malformed(_)
        )
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
