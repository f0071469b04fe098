use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::API_KEY_ENV;

/// Everything that can go wrong while getting one city's weather.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("{} environment variable not set.", API_KEY_ENV)]
    MissingApiKey,

    #[error("Error fetching weather for {city}: {source}")]
    Transport {
        city: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error for {city}: {status}")]
    Status { city: String, status: StatusCode },

    #[error("Decode error for {city}: {source}")]
    Decode {
        city: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No weather conditions reported for {city}")]
    NoConditions { city: String },
}

impl WeatherError {
    /// Status glyph prefixed to console messages.
    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherError::MissingApiKey => "❗",
            WeatherError::Transport { .. } => "❌",
            WeatherError::Status { .. } => "⚠️",
            WeatherError::Decode { .. } | WeatherError::NoConditions { .. } => "🛑",
        }
    }
}

#[derive(Debug, Error)]
pub enum LogWriteError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize weather records: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_carries_status_line() {
        let err = WeatherError::Status {
            city: "Atlantis".into(),
            status: StatusCode::NOT_FOUND,
        };

        assert_eq!(err.to_string(), "API error for Atlantis: 404 Not Found");
        assert_eq!(err.glyph(), "⚠️");
    }

    #[test]
    fn missing_key_names_the_variable() {
        let err = WeatherError::MissingApiKey;
        assert_eq!(
            err.to_string(),
            "OPENWEATHER_API_KEY environment variable not set."
        );
        assert_eq!(err.glyph(), "❗");
    }

    #[test]
    fn decode_error_is_tagged() {
        let source = serde_json::from_str::<u8>("nope").unwrap_err();
        let err = WeatherError::Decode {
            city: "Lagos".into(),
            source,
        };

        assert!(err.to_string().starts_with("Decode error for Lagos:"));
        assert_eq!(err.glyph(), "🛑");
    }
}
