use async_trait::async_trait;
use std::fmt::Debug;

use crate::{config::Config, error::WeatherError, model::WeatherRecord};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Anything that can turn a city name into a [`WeatherRecord`].
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, city: &str) -> Result<WeatherRecord, WeatherError>;
}

/// Build the OpenWeather client for a reporting mode; fails without an API key.
pub fn source_from_config(config: &Config) -> Result<OpenWeatherClient, WeatherError> {
    let api_key = config.api_key()?;
    Ok(OpenWeatherClient::new(api_key.to_owned(), config.base_url.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn source_from_config_errors_when_missing_api_key() {
        let cfg = Config::from_parts(Settings::default(), None);
        let err = source_from_config(&cfg).unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }

    #[test]
    fn source_from_config_works_when_key_is_set() {
        let cfg = Config::from_parts(Settings::default(), Some("KEY".into()));
        assert!(source_from_config(&cfg).is_ok());
    }
}
