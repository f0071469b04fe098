use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{error::WeatherError, model::WeatherRecord};

use super::WeatherSource;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        // The request URL carries the API key; keep it out of error text.
        let transport = |source: reqwest::Error| WeatherError::Transport {
            city: city.to_string(),
            source: source.without_url(),
        };

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Status {
                city: city.to_string(),
                status,
            });
        }

        let body = res.text().await.map_err(transport)?;

        let record: WeatherRecord =
            serde_json::from_str(&body).map_err(|source| WeatherError::Decode {
                city: city.to_string(),
                source,
            })?;

        if record.condition().is_none() {
            return Err(WeatherError::NoConditions {
                city: city.to_string(),
            });
        }

        Ok(record)
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        debug!(city, "requesting current weather");

        let result = self.fetch_current(city).await;
        if let Err(err) = &result {
            warn!(city, error = %err, "weather lookup failed");
        }
        result
    }
}
