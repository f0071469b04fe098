//! Fixtures shared by the unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{
    error::WeatherError,
    model::{Condition, Coord, Readings, Sys, WeatherRecord, Wind},
    provider::WeatherSource,
};

pub const LONDON_JSON: &str = r#"{
  "coord": {"lon": -0.1257, "lat": 51.5085},
  "weather": [{"id": 804, "main": "Clouds", "description": "overcast clouds", "icon": "04d"}],
  "base": "stations",
  "main": {"temp": 15.0, "feels_like": 14.2, "temp_min": 13.5, "temp_max": 16.1, "pressure": 1012, "humidity": 80},
  "visibility": 10000,
  "wind": {"speed": 3.1, "deg": 240},
  "clouds": {"all": 100},
  "dt": 1700010000,
  "sys": {"type": 2, "id": 2075535, "country": "GB", "sunrise": 1700000000, "sunset": 1700030000},
  "timezone": 0,
  "id": 2643743,
  "name": "London",
  "cod": 200
}"#;

pub fn london() -> WeatherRecord {
    WeatherRecord {
        name: "London".into(),
        coord: Some(Coord { lon: -0.1257, lat: 51.5085 }),
        weather: vec![Condition {
            main: "Clouds".into(),
            description: "overcast clouds".into(),
        }],
        main: Readings {
            temp: 15.0,
            feels_like: 14.2,
            temp_min: 13.5,
            temp_max: 16.1,
            humidity: 80,
            pressure: 1012,
        },
        wind: Wind { speed: 3.1, deg: 240 },
        sys: Sys {
            country: "GB".into(),
            sunrise: 1_700_000_000,
            sunset: 1_700_030_000,
        },
        timezone: Some(0),
    }
}

pub fn tokyo() -> WeatherRecord {
    WeatherRecord {
        name: "Tokyo".into(),
        coord: Some(Coord { lon: 139.6917, lat: 35.6895 }),
        weather: vec![Condition {
            main: "Clear".into(),
            description: "clear sky".into(),
        }],
        main: Readings {
            temp: 12.34,
            feels_like: 11.0,
            temp_min: 10.5,
            temp_max: 13.9,
            humidity: 55,
            pressure: 1020,
        },
        wind: Wind { speed: 1.5, deg: 10 },
        sys: Sys {
            country: "JP".into(),
            sunrise: 1_699_995_600,
            sunset: 1_700_034_000,
        },
        timezone: Some(32_400),
    }
}

/// Serves canned records; any other city answers 404.
#[derive(Debug, Default)]
pub struct StubSource {
    records: HashMap<String, WeatherRecord>,
}

impl StubSource {
    pub fn with(records: impl IntoIterator<Item = WeatherRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.name.clone(), r)).collect(),
        }
    }
}

#[async_trait]
impl WeatherSource for StubSource {
    async fn fetch(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        self.records
            .get(city)
            .cloned()
            .ok_or_else(|| WeatherError::Status {
                city: city.to_string(),
                status: StatusCode::NOT_FOUND,
            })
    }
}
