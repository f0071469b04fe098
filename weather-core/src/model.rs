use serde::{Deserialize, Serialize};

/// One decoded response of the OpenWeather current-weather endpoint.
///
/// Field names follow the upstream JSON so the same definition reads the
/// API response and writes the JSON log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coord>,
    pub weather: Vec<Condition>,
    pub main: Readings,
    pub wind: Wind,
    pub sys: Sys,
    /// Shift from UTC in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<i64>,
}

impl WeatherRecord {
    /// The primary condition; upstream lists the most relevant one first.
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
}

/// Temperatures in °C (the request asks for metric units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    /// hPa
    pub pressure: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// m/s
    pub speed: f64,
    /// Upstream omits it in calm or unreported conditions.
    #[serde(default)]
    pub deg: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: String,
    /// Unix seconds, UTC.
    pub sunrise: i64,
    pub sunset: i64,
}
