//! Rendering of [`WeatherRecord`]s as console text, HTML and one-liners.
//!
//! All functions here are pure: the same record (and clock style) always
//! yields the same bytes.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

use crate::model::WeatherRecord;

/// Which wall clock sunrise and sunset are shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStyle {
    /// The time zone of the machine running the report.
    Host,
    /// The city's own time, using the offset reported upstream.
    City,
}

const UNKNOWN: &str = "Unknown";

/// The emoji-annotated block used on the console and in the text log.
pub fn format_text(record: &WeatherRecord, clock: ClockStyle) -> String {
    let (main, description) = condition_parts(record);
    let sunrise = clock_time(record.sys.sunrise, record, clock);
    let sunset = clock_time(record.sys.sunset, record, clock);

    format!(
        "📍 {}, {}\n\
         🌤️ Condition: {} ({})\n\
         🌡️ Temperature: {:.2}°C (Feels like {:.2}°C)\n\
         📉 Min/Max: {:.2}°C / {:.2}°C\n\
         💧 Humidity: {}% | Pressure: {}hPa\n\
         🌬️ Wind: {:.2}m/s from {}°\n\
         🌅 Sunrise: {} | 🌇 Sunset: {}\n\n",
        record.name,
        record.sys.country,
        main,
        description,
        record.main.temp,
        record.main.feels_like,
        record.main.temp_min,
        record.main.temp_max,
        record.main.humidity,
        record.main.pressure,
        record.wind.speed,
        record.wind.deg,
        sunrise,
        sunset,
    )
}

/// HTML fragment served by the `/weather` route. Times are city-local.
pub fn format_html(record: &WeatherRecord) -> String {
    let (main, description) = condition_parts(record);
    let sunrise = clock_time(record.sys.sunrise, record, ClockStyle::City);
    let sunset = clock_time(record.sys.sunset, record, ClockStyle::City);

    let mut html = String::from("<div class=\"weather\">\n");
    html.push_str(&format!(
        "  <h2>📍 {}, {}</h2>\n",
        escape_html(&record.name),
        escape_html(&record.sys.country)
    ));
    if let Some(coord) = &record.coord {
        html.push_str(&format!(
            "  <p>🧭 Coordinates: {:.4}, {:.4}</p>\n",
            coord.lat, coord.lon
        ));
    }
    html.push_str(&format!(
        "  <p>🌤️ Condition: {} ({})</p>\n",
        escape_html(main),
        escape_html(description)
    ));
    html.push_str(&format!(
        "  <p>🌡️ Temperature: {:.2}°C (Feels like {:.2}°C)</p>\n",
        record.main.temp, record.main.feels_like
    ));
    html.push_str(&format!(
        "  <p>📉 Min/Max: {:.2}°C / {:.2}°C</p>\n",
        record.main.temp_min, record.main.temp_max
    ));
    html.push_str(&format!(
        "  <p>💧 Humidity: {}% | Pressure: {}hPa</p>\n",
        record.main.humidity, record.main.pressure
    ));
    html.push_str(&format!(
        "  <p>🌬️ Wind: {:.2}m/s from {}°</p>\n",
        record.wind.speed, record.wind.deg
    ));
    html.push_str(&format!(
        "  <p>🌅 Sunrise: {sunrise} | 🌇 Sunset: {sunset}</p>\n"
    ));
    html.push_str("</div>\n");
    html
}

/// Single-field line: just the temperature.
pub fn format_brief(record: &WeatherRecord) -> String {
    format!("{}: {:.2}°C\n", record.name, record.main.temp)
}

fn condition_parts(record: &WeatherRecord) -> (&str, &str) {
    record
        .condition()
        .map(|c| (c.main.as_str(), c.description.as_str()))
        .unwrap_or((UNKNOWN, UNKNOWN))
}

/// `HH:MM`, or `--:--` when the timestamp is out of range.
fn clock_time(unix: i64, record: &WeatherRecord, clock: ClockStyle) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp(unix, 0) else {
        return "--:--".to_string();
    };

    match clock {
        ClockStyle::Host => utc.with_timezone(&Local).format("%H:%M").to_string(),
        ClockStyle::City => {
            let offset = record
                .timezone
                .and_then(|secs| i32::try_from(secs).ok())
                .and_then(FixedOffset::east_opt)
                .unwrap_or_else(|| Utc.fix());
            utc.with_timezone(&offset).format("%H:%M").to_string()
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
