//! Batch reporting over a list of cities: console, brief and log-file modes.
//!
//! Cities are processed strictly in order; a failure for one city is
//! reported and never stops the ones after it.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::{
    config::Config,
    error::{LogWriteError, WeatherError},
    format::{ClockStyle, format_brief, format_text},
    model::WeatherRecord,
    provider::{OpenWeatherClient, WeatherSource, source_from_config},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn tally<T>(&mut self, result: &Result<T, WeatherError>) {
        match result {
            Ok(_) => self.succeeded += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Print each city's block to `out` as soon as it arrives.
pub async fn run_console<S, W>(
    source: &S,
    cities: &[String],
    clock: ClockStyle,
    out: &mut W,
) -> io::Result<BatchSummary>
where
    S: WeatherSource + ?Sized,
    W: Write,
{
    let mut summary = BatchSummary::default();

    for city in cities {
        let result = source.fetch(city).await;
        summary.tally(&result);

        match result {
            Ok(record) => write!(out, "\n{}", format_text(&record, clock))?,
            Err(err) => writeln!(out, "{} {err}", err.glyph())?,
        }
    }

    info!(succeeded = summary.succeeded, failed = summary.failed, "console report finished");
    Ok(summary)
}

/// Console mode from configuration: refuses to start without an API key.
pub async fn console_report<W: Write>(config: &Config, out: &mut W) -> anyhow::Result<BatchSummary> {
    let client = source_from_config(config)?;
    let summary = run_console(&client, &config.cities, ClockStyle::Host, out)
        .await
        .context("Failed to write console report")?;
    Ok(summary)
}

/// One line per city with the temperature only.
pub async fn run_brief<S, W>(source: &S, cities: &[String], out: &mut W) -> io::Result<BatchSummary>
where
    S: WeatherSource + ?Sized,
    W: Write,
{
    let mut summary = BatchSummary::default();

    for city in cities {
        let result = source.fetch(city).await;
        summary.tally(&result);

        match result {
            Ok(record) => out.write_all(format_brief(&record).as_bytes())?,
            Err(err) => writeln!(out, "{} {err}", err.glyph())?,
        }
    }

    Ok(summary)
}

/// Brief mode from configuration. A missing key is not fatal here: the
/// requests go out with an empty `appid` and upstream rejects them.
pub async fn brief_report<W: Write>(config: &Config, out: &mut W) -> io::Result<BatchSummary> {
    if !config.has_api_key() {
        warn!("no API key configured; sending requests without one");
    }

    let client = OpenWeatherClient::new(
        config.api_key_or_empty().to_owned(),
        config.base_url.clone(),
    );
    run_brief(&client, &config.cities, out).await
}

/// Text and records accumulated over one log-mode run.
#[derive(Debug, Clone, Default)]
pub struct LogBundle {
    text: String,
    records: Vec<WeatherRecord>,
}

impl LogBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch every city in order and accumulate the outcome.
    pub async fn collect<S>(source: &S, cities: &[String]) -> Self
    where
        S: WeatherSource + ?Sized,
    {
        let mut bundle = Self::new();
        for city in cities {
            bundle.push(source.fetch(city).await);
        }
        bundle
    }

    /// Successes go to both the text and the records; failures only leave a
    /// warning line in the text.
    pub fn push(&mut self, result: Result<WeatherRecord, WeatherError>) {
        match result {
            Ok(record) => {
                self.text.push_str(&format_text(&record, ClockStyle::City));
                self.records.push(record);
            }
            Err(err) => {
                self.text.push_str(&format!("⚠️ {err}\n\n"));
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    /// Flush to `<dir>/weather_log_<stamp>.{txt,json}`.
    ///
    /// Directory creation, the text write and the JSON write are attempted
    /// independently; each outcome is returned in the report.
    pub fn write(&self, dir: &Path, stamp: &str) -> LogReport {
        let files = LogFiles::new(dir, stamp);

        let dir_result = ensure_dir(dir).map_err(|source| LogWriteError::Io {
            path: dir.to_path_buf(),
            source,
        });

        let text_result = write_file(&files.text, self.text.as_bytes()).map(|()| files.text.clone());

        let json_result = serde_json::to_vec_pretty(&self.records)
            .map_err(LogWriteError::from)
            .and_then(|json| write_file(&files.json, &json))
            .map(|()| files.json.clone());

        let report = LogReport {
            dir: dir_result,
            text: text_result,
            json: json_result,
        };
        info!(
            records = self.records.len(),
            text_ok = report.text.is_ok(),
            json_ok = report.json.is_ok(),
            "weather log flushed"
        );
        report
    }
}

/// Outcome of each step of [`LogBundle::write`].
#[derive(Debug)]
pub struct LogReport {
    pub dir: Result<(), LogWriteError>,
    pub text: Result<PathBuf, LogWriteError>,
    pub json: Result<PathBuf, LogWriteError>,
}

/// The pair of file names one run writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFiles {
    pub text: PathBuf,
    pub json: PathBuf,
}

impl LogFiles {
    pub fn new(dir: &Path, stamp: &str) -> Self {
        Self {
            text: dir.join(format!("weather_log_{stamp}.txt")),
            json: dir.join(format!("weather_log_{stamp}.json")),
        }
    }
}

/// `YYYY-MM-DD_HH-MM-SS`, safe to use in file names.
pub fn log_timestamp(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// Log mode from configuration: refuses to start without an API key.
pub async fn collect_from_config(config: &Config) -> Result<LogBundle, WeatherError> {
    let client = source_from_config(config)?;
    Ok(LogBundle::collect(&client, &config.cities).await)
}

fn ensure_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), LogWriteError> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    options
        .open(path)
        .and_then(|mut file| file.write_all(contents))
        .map_err(|source| LogWriteError::Io {
            path: path.to_path_buf(),
            source,
        })
}
