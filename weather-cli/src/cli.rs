use std::{io, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use cityweather_core::{
    Config, LogReport, Settings, WeatherError,
    batch::{self, log_timestamp},
    provider::source_from_config,
    server,
};
use tracing::info;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a list of cities")]
pub struct Cli {
    /// Defaults to `show` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the weather for every configured city.
    Show,

    /// Write the weather for every configured city to timestamped text and JSON logs.
    Log {
        /// Output directory; overrides the settings file.
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Serve `GET /weather?city=<name>` as HTML.
    Serve {
        /// Listen address, e.g. 0.0.0.0:8080; overrides the settings file.
        #[arg(long)]
        listen: Option<String>,
    },

    /// Print only the temperature for every configured city.
    Brief,

    /// Write a settings file populated with the defaults.
    Init {
        /// Replace an existing settings file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Show) {
            Command::Show => show(&Config::load()?).await,
            Command::Log { dir } => write_logs(&Config::load()?, dir).await,
            Command::Serve { listen } => serve(&Config::load()?, listen).await,
            Command::Brief => {
                let config = Config::load()?;
                let mut stdout = io::stdout().lock();
                batch::brief_report(&config, &mut stdout)
                    .await
                    .context("Failed to write brief report")?;
                Ok(())
            }
            Command::Init { force } => init_settings(force),
        }
    }
}

async fn show(config: &Config) -> anyhow::Result<()> {
    if let Err(err) = config.api_key() {
        println!("{} {err}", err.glyph());
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    batch::console_report(config, &mut stdout).await?;
    Ok(())
}

async fn write_logs(config: &Config, dir: Option<PathBuf>) -> anyhow::Result<()> {
    let bundle = match batch::collect_from_config(config).await {
        Ok(bundle) => bundle,
        Err(err @ WeatherError::MissingApiKey) => {
            println!("{} {err}", err.glyph());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let dir = dir.unwrap_or_else(|| config.log_dir.clone());
    let stamp = log_timestamp(chrono::Local::now());
    let report = bundle.write(&dir, &stamp);

    print_log_report(&report);
    Ok(())
}

fn print_log_report(report: &LogReport) {
    if let Err(err) = &report.dir {
        println!("❌ Error creating log directory: {err}");
    }
    if let Err(err) = &report.text {
        println!("❌ Error writing TXT log: {err}");
    }
    if let Err(err) = &report.json {
        println!("❌ Error writing JSON log: {err}");
    }

    let written: Vec<_> = [&report.text, &report.json]
        .into_iter()
        .filter_map(|r| r.as_ref().ok())
        .collect();

    if !written.is_empty() {
        println!("✅ Weather logs saved to:");
        for path in written {
            println!("   - {}", path.display());
        }
    }
}

async fn serve(config: &Config, listen: Option<String>) -> anyhow::Result<()> {
    let source = source_from_config(config)?;
    let listen = listen.unwrap_or_else(|| config.listen.clone());

    server::serve(&listen, Arc::new(source))
        .await
        .with_context(|| format!("Weather server on {listen} stopped"))
}

fn init_settings(force: bool) -> anyhow::Result<()> {
    let path = Settings::settings_file_path()?;
    if path.exists() && !force {
        anyhow::bail!(
            "Settings file already exists: {}\nHint: pass --force to overwrite it.",
            path.display()
        );
    }

    Settings::defaults().save()?;
    info!(path = %path.display(), "settings file written");
    println!("✅ Settings written to {}", path.display());
    Ok(())
}
