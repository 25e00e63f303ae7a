//! `ghg`: load EPA greenhouse-gas reporting data into SQLite and report on
//! it.
//!
//! # Usage
//!
//! ```text
//! ghg init
//! ghg sync --year 2021
//! ghg report --year 2021
//! ```
//!
//! Without `--year`, `sync` and `report` prompt for one on stdin. Any
//! failure, including an invalid year, exits with status 1.

mod report;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use ghg_core::{Year, store::GhgStore};
use ghg_fetch::EpaClient;
use ghg_store_sqlite::SqliteStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "ghg", version, about = "EPA greenhouse-gas data loader")]
struct Cli {
  /// Path to the TOML configuration file. Missing files are ignored.
  #[arg(short, long, global = true, default_value = "ghg.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create the database and its tables if they do not exist.
  Init,

  /// Fetch one reporting year from the EPA service and load it.
  Sync {
    /// Reporting year, 1970 to 2023.
    #[arg(long)]
    year: Option<String>,
  },

  /// Summarise the loaded emissions and total them by facility, gas and
  /// state.
  Report {
    /// Reporting year, 1970 to 2023.
    #[arg(long)]
    year:  Option<String>,
    /// Number of facility/gas groups to list.
    #[arg(long, default_value_t = 20)]
    limit: usize,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  match cli.command {
    Command::Init => init(&settings).await,
    Command::Sync { year } => sync(&settings, year).await,
    Command::Report { year, limit } => report(&settings, year, limit).await,
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn init(settings: &Settings) -> anyhow::Result<()> {
  let path = &settings.database_path;
  SqliteStore::create(path)
    .await
    .with_context(|| format!("failed to initialise database at {}", path.display()))?;
  println!("Database ready at {}", path.display());
  Ok(())
}

async fn sync(settings: &Settings, year: Option<String>) -> anyhow::Result<()> {
  let year = resolve_year(year)?;
  let store = open_store(settings).await?;
  let client = EpaClient::new(settings.client_config())?;

  let report = ghg_sync::sync(&client, &store, year)
    .await
    .with_context(|| format!("sync of {year} aborted"))?;
  print!("{}", report::sync_report(&report));
  Ok(())
}

async fn report(settings: &Settings, year: Option<String>, limit: usize) -> anyhow::Result<()> {
  let store = open_store(settings).await?;
  store.require_populated().await?;

  println!("Summary of all loaded emissions:");
  print!(
    "{}",
    report::summary("co2e_emission", store.emission_summary(None).await?.as_ref())
  );
  println!("\nSummary of all loaded facilities:");
  print!("{}", report::facility_summary(&store.facility_summary(None).await?));

  let year = resolve_year(year)?;

  let by_gas = store.totals_by_gas(Some(year)).await?;
  println!("\nTotal CO2e by facility and gas, {year}:");
  print!("{}", report::gas_totals(&by_gas, limit));

  let by_state = store.totals_by_state(Some(year)).await?;
  println!("\nTotal CO2e by state, {year}:");
  print!("{}", report::state_chart(&by_state));
  Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

async fn open_store(settings: &Settings) -> anyhow::Result<SqliteStore> {
  let path = &settings.database_path;
  SqliteStore::open(path)
    .await
    .with_context(|| format!("failed to open database at {}", path.display()))
}

/// Validate `--year`, prompting for it when the flag was not given.
fn resolve_year(arg: Option<String>) -> anyhow::Result<Year> {
  let input = match arg {
    Some(year) => year,
    None => prompt_year()?,
  };
  Ok(Year::parse(&input)?)
}

/// Read a year from stdin.
fn prompt_year() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Enter a year: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin()
    .lock()
    .read_line(&mut line)
    .context("failed to read year from stdin")?;
  Ok(line)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolve_year_rejects_out_of_range_and_non_numeric() {
    for input in ["1969", "2024", "abc", ""] {
      assert!(resolve_year(Some(input.into())).is_err(), "{input:?} accepted");
    }
  }

  #[test]
  fn resolve_year_accepts_padded_bounds() {
    assert_eq!(resolve_year(Some(" 2021 ".into())).unwrap().get(), 2021);
    assert_eq!(resolve_year(Some("1970".into())).unwrap().get(), 1970);
    assert_eq!(resolve_year(Some("2023\n".into())).unwrap().get(), 2023);
  }

  #[test]
  fn invalid_year_error_names_the_range() {
    let err = resolve_year(Some("1969".into())).unwrap_err();
    assert_eq!(err.to_string(), "please enter a year between 1970 and 2023 (got 1969)");
  }
}
