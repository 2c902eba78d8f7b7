use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use meter_ledger::core::{PeriodKey, Reading};
use meter_ledger::report;
use meter_ledger::store::LedgerStore;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Deserialize)]
#[serde(default)]
struct StorageConfig {
    data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("readings"),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Config {
    storage: StorageConfig,
}

#[derive(Parser)]
#[command(name = "meter-ledger", about = "Track monthly household electricity usage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a meter reading in the current month's ledger
    Record {
        #[arg(long)]
        meter_reading: f64,
        /// Razi's usage share for the interval
        #[arg(long, default_value_t = 0.0)]
        razi: f64,
        /// Zaki's usage share for the interval
        #[arg(long, default_value_t = 0.0)]
        zaki: f64,
        /// Reading date, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Reading time, defaults to now
        #[arg(long)]
        time: Option<NaiveTime>,
    },
    /// List a month's readings and totals
    Show {
        /// Period key such as 2025-06, defaults to the current month
        #[arg(long)]
        period: Option<PeriodKey>,
    },
    /// Close a month by writing its summary report
    Close {
        /// Period key such as 2025-06, defaults to the current month
        #[arg(long)]
        period: Option<PeriodKey>,
    },
}

#[derive(Debug)]
enum CliError {
    InvalidConfig(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

fn load_config(path: &Path) -> Result<Config, CliError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(_) => return Ok(Config::default()),
    };
    toml::from_str(&data).map_err(|e| CliError::InvalidConfig(e.to_string()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg = load_config(Path::new("config.toml"))?;
    let store = LedgerStore::new(cfg.storage.data_dir);

    match cli.command {
        Commands::Record {
            meter_reading,
            razi,
            zaki,
            date,
            time,
        } => {
            let period = PeriodKey::current();
            let mut ledger = store.load(&period)?;
            match ledger.last() {
                Some(previous) => println!("Previous reading: {}", previous.meter_reading),
                None => {
                    println!("No previous reading found. This will be treated as the starting point.")
                }
            }
            let now = Local::now();
            let reading = Reading::new(
                date.unwrap_or_else(|| now.date_naive()),
                time.unwrap_or_else(|| now.time()),
                meter_reading,
                razi,
                zaki,
            )?;
            let difference = ledger.record(reading).difference;
            store.save(&ledger, &period)?;
            println!("Calculated difference: {difference:.2}");
            println!("Reading saved to {}", store.ledger_path(&period).display());
        }
        Commands::Show { period } => {
            let period = period.unwrap_or_else(PeriodKey::current);
            let ledger = store.load(&period)?;
            if ledger.is_empty() {
                println!("No readings recorded for {period}");
                return Ok(());
            }
            for reading in ledger.readings() {
                println!(
                    "{} {} | meter {} | difference {} | razi {} | zaki {}",
                    reading.date,
                    reading.time.format("%H:%M:%S"),
                    reading.meter_reading,
                    reading.difference,
                    reading.razi,
                    reading.zaki,
                );
            }
            println!("Total units used: {:.2}", ledger.total_difference());
            println!("Total Razi units: {:.2}", ledger.total_razi());
            println!("Total Zaki units: {:.2}", ledger.total_zaki());
        }
        Commands::Close { period } => {
            let period = period.unwrap_or_else(PeriodKey::current);
            let ledger = store.load(&period)?;
            if ledger.is_empty() {
                println!("No data to close for {period}");
                return Ok(());
            }
            let path = store.report_path(&period);
            report::generate(&ledger, &period, &path)?;
            println!("{period} closed. Report saved to {}", path.display());
        }
    }

    Ok(())
}
