//! Screener CLI — screen, profiles, and synthetic data commands.
//!
//! Commands:
//! - `screen` — run the decision engine over a CSV file or remote CSV export
//! - `profiles` — list risk profiles and their resolved thresholds
//! - `synthetic` — generate a synthetic watchlist CSV for demos

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use screener_core::{CsvFileSource, RemoteCsvSource, TableSource};
use screener_runner::profiles::{resolve, ProfileSet, ThresholdOverrides};
use screener_runner::{export_json, export_table_csv, save_artifacts, top_entries, ScreenResult};

#[derive(Parser)]
#[command(
    name = "screener",
    about = "Equity screener — quality-gated buy/sell decision engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the decision engine over a watchlist and save artifacts.
    Screen {
        /// Path to a CSV file.
        #[arg(long)]
        input: Option<PathBuf>,

        /// URL of a remote CSV export.
        #[arg(long)]
        url: Option<String>,

        /// Risk profile name. Built-ins: conservative, balanced, aggressive.
        #[arg(long, default_value = "balanced")]
        profile: String,

        /// Risk appetite dial, 0 (cautious) to 100 (aggressive).
        #[arg(long, default_value_t = 50)]
        risk: u8,

        /// Override the minimum composite score for buys.
        #[arg(long)]
        score_min: Option<f64>,

        /// Override the drawdown threshold for BUY (e.g. -0.20).
        #[arg(long)]
        dd_buy: Option<f64>,

        /// Override the drawdown threshold for STRONG BUY (e.g. -0.30).
        #[arg(long)]
        dd_strong: Option<f64>,

        /// TOML file with custom profiles (replaces the built-ins).
        #[arg(long)]
        profiles_file: Option<PathBuf>,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Number of entries to show in the summary.
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Print the full result as JSON instead of a summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List risk profiles with their thresholds resolved at a risk level.
    Profiles {
        /// Risk appetite dial, 0 to 100.
        #[arg(long, default_value_t = 50)]
        risk: u8,

        /// TOML file with custom profiles (replaces the built-ins).
        #[arg(long)]
        profiles_file: Option<PathBuf>,
    },
    /// Generate a synthetic watchlist CSV.
    Synthetic {
        /// Number of rows to generate.
        #[arg(long, default_value_t = 50)]
        rows: usize,

        /// RNG seed. Defaults to the current time.
        #[arg(long)]
        seed: Option<u64>,

        /// Output path.
        #[arg(long, default_value = "watchlist.csv")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            input,
            url,
            profile,
            risk,
            score_min,
            dd_buy,
            dd_strong,
            profiles_file,
            output_dir,
            top,
            json,
        } => run_screen_cmd(
            input,
            url,
            &profile,
            risk,
            ThresholdOverrides {
                score_buy_min: score_min,
                dd_buy,
                dd_strong,
            },
            profiles_file,
            &output_dir,
            top,
            json,
        ),
        Commands::Profiles {
            risk,
            profiles_file,
        } => run_profiles_cmd(risk, profiles_file),
        Commands::Synthetic { rows, seed, out } => run_synthetic_cmd(rows, seed, &out),
    }
}

fn load_profiles(path: Option<PathBuf>) -> Result<ProfileSet> {
    Ok(match path {
        Some(p) => ProfileSet::from_toml_file(&p)?,
        None => ProfileSet::builtin(),
    })
}

#[allow(clippy::too_many_arguments)]
fn run_screen_cmd(
    input: Option<PathBuf>,
    url: Option<String>,
    profile_name: &str,
    risk: u8,
    overrides: ThresholdOverrides,
    profiles_file: Option<PathBuf>,
    output_dir: &std::path::Path,
    top: usize,
    json: bool,
) -> Result<()> {
    // Validate mutually exclusive options
    if input.is_some() && url.is_some() {
        bail!("--input and --url are mutually exclusive");
    }
    let source: Box<dyn TableSource> = match (input, url) {
        (Some(path), None) => Box::new(CsvFileSource::new(path)),
        (None, Some(url)) => Box::new(RemoteCsvSource::new(url)),
        _ => bail!("one of --input or --url is required"),
    };

    let profiles = load_profiles(profiles_file)?;
    let profile = profiles.get(profile_name)?;
    let config = resolve(profile, risk, &overrides);

    let result = screener_runner::run_screen(source.as_ref(), &config)?;

    if json {
        println!("{}", export_json(&result)?);
    } else {
        print_summary(&result, top);
    }

    let run_dir = save_artifacts(&result, output_dir)?;
    if !json {
        println!("Artifacts saved to: {}", run_dir.display());
    }

    Ok(())
}

fn run_profiles_cmd(risk: u8, profiles_file: Option<PathBuf>) -> Result<()> {
    let profiles = load_profiles(profiles_file)?;

    println!("Profiles at risk {risk}:");
    println!();
    println!(
        "{:<14} {:>9} {:>8} {:>10} {:<30}",
        "Profile", "Score ≥", "DD Buy", "DD Strong", "Required checks"
    );
    println!("{}", "-".repeat(75));

    for name in profiles.names() {
        let profile = profiles.get(name)?;
        let cfg = resolve(profile, risk, &ThresholdOverrides::default());

        let mut required: Vec<&str> = Vec::new();
        if cfg.require_pass_debt {
            required.push("debt");
        }
        if cfg.require_pass_interest {
            required.push("interest");
        }
        if cfg.require_pass_fcf {
            required.push("fcf");
        }
        if cfg.require_pass_roic {
            required.push("roic");
        }
        if cfg.require_pass_payout {
            required.push("payout");
        }

        println!(
            "{:<14} {:>9.0} {:>7.0}% {:>9.0}% {:<30}",
            name,
            cfg.score_buy_min,
            cfg.dd_buy * 100.0,
            cfg.dd_strong * 100.0,
            required.join(", ")
        );
    }

    Ok(())
}

fn run_synthetic_cmd(rows: usize, seed: Option<u64>, out: &std::path::Path) -> Result<()> {
    let seed = seed.unwrap_or_else(|| chrono::Utc::now().timestamp() as u64);
    let table = screener_core::data::synthetic::synthetic_table(rows, seed);
    let csv = export_table_csv(&table)?;
    std::fs::write(out, csv)?;
    println!("Wrote {rows} rows (seed {seed}) to {}", out.display());
    Ok(())
}

fn print_summary(result: &ScreenResult, top: usize) {
    println!();
    println!("=== Screen Result ===");
    println!("Source:         {}", result.source);
    println!(
        "Generated:      {}",
        result.generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("Rows:           {}", result.row_count);
    println!("Config hash:    {}", result.config_hash);
    println!(
        "Thresholds:     score ≥ {:.0}, dd ≤ {:.0}% (buy) / {:.0}% (strong)",
        result.config.score_buy_min,
        result.config.dd_buy * 100.0,
        result.config.dd_strong * 100.0
    );
    println!();
    println!("--- Actions ---");
    for (action, count) in &result.action_counts {
        println!("{action:<22} {count}");
    }

    let entries = top_entries(&result.table, top);
    if !entries.is_empty() {
        println!();
        println!("--- Top {} ---", entries.len());
        println!(
            "{:<8} {:<20} {:>6} {:>6}  {}",
            "Ticker", "Action", "Score", "DD", "Reason"
        );
        println!("{}", "-".repeat(70));
        for e in &entries {
            let score = e.score.map_or(String::new(), |s| format!("{s:.0}"));
            let dd = e.dd_norm.map_or(String::new(), |d| format!("{:.0}%", d * 100.0));
            println!(
                "{:<8} {:<20} {:>6} {:>6}  {}",
                e.ticker, e.action, score, dd, e.reason
            );
        }
    }
    println!();
}
