use clap::{Parser, Subcommand};
use lookup::render::{render, Format};
use lookup::{oneshot, Report};
use lookup_core::config::Config;
use lookup_core::Parity;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lookup", about = "Search duty rosters, class schedules and default device credentials")]
struct Cli {
    #[command(subcommand)]
    command: Option<Cmd>,

    /// Config file (default: ~/.config/lookup/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write debug logs to /tmp/lookup-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Base URL that relative dataset locations are resolved against.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[arg(long, global = true)]
    credentials_url: Option<String>,

    #[arg(long, global = true)]
    roster_url: Option<String>,

    #[arg(long, global = true)]
    schedule_url: Option<String>,

    /// Output format for one-shot searches.
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Subcommand)]
enum Cmd {
    /// Start the interactive TUI (the default).
    Tui,
    /// Search default credentials by brand, model, type or description.
    Credentials {
        /// Keywords; all must match.
        query: Vec<String>,
    },
    /// Look up a student by name, or who is on duty on a weekday (星期一 … 星期日).
    Roster { query: String },
    /// Print the timetable.
    Schedule {
        /// odd / even (or 单周 / 双周); defaults to the configured parity.
        #[arg(long, value_parser = parse_parity)]
        parity: Option<Parity>,
    },
}

fn parse_parity(raw: &str) -> Result<Parity, String> {
    Parity::parse(raw).ok_or_else(|| format!("unknown parity '{raw}' (expected odd or even)"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/lookup-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("lookup debug log started, tail -f /tmp/lookup-debug.log");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "config unavailable, using defaults");
            Config::defaults()
        }),
    };
    apply_overrides(&mut config, &cli);

    let report = match cli.command.unwrap_or(Cmd::Tui) {
        Cmd::Tui => return lookup_tui::run(config),
        Cmd::Credentials { query } => {
            block_on(oneshot::credentials(&config.datasets, &query.join(" ")))?
        }
        Cmd::Roster { query } => block_on(oneshot::roster(&config.datasets, &query))?,
        Cmd::Schedule { parity } => {
            let parity = parity.unwrap_or_else(|| config.ui.parity());
            block_on(oneshot::schedule(&config.datasets, parity))?
        }
    };

    finish(&report, cli.format)
}

fn block_on<F: Future>(fut: F) -> anyhow::Result<F::Output> {
    Ok(tokio::runtime::Runtime::new()?.block_on(fut))
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    let datasets = &mut config.datasets;
    for (slot, value) in [
        (&mut datasets.base_url, &cli.base_url),
        (&mut datasets.credentials, &cli.credentials_url),
        (&mut datasets.roster, &cli.roster_url),
        (&mut datasets.schedule, &cli.schedule_url),
    ] {
        if let Some(value) = value {
            *slot = value.clone();
        }
    }
}

fn finish(report: &Report, format: Format) -> anyhow::Result<()> {
    let outcome = report.outcome();
    let rendered = render(report, format);
    if outcome == oneshot::Outcome::Found || format == Format::Json {
        print!("{rendered}");
    } else {
        eprint!("{rendered}");
    }
    std::io::stdout().flush()?;
    std::process::exit(outcome.exit_code());
}
