use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use salesboard_backend::{Backend, HttpBackend, LocalBackend, VoteChoice};
use salesboard_core::{DashboardQuery, FilterState, Metric, build_view};
use salesboard_ingest::CsvSource;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod account;
mod config;
mod dashboard;
mod loader;
mod report;
mod session;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "salesboard",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SALESBOARD_BUILD_SHA"), ")"),
    about = "Warehouse and retail sales dashboard"
)]
struct Cli {
    /// Debug-level logging for the salesboard crates
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal dashboard over a sales CSV
    Dash {
        /// CSV path or http(s) URL (defaults to the configured source)
        #[arg(long)]
        source: Option<String>,

        /// Start filtered to one item type
        #[arg(long)]
        item_type: Option<String>,

        /// Start filtered to one year
        #[arg(long)]
        year: Option<i32>,

        /// Metric to chart first
        #[arg(long)]
        metric: Option<Metric>,

        /// Chart all three metrics at once
        #[arg(long)]
        all: bool,
    },

    /// One-shot text report of the aggregated months
    Report {
        /// CSV path or http(s) URL (defaults to the configured source)
        #[arg(long)]
        source: Option<String>,

        /// Only this item type
        #[arg(long)]
        item_type: Option<String>,

        /// Only this year
        #[arg(long)]
        year: Option<i32>,

        /// Metric to total
        #[arg(long)]
        metric: Option<Metric>,

        /// Report all three metrics
        #[arg(long)]
        all: bool,
    },

    /// List the item types and years present in a CSV
    Dimensions {
        /// CSV path or http(s) URL (defaults to the configured source)
        #[arg(long)]
        source: Option<String>,
    },

    /// Sign up, sign in, sign out, or show the current user
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Cast or inspect your yay-or-nay vote
    Vote {
        #[command(subcommand)]
        command: VoteCommand,
    },

    /// Manage ~/.salesboard/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    /// Create an account and sign in
    SignUp {
        /// Email to register (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign in with an existing account
    SignIn {
        /// Email to sign in with (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign out and forget the stored session
    SignOut,

    /// Show the signed-in user
    Whoami,
}

#[derive(Subcommand, Debug)]
enum VoteCommand {
    /// Record your vote; the first write wins
    Cast {
        /// yay or nay
        choice: VoteChoice,
    },

    /// Show the vote on record for the signed-in user
    Show,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the active config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Command::Dash {
            source,
            item_type,
            year,
            metric,
            all,
        } => {
            let cfg = config::load_config()?;
            let source = resolve_source(source, &cfg);
            let query = query_from(&cfg, item_type, year, metric, all)?;

            // First load runs in the foreground; the dashboard needs data to start
            let loader = loader::Loader::new(source);
            let dataset = loader::load_dataset(loader.source()).await?;
            dashboard::run_dashboard(loader, dataset, query).await?;
        }

        Command::Report {
            source,
            item_type,
            year,
            metric,
            all,
        } => {
            let cfg = config::load_config()?;
            let source = resolve_source(source, &cfg);
            let query = query_from(&cfg, item_type, year, metric, all)?;

            let dataset = loader::load_dataset(&source).await?;
            let view = build_view(dataset.records(), &query);
            report::print_report(&view, &query.filter, dataset.record_count());
        }

        Command::Dimensions { source } => {
            let cfg = config::load_config()?;
            let source = resolve_source(source, &cfg);

            let dataset = loader::load_dataset(&source).await?;
            report::print_dimensions(dataset.item_types(), dataset.years(), dataset.record_count());
        }

        Command::Auth { command } => {
            let backend = make_backend()?;
            match command {
                AuthCommand::SignUp { email } => account::sign_up(&backend, email).await?,
                AuthCommand::SignIn { email } => account::sign_in(&backend, email).await?,
                AuthCommand::SignOut => account::sign_out(&backend).await?,
                AuthCommand::Whoami => account::whoami()?,
            }
        }

        Command::Vote { command } => {
            let backend = make_backend()?;
            match command {
                VoteCommand::Cast { choice } => account::vote_cast(&backend, choice).await?,
                VoteCommand::Show => account::vote_show(&backend).await?,
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    // RUST_LOG wins when set; otherwise scope the filter to our crates
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => {
            let level = if verbose { "debug" } else { "warn" };
            EnvFilter::new(format!(
                "salesboard_cli={level},salesboard_core={level},salesboard_ingest={level},salesboard_backend={level}"
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_source(arg: Option<String>, cfg: &config::Config) -> CsvSource {
    let raw = arg.unwrap_or_else(|| cfg.data.source.clone());
    CsvSource::from_arg(&raw)
}

fn make_backend() -> Result<Backend> {
    let cfg = config::load_config()?;
    let backend = match cfg.backend.base_url {
        Some(url) if !url.trim().is_empty() => Backend::Http(HttpBackend::new(url)),
        _ => Backend::Local(LocalBackend::new(state::local_backend_root()?)),
    };
    debug!(store = %backend.describe(), "account store selected");
    Ok(backend)
}

fn query_from(
    cfg: &config::Config,
    item_type: Option<String>,
    year: Option<i32>,
    metric: Option<Metric>,
    all: bool,
) -> Result<DashboardQuery> {
    let mut filter = FilterState::new();
    if let Some(item_type) = item_type {
        filter = filter.with_item_type(item_type);
    }
    if let Some(year) = year {
        filter = filter.with_year(year);
    }

    let metric = match metric {
        Some(metric) => metric,
        None => cfg
            .ui
            .metric
            .parse()
            .with_context(|| format!("bad ui.metric in config: {:?}", cfg.ui.metric))?,
    };

    Ok(DashboardQuery::default()
        .with_filter(filter)
        .with_metric(metric)
        .with_show_all(all || cfg.ui.show_all))
}
