//! Marketplace admin CLI
//!
//! Runs schema migrations and prints filtered listings as JSON.
//!
//! ```bash
//! marketplace-admin --config marketplace.yaml migrate
//! marketplace-admin jobs --title driver --city pune --wage-min 1000
//! marketplace-admin workers --sector logistics --rating-min 4
//! ```

// CLI tools are expected to print to stdout
#![allow(clippy::print_stdout)]

mod dto;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use marketplace_service::{
    Config, JobFilter, MarketplaceModule, NewSector, PageRequest, WorkerFilter,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Marketplace admin - migrations and listings
#[derive(Parser)]
#[command(name = "marketplace-admin")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database URL override (takes precedence over file and environment)
    #[arg(long)]
    database_url: Option<String>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// List jobs matching a filter
    Jobs(JobArgs),
    /// List workers matching a filter
    Workers(WorkerArgs),
    /// List applications for a job or by a worker
    Applications(ApplicationArgs),
    /// Manage the sector reference list
    #[command(subcommand)]
    Sectors(SectorCommands),
}

#[derive(Args)]
struct PageArgs {
    /// Maximum rows to return (clamped by max_page_size)
    #[arg(long)]
    limit: Option<u64>,

    /// Rows to skip
    #[arg(long, default_value_t = 0)]
    offset: u64,
}

impl From<&PageArgs> for PageRequest {
    fn from(args: &PageArgs) -> Self {
        PageRequest {
            limit: args.limit,
            offset: args.offset,
        }
    }
}

#[derive(Args)]
struct JobArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    sector: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    wage_min: Option<i64>,
    /// Required gender code (male, female, other)
    #[arg(long)]
    gender: Option<String>,
    /// Jobs starting on or after this date
    #[arg(long)]
    starts_from: Option<String>,
    /// Jobs ending on or before this date
    #[arg(long)]
    ends_by: Option<String>,
    #[command(flatten)]
    page: PageArgs,
}

impl JobArgs {
    fn filter(&self) -> JobFilter {
        JobFilter {
            title: self.title.clone(),
            sector: self.sector.clone(),
            city: self.city.clone(),
            wage_min: self.wage_min,
            gender: self.gender.clone(),
            starts_from: self.starts_from.clone(),
            ends_by: self.ends_by.clone(),
        }
    }
}

#[derive(Args)]
struct WorkerArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    sector: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    rating_min: Option<f64>,
    #[arg(long)]
    gender: Option<String>,
    #[command(flatten)]
    page: PageArgs,
}

impl WorkerArgs {
    fn filter(&self) -> WorkerFilter {
        WorkerFilter {
            name: self.name.clone(),
            sector: self.sector.clone(),
            city: self.city.clone(),
            rating_min: self.rating_min,
            gender: self.gender.clone(),
        }
    }
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ApplicationArgs {
    /// Applications received by this job
    #[arg(long)]
    job: Option<Uuid>,
    /// Applications made by this worker
    #[arg(long)]
    worker: Option<Uuid>,
}

#[derive(Subcommand)]
enum SectorCommands {
    /// List all sectors by name
    List,
    /// Add a sector
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(ref path) = cli.config {
        if !Path::new(path).is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
    }

    // defaults -> YAML (if provided) -> env (MARKETPLACE_*) -> CLI overrides
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = cli.database_url.clone() {
        config.database_url = url;
    }

    let module = MarketplaceModule::init(config).await?;
    tracing::debug!(policy = ?module.config().date_filter_policy, "Marketplace admin ready");

    match &cli.command {
        Commands::Migrate => {
            module.migrate().await?;
            println!("Migrations applied");
            Ok(())
        }
        Commands::Jobs(args) => {
            let jobs = module
                .service()
                .list_jobs(&args.filter(), (&args.page).into())
                .await?;
            let out: Vec<dto::JobDto> = jobs.into_iter().map(Into::into).collect();
            print_json(&out, cli.pretty)
        }
        Commands::Workers(args) => {
            let workers = module
                .service()
                .list_workers(&args.filter(), (&args.page).into())
                .await?;
            let out: Vec<dto::WorkerDto> = workers.into_iter().map(Into::into).collect();
            print_json(&out, cli.pretty)
        }
        Commands::Applications(args) => {
            let service = module.service();
            let applications = match (args.job, args.worker) {
                (Some(job_id), _) => service.applications_for_job(job_id).await?,
                (None, Some(worker_id)) => service.applications_by_worker(worker_id).await?,
                (None, None) => anyhow::bail!("either --job or --worker is required"),
            };
            let out: Vec<dto::ApplicationDto> =
                applications.into_iter().map(Into::into).collect();
            print_json(&out, cli.pretty)
        }
        Commands::Sectors(SectorCommands::List) => {
            let sectors = module.service().list_sectors().await?;
            let out: Vec<dto::SectorDto> = sectors.into_iter().map(Into::into).collect();
            print_json(&out, cli.pretty)
        }
        Commands::Sectors(SectorCommands::Add { name, description }) => {
            let sector = module
                .service()
                .create_sector(NewSector {
                    name: name.clone(),
                    description: description.clone(),
                })
                .await?;
            print_json(&dto::SectorDto::from(sector), cli.pretty)
        }
    }
}

/// `RUST_LOG` wins; otherwise the -v count picks the level
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_job_flags_map_onto_filter() {
        let cli = Cli::try_parse_from([
            "marketplace-admin",
            "jobs",
            "--title",
            "driver",
            "--wage-min",
            "1000",
            "--starts-from",
            "2025-04-01",
            "--limit",
            "10",
        ])
        .unwrap();

        let Commands::Jobs(args) = cli.command else {
            panic!("expected jobs subcommand");
        };
        let filter = args.filter();
        assert_eq!(filter.title.as_deref(), Some("driver"));
        assert_eq!(filter.wage_min, Some(1000));
        assert_eq!(filter.starts_from.as_deref(), Some("2025-04-01"));
        assert_eq!(filter.city, None);

        let page: PageRequest = (&args.page).into();
        assert_eq!(page.limit, Some(10));
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_applications_need_exactly_one_selector() {
        assert!(Cli::try_parse_from(["marketplace-admin", "applications"]).is_err());

        let id = Uuid::new_v4().to_string();
        assert!(Cli::try_parse_from(["marketplace-admin", "applications", "--job", &id]).is_ok());
        assert!(Cli::try_parse_from([
            "marketplace-admin",
            "applications",
            "--job",
            &id,
            "--worker",
            &id
        ])
        .is_err());
    }
}
