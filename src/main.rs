use anyhow::Result;
use clap::{Parser, Subcommand};
use netledger::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[derive(Parser)]
#[command(name = "netledger")]
#[command(about = "Record per-interface traffic deltas into SQLite", long_about = None)]
struct Cli {
    /// SQLite database file (overrides config)
    #[arg(short = 'f', long)]
    db_file: Option<String>,

    /// Comma-separated interface names to include
    #[arg(short = 'i', long)]
    include: Option<String>,

    /// Comma-separated interface names to exclude
    #[arg(short = 'e', long)]
    exclude: Option<String>,

    /// Skip docker-like interfaces (docker*, br-*, veth*)
    #[arg(long)]
    exclude_docker: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record one traffic delta per interface (default when no subcommand)
    Record,
    /// Print recorded traffic summed per period and interface
    Show {
        /// Grouping period: y, m or d
        #[arg(short = 's', long, default_value = "d")]
        mode: String,
        /// Timezone for period bucketing: auto, local or utc
        #[arg(short = 'l', long, default_value = "auto")]
        location: String,
    },
    /// Delete recorded rows for docker-like interfaces and VACUUM
    PruneDocker {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let app_config = config::AppConfig::load()?;

    let db_path = cli.db_file.unwrap_or(app_config.database.path);
    let include = match &cli.include {
        Some(s) => filter::parse_name_list(s),
        None => app_config.filter.include,
    };
    let exclude = match &cli.exclude {
        Some(s) => filter::parse_name_list(s),
        None => app_config.filter.exclude,
    };
    let exclude_docker = cli.exclude_docker || app_config.filter.exclude_docker;
    let name_filter = filter::NameFilter::new(include, exclude, exclude_docker);

    let repo = traffic_repo::TrafficRepo::connect(&db_path).await?;
    repo.init().await?;

    match cli.command {
        None | Some(Commands::Record) => {
            let mut source = counter_source::SysinfoCounters::new();
            recorder::record_run(&repo, &mut source, &name_filter, recorder::now_ms()).await?;
        }
        Some(Commands::Show { mode, location }) => {
            report::show(
                &repo,
                report::Period::parse(&mode),
                report::TimeLocation::parse(&location),
                &name_filter,
            )
            .await?;
        }
        Some(Commands::PruneDocker { yes }) => {
            prune::prune_docker(&repo, yes).await?;
        }
    }

    Ok(())
}
