use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use schedsync_api::SchedulerApiClient;
use schedsync_core::{load_schedules, ImportTotals};
use schedsync_reconcile::{import_schedules, ImportSession, SchedulerControl};

#[derive(Debug, Parser)]
#[command(name = "schedsync")]
#[command(about = "Reconcile exported schedule definitions against a live scheduler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import schedule definitions from a YAML file.
    Import {
        /// Definition file; defaults to the configured schedules path.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Replace matching live jobs instead of skipping them.
        #[arg(long)]
        overwrite: bool,
    },
    /// List the scheduler's live jobs.
    Jobs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = schedsync_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = SchedulerApiClient::from_config(&config)?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Import { file, overwrite } => {
            let path = file.unwrap_or_else(|| config.schedules_path.clone());
            let schedule_file = load_schedules(&path)?;
            let overwrite = overwrite || config.overwrite_existing;

            let mut session = ImportSession::new();
            let outcomes =
                import_schedules(&client, &mut session, &schedule_file.schedules, overwrite)
                    .await?;

            let totals = ImportTotals::from_outcomes(&outcomes);
            println!("import run {}: {totals}", session.run_id());
            for job_id in session.created_job_ids() {
                println!("  created {job_id}");
            }
            if !totals.is_clean() {
                anyhow::bail!("{} schedule(s) failed to import", totals.failed);
            }
        }
        Commands::Jobs => {
            let jobs = client.list_jobs().await?;
            if jobs.is_empty() {
                println!("no scheduled jobs");
            }
            for job in jobs {
                let next_run = job
                    .next_run
                    .map_or_else(|| "-".to_owned(), |t| t.to_rfc3339());
                println!(
                    "{}  {}  {}  next run {}",
                    job.job_id, job.state, job.job_name, next_run
                );
            }
        }
    }

    Ok(())
}
