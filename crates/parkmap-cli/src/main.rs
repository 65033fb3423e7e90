mod inspect;

use clap::{Parser, Subcommand};
use parkmap_core::FacilityKind;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "parkmap-cli")]
#[command(about = "Inspect the park and public-toilet map data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List loaded facilities
    Facilities {
        /// Only list one kind (park or toilet)
        #[arg(long)]
        kind: Option<FacilityKind>,
    },
    /// Show one facility with its feedback, newest first
    Show {
        /// Facility kind (park or toilet)
        kind: FacilityKind,
        /// Facility id as it appears in the extract
        id: String,
    },
    /// Dump normalized feedback records
    Feedback {
        /// Only records for this facility id
        #[arg(long)]
        facility_id: Option<String>,
        /// Only records that match no loaded facility
        #[arg(long)]
        orphans: bool,
    },
    /// Print the deep link and feedback form link for a facility
    Link {
        /// Facility kind (park or toilet)
        kind: FacilityKind,
        /// Facility id
        id: String,
        /// Page URL the deep link is built on
        #[arg(long, env = "PARKMAP_PAGE_URL", default_value = "http://localhost:3000/")]
        page_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = parkmap_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Facilities { kind } => inspect::run_facilities(&config, kind).await,
        Commands::Show { kind, id } => inspect::run_show(&config, kind, &id).await,
        Commands::Feedback {
            facility_id,
            orphans,
        } => inspect::run_feedback(&config, facility_id.as_deref(), orphans).await,
        Commands::Link { kind, id, page_url } => {
            inspect::run_link(&config, kind, &id, &page_url).await
        }
    }
}
