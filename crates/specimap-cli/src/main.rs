use clap::{Args, Parser, Subcommand};
use specimap_core::{Coordinate, DisplayOptions, SearchDescriptor, DEFAULT_COORDINATE};
use specimap_inat::InatClient;

#[derive(Debug, Parser)]
#[command(name = "specimap-cli")]
#[command(about = "Specimap command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one aggregation cycle and print the result bundle as JSON.
    Search(SearchArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Specimen (taxon) name to search for.
    #[arg(long)]
    specimen: String,

    /// Latitude of the search center; defaults to the map's home point.
    #[arg(long)]
    lat: Option<f64>,

    /// Longitude of the search center; defaults to the map's home point.
    #[arg(long)]
    lng: Option<f64>,

    /// Search radius in kilometers.
    #[arg(long, default_value_t = 75.0)]
    radius: f64,

    /// Maximum number of observations to admit (1-30).
    #[arg(long, default_value_t = 20)]
    amount: u32,

    /// Comma-joined quality grades to admit.
    #[arg(long, default_value = "needs_id,research,casual")]
    grades: String,

    /// Lower observation-date bound, YYYY-MM-DD. Empty means no bound.
    #[arg(long, default_value = "")]
    since: String,

    /// Upper observation-date bound, YYYY-MM-DD. Empty means no bound.
    #[arg(long, default_value = "")]
    before: String,

    /// Override the upstream API base URL.
    #[arg(long, env = "SPECIMAP_INAT_BASE_URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search(args) => search(args).await,
    }
}

async fn search(args: SearchArgs) -> anyhow::Result<()> {
    let client = match args.base_url.as_deref() {
        Some(base) => InatClient::with_base_url(30, base)?,
        None => InatClient::new(30)?,
    };

    let descriptor = SearchDescriptor {
        specimen_name: args.specimen,
        coordinate: match (args.lat, args.lng) {
            (Some(lat), Some(lng)) => Coordinate { lat, lng },
            _ => DEFAULT_COORDINATE,
        },
        options: DisplayOptions {
            radius_km: args.radius,
            display_amount: args.amount,
            since_date: args.since,
            before_date: args.before,
            grade_type: args.grades,
            use_current_location: false,
        },
    };

    let bundle = client.fetch_specimen_observations(&descriptor).await?;
    tracing::info!(
        observations = bundle.observations.len(),
        "aggregation cycle complete"
    );
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}
