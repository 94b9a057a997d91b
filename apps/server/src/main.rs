use anyhow::Context;
use clap::{Parser, Subcommand};
use flatseller_config::{load as load_config, AppConfig};
use flatseller_database::{initialize_database, FlatRepository, HouseRepository};
use flatseller_gateway::{create_router, GatewayState};
use flatseller_runtime::{telemetry, BackendServices};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "flatseller")]
#[command(about = "Flatseller backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Print every house and flat in the database
    DumpData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config().context("failed to load configuration")?;
    telemetry::init_tracing(config.env).context("failed to initialise tracing")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config).await,
        Commands::Migrate => migrate(config).await,
        Commands::DumpData => dump_data(config).await,
    }
}

async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    info!(env = %config.env, "starting flatseller backend");

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = GatewayState::new(services.authenticator, services.flats, services.houses);
    let app = create_router(state, config.http.request_timeout());

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(flatseller_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    services.db_pool.close().await;
    info!("backend shut down");
    Ok(())
}

async fn migrate(config: AppConfig) -> anyhow::Result<()> {
    let pool = initialize_database(&config.database)
        .await
        .context("failed to migrate database")?;
    pool.close().await;

    println!("Migrations applied to {}", config.database.url);
    Ok(())
}

async fn dump_data(config: AppConfig) -> anyhow::Result<()> {
    info!("dumping houses and flats from database");

    let pool = initialize_database(&config.database)
        .await
        .context("failed to open database")?;

    let houses = HouseRepository::new(pool.clone())
        .list_all()
        .await
        .context("failed to fetch houses")?;

    println!("=== HOUSES ===");
    if houses.is_empty() {
        println!("No houses found in database");
    } else {
        println!("Found {} houses:", houses.len());
        println!(
            "{:<6} {:<40} {:<6} {:<25} {:<35}",
            "ID", "Address", "Year", "Developer", "Created At"
        );
        println!("{}", "-".repeat(115));

        for house in houses {
            println!(
                "{:<6} {:<40} {:<6} {:<25} {:<35}",
                house.id,
                house.address,
                house.year,
                house.developer.as_deref().unwrap_or("NULL"),
                house.created_at.to_rfc3339(),
            );
        }
    }

    let flats = FlatRepository::new(pool.clone())
        .list_all()
        .await
        .context("failed to fetch flats")?;

    println!("\n=== FLATS ===");
    if flats.is_empty() {
        println!("No flats found in database");
    } else {
        println!("Found {} flats:", flats.len());
        println!(
            "{:<6} {:<8} {:<8} {:<12} {:<6} {:<12} {:<35}",
            "ID", "House", "Number", "Price", "Rooms", "Status", "Updated At"
        );
        println!("{}", "-".repeat(95));

        for flat in flats {
            println!(
                "{:<6} {:<8} {:<8} {:<12} {:<6} {:<12} {:<35}",
                flat.id,
                flat.house_id,
                flat.flat_number,
                flat.price,
                flat.rooms,
                flat.status.as_str(),
                flat.updated_at.to_rfc3339(),
            );
        }
    }

    pool.close().await;
    Ok(())
}
