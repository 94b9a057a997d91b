use anyhow::{Context, Result};
use flatseller_auth::Authenticator;
use flatseller_config::AppConfig;
use flatseller_database::{initialize_database, FlatRepository, HouseRepository, UserRepository};
use flatseller_housing::{FlatService, HouseService};
use sqlx::SqlitePool;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use flatseller_config::DeployEnv;
    use tracing_subscriber::EnvFilter;

    /// Level used when `RUST_LOG` is unset.
    pub fn default_directive(env: DeployEnv) -> &'static str {
        match env {
            DeployEnv::Local | DeployEnv::Dev => "debug,sqlx=warn",
            DeployEnv::Prod => "info",
        }
    }

    /// Install the global subscriber: human readable output locally, JSON
    /// lines in dev and prod.
    pub fn init_tracing(env: DeployEnv) -> Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(env)));

        let installed = match env {
            DeployEnv::Local => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(env_filter)
                .try_init(),
            DeployEnv::Dev | DeployEnv::Prod => tracing_subscriber::fmt()
                .json()
                .with_current_span(true)
                .with_env_filter(env_filter)
                .try_init(),
        };

        installed.map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub authenticator: Authenticator,
    pub flats: FlatService,
    pub houses: HouseService,
}

impl BackendServices {
    /// Validate the configuration, open the store, apply migrations and wire
    /// the services on top of it.
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        config.validate().context("invalid configuration")?;

        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        let authenticator = Authenticator::new(UserRepository::new(db_pool.clone()), &config.auth)
            .context("failed to build authenticator")?;
        let flats = FlatService::new(FlatRepository::new(db_pool.clone()));
        let houses = HouseService::new(
            HouseRepository::new(db_pool.clone()),
            FlatRepository::new(db_pool.clone()),
        );

        info!(
            env = %config.env,
            database = %config.database.url,
            token_ttl_seconds = config.auth.token_ttl_seconds,
            "backend services ready"
        );

        Ok(Self {
            db_pool,
            authenticator,
            flats,
            houses,
        })
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(?error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(?error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
