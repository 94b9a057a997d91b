use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use flatseller_config::{AppConfig, DeployEnv};
use flatseller_runtime::{self, telemetry, BackendServices};
use tempfile::TempDir;
use tokio::time::{sleep, timeout};

fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}", path.to_string_lossy())
}

fn build_config(database_url: String, max_connections: u32) -> AppConfig {
    let mut config = AppConfig::default();
    config.database.url = database_url;
    config.database.max_connections = max_connections;
    config.auth.token_secret = "runtime-test-secret".into();
    config.auth.password_hashing.memory_kib = 1024;
    config.auth.password_hashing.iterations = 1;
    config
}

async fn initialise(config: &AppConfig) -> Result<BackendServices> {
    BackendServices::initialise(config)
        .await
        .context("failed to initialise backend services")
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_runs_migrations_and_wires_services() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("runtime/init.db");
    let config = build_config(sqlite_url(&db_path), 4);

    let services = initialise(&config).await?;
    let table: String = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'flats'",
    )
    .fetch_one(&services.db_pool)
    .await?;
    assert_eq!("flats", table);
    assert!(db_path.exists());

    let admin = services
        .authenticator
        .register_new_user("admin@example.com", "pw", "admin")
        .await?;
    let token = services.authenticator.login(&admin, "pw").await?;
    assert!(services.authenticator.authenticate_token(&token)?.is_admin());

    let house = services.houses.save_house("Main st 1", 2020, None).await?;
    let flat = services.flats.save_flat(house.id, 100, 1).await?;
    assert_eq!(flat.flat_number, 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_rejects_missing_token_secret() -> Result<()> {
    let mut config = build_config("sqlite::memory:".into(), 1);
    config.auth.token_secret.clear();

    let error = match BackendServices::initialise(&config).await {
        Ok(_) => panic!("expected initialisation to fail without a token secret"),
        Err(error) => error,
    };
    let message = format!("{error:#}");
    assert!(message.contains("token_secret"), "unexpected error: {message}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_reports_unreachable_database() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let blocker = temp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file")?;
    let config = build_config(sqlite_url(&blocker.join("db.sqlite")), 1);

    let error = match BackendServices::initialise(&config).await {
        Ok(_) => panic!("expected initialisation to fail"),
        Err(error) => error,
    };
    assert!(format!("{error:#}").contains("failed to initialise database"));
    Ok(())
}

#[test]
fn telemetry_levels_follow_deploy_env() {
    assert!(telemetry::default_directive(DeployEnv::Local).starts_with("debug"));
    assert!(telemetry::default_directive(DeployEnv::Dev).starts_with("debug"));
    assert_eq!(telemetry::default_directive(DeployEnv::Prod), "info");
}

#[test]
fn telemetry_init_tracing_sets_global_subscriber() {
    telemetry::init_tracing(DeployEnv::Prod).expect("first initialisation should succeed");

    let second = telemetry::init_tracing(DeployEnv::Local);
    assert!(
        second.is_err(),
        "initialising telemetry twice should fail with global subscriber already set"
    );
}

#[tokio::test(flavor = "multi_thread")]
#[cfg_attr(not(unix), ignore = "requires Unix signal handling")]
async fn shutdown_signal_completes_on_sigterm() -> Result<()> {
    let shutdown_task = tokio::spawn(async { flatseller_runtime::shutdown_signal().await });

    sleep(Duration::from_millis(50)).await;
    #[cfg(unix)]
    unsafe {
        libc::raise(libc::SIGTERM);
    }

    timeout(Duration::from_secs(2), shutdown_task).await??;
    Ok(())
}
