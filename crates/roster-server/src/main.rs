//! # Roster Server
//!
//! Main entry point: loads configuration, wires the user store and runs a
//! short demo against it (look up `Bob`, count users, list the first page).

use roster_config::{AppConfig, ConfigLoader};
use roster_core::telemetry::{init_tracing, TelemetryConfig};
use roster_core::RosterResult;
use roster_server::startup::{print_banner, print_startup_info, DEMO_USER_NAME};
use roster_server::{run_demo, AppBuilder};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = ConfigLoader::from_default_location().map(ConfigLoader::into_config);

    // Defaults when the config itself failed to load
    let telemetry = config
        .as_ref()
        .map(|c| c.telemetry.clone())
        .unwrap_or_else(|_| TelemetryConfig::default());
    if let Err(e) = init_tracing(&telemetry) {
        eprintln!("{}", e);
    }

    print_banner();
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let result = match config {
        Ok(config) => run(config).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        error!(code = e.error_code(), "Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> RosterResult<()> {
    let app = AppBuilder::new().with_config(config).build().await?;
    print_startup_info(&app.config().app.environment, &app.pool());

    let service = app.user_service();
    let report = run_demo(service.as_ref()).await;
    app.shutdown().await;
    let report = report?;

    match report.named_user {
        Some(user) => println!("{}", user),
        None => println!("No user named {}", DEMO_USER_NAME),
    }
    println!("Total users: {}", report.total);
    for user in &report.first_page {
        println!("{}", user);
    }

    Ok(())
}
