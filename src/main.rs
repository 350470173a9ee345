use anyhow::{Context, Result};
use lotfinder::{config::Settings, inventory::Inventory, inventory::InventoryHandle, routes, AppState};
use reqwest::Client;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "lotfinder=info,tower_http=info".into()))
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing lotfinder server...");

    // Load configuration
    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };
    let shared_settings = Arc::new(settings);

    // Generate the catalog off the async workers; it is published once and only read afterwards
    let (size, seed) = (shared_settings.inventory_size, shared_settings.inventory_seed);
    tracing::info!("Generating {} synthetic vehicles (seed: {:?})...", size, seed);
    let inventory = tokio::task::spawn_blocking(move || Inventory::generate(size, seed))
        .await
        .context("Inventory generation task failed")?;
    tracing::info!("Inventory ready.");

    // Shared client for upstream inventory calls; per-request timeouts are set at the call site
    let http_client = Arc::new(
        Client::builder()
            .user_agent(concat!("lotfinder/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build shared reqwest client")?,
    );
    if let Some(upstream) = shared_settings.upstream() {
        tracing::info!("Proxying listing queries to upstream inventory at {}", upstream);
    }

    let app_state = AppState {
        settings: shared_settings.clone(),
        http_client,
        inventory: InventoryHandle::new(inventory),
    };

    let app = routes::create_router(app_state);

    // Parse the server address from settings
    let addr: SocketAddr = match shared_settings.server_address.parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(
                "Invalid server address format in configuration ('{}'): {}",
                shared_settings.server_address,
                e
            );
            return Err(anyhow::anyhow!(
                "Invalid server address format: {}",
                shared_settings.server_address
            ));
        }
    };

    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
