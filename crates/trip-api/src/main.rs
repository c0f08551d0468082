//! # Pawtrip
//!
//! Storefront API for pet-friendly experiences, classes and trips.
//!
//! ## Usage
//!
//! ```bash
//! # Optional: point at a catalog file (defaults to config/products.toml)
//! export CATALOG_PATH=config/products.toml
//!
//! # Run the server
//! pawtrip
//! ```

use tracing::{info, Level};
use trip_api::{routes, state::AppState};
use trip_core::ProductSource;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Products loaded: {} (source: {})",
        state.products.list_products().await?.len(),
        state.products.source_name()
    );

    let app = routes::create_router(state);

    info!("🐾 Pawtrip starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("🗺️  Catalog: GET http://{}/api/v1/products", addr);
        info!("💶 Quote: POST http://{}/api/v1/quote", addr);
        info!("🧾 Checkout: POST http://{}/api/v1/checkout", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  🐾 Pawtrip 🐾
  ━━━━━━━━━━━━━━━━━━━━━━━
  Pet-friendly booking storefront
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
