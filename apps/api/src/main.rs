mod calculator;
mod catalogue;
mod config;
mod errors;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::calculator::CataloguePriceResolver;
use crate::catalogue::default_catalogue;
use crate::config::Config;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Fence API v{}", env!("CARGO_PKG_VERSION"));

    // Static product catalogue
    let catalogue = default_catalogue();
    info!(
        panels = catalogue.standard_panels.len(),
        gate_panels = catalogue.gate_panels.len(),
        posts = catalogue.posts.len(),
        "Catalogue loaded"
    );

    // Price resolver (catalogue prices; a live storefront resolver plugs in here)
    let price_resolver = Arc::new(CataloguePriceResolver::new(catalogue));

    let state = AppState::new(&config, catalogue, price_resolver);
    info!(
        post_width = state.default_settings.post_width,
        max_gap_width = state.default_settings.max_gap_width,
        include_posts = state.default_settings.include_posts,
        "Default calculator settings"
    );

    // CORS (any origin unless CORS_ALLOWED_ORIGINS is set)
    let cors = cors_layer(&config.cors_allowed_origins)?;
    info!(origins = ?config.cors_allowed_origins, "CORS configured");

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
