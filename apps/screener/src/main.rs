mod analysis;
mod config;
mod errors;
mod extraction;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analysis::keywords::{AnalyzerConfig, KeywordTables};
use crate::analysis::lemmatizer::build_lemmatizer;
use crate::analysis::ResumeAnalyzer;
use crate::config::Config;
use crate::extraction::FileTextExtractor;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener v{}", env!("CARGO_PKG_VERSION"));

    // Keyword tables: built-in defaults unless a JSON override is configured
    let tables = match &config.keyword_tables_path {
        Some(path) => {
            let tables = KeywordTables::from_json_file(path)?;
            info!("Keyword tables loaded from {}", path.display());
            tables
        }
        None => KeywordTables::default(),
    };
    let analyzer_config = AnalyzerConfig::new(tables)?;

    let lemmatizer = build_lemmatizer(config.lemmatizer);
    info!("Lemmatizer initialized (backend: {})", config.lemmatizer);

    let state = AppState {
        analyzer: Arc::new(ResumeAnalyzer::new(analyzer_config, lemmatizer)),
        extractor: Arc::new(FileTextExtractor),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr} (max upload {} bytes)", config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
