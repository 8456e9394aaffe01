//! DocumentWise Server
//!
//! Backend-for-frontend for the DocumentWise web client. Forwards proposal,
//! document, signature-analysis and chat requests to the DocumentWise API,
//! reshaping its snake_case payloads into the camelCase model the client
//! renders. Every JSON route answers with `{data}` or `{error}`.
//!
//! With `--demo` the server answers from a seeded in-memory store instead, so
//! the front end can be exercised without a backend.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use docwise_client::ApiConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod state;
#[cfg(test)]
mod tests;

use api::{
    handle_chat_history, handle_create_proposal, handle_delete_proposal, handle_extract_html,
    handle_get_proposal, handle_health, handle_list_proposals, handle_page_assets,
    handle_page_html, handle_report_data, handle_report_html, handle_send_chat_message,
    handle_signature_image_url, handle_start_analysis, handle_upload_document,
};
use state::AppState;

/// Command-line arguments for the DocumentWise server
#[derive(Parser, Debug)]
#[command(name = "docwise-api")]
#[command(about = "DocumentWise backend-for-frontend server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// TOML configuration file; environment variables override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serve the seeded in-memory store instead of proxying
    #[arg(long)]
    demo: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.max_upload_bytes;
    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // Proposals
        .route(
            "/api/proposals",
            get(handle_list_proposals).post(handle_create_proposal),
        )
        .route(
            "/api/proposals/:id",
            get(handle_get_proposal).delete(handle_delete_proposal),
        )
        .route(
            "/api/proposals/:id/documents",
            post(handle_upload_document).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Signature analysis
        .route(
            "/api/proposals/:id/signature-analysis/start",
            post(handle_start_analysis),
        )
        .route(
            "/api/proposals/:id/signature-analysis/report",
            get(handle_report_html),
        )
        .route(
            "/api/proposals/:id/signature-analysis/report-data",
            get(handle_report_data),
        )
        .route(
            "/api/proposals/:pid/signatures/:sid/image-url",
            get(handle_signature_image_url),
        )
        // Pages
        .route(
            "/api/proposals/:pid/documents/:did/pages/:n/extract-html",
            post(handle_extract_html),
        )
        .route(
            "/api/proposals/:pid/documents/:did/pages/:n/html",
            get(handle_page_html),
        )
        .route(
            "/api/proposals/:pid/documents/:did/pages/:n/assets",
            get(handle_page_assets),
        )
        // Chat
        .route("/api/chat/:session/history", get(handle_chat_history))
        .route("/api/chat/:session/message", post(handle_send_chat_message))
        .with_state(state)
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ApiConfig> {
    let config = match path {
        Some(path) => ApiConfig::from_file(path)?,
        None => ApiConfig::default(),
    };
    Ok(config.with_overrides(|key| std::env::var(key).ok()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive(log_level.into())
                .add_directive("tower_http=debug".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(args.config.as_ref())?;
    let state = if args.demo {
        AppState::demo().with_max_upload_bytes(config.max_upload_bytes)
    } else {
        AppState::proxy(&config)?
    };
    info!(max_upload_bytes = state.max_upload_bytes, "Upload limit configured");

    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("DocumentWise server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
