use std::path::Path;

use axum::Router;
use configs::AppConfig;
use service::{file::submission_store::SubmissionFileStore, submissions::SubmissionService};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the submission store named by `cfg` and build the router over it.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let data_file = Path::new(&cfg.storage.data_file);
    common::env::check_data_file(data_file).await;

    let store = SubmissionFileStore::new(data_file).await?;
    info!(data_file = %store.path().display(), "submission store ready");

    let state = AppState::new(SubmissionService::new(store));
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "starting submission server");
    axum::serve(listener, app).await?;
    Ok(())
}
