// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::application::dashboard_service::{DashboardService, WidgetSettings};
use crate::application::fullscreen_service::FullscreenService;
use crate::application::preference_store::{
    DestinationPreference, MemoryPreferenceStore, PreferenceStore,
};
use crate::application::streaming_service::StreamingDashboardService;
use crate::domain::destination::Destination;
use crate::domain::document::Document;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::file_preference_store::FilePreferenceStore;
use crate::infrastructure::http_conditions_api::HttpConditionsApi;
use crate::infrastructure::page_renderer::PageRenderer;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard_state, health_check, index, refresh, resize_viewport, select_destination,
    stream_dashboard, toggle_fullscreen,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "climbing_conditions_dashboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = load_dashboard_config().context("Failed to load dashboard configuration")?;

    // Create adapters (infrastructure layer)
    let api = Arc::new(
        HttpConditionsApi::new(
            &config.upstream.base_url,
            Duration::from_secs(config.upstream.timeout_secs),
        )
        .context("Failed to build upstream client")?,
    );
    let store: Arc<dyn PreferenceStore> = if config.preferences.path.is_empty() {
        Arc::new(MemoryPreferenceStore::new())
    } else {
        Arc::new(FilePreferenceStore::open(&config.preferences.path))
    };

    // Create services (application layer)
    let preference = DestinationPreference::new(
        store,
        Destination::new(config.widget.default_destination.as_str()),
    );
    let document = Arc::new(RwLock::new(Document::dashboard(config.widget.viewport_width)));
    let settings = WidgetSettings {
        variant: config.upstream.variant,
        tz_offset_minutes: config.upstream.tz_offset_minutes,
        submit_link_template: config.widget.submit_link_template.clone(),
    };
    let dashboard_service = DashboardService::new(api, preference, document.clone(), settings);
    let streaming_service = StreamingDashboardService::new(dashboard_service.clone());
    let fullscreen_service = FullscreenService::new(document);

    // Page load
    let bootstrap = dashboard_service.clone();
    tokio::spawn(async move {
        let report = bootstrap.bootstrap().await;
        tracing::info!(
            "Initial render of {}: {} applied, {} failed",
            report.destination,
            report.applied(),
            report.failures()
        );
    });

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        streaming_service,
        fullscreen_service,
        renderer: Arc::new(PageRenderer::new(config.widget.catalog.clone())),
    });

    // Build router (presentation layer)
    // Compression is handled in the response builders, so no CompressionLayer
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(index))
        .route("/select", get(select_destination))
        .route("/refresh", get(refresh))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/dashboard/state", get(dashboard_state))
        .route("/fullscreen/:container", post(toggle_fullscreen))
        .route("/viewport", post(resize_viewport))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!(
        "Starting climbing-conditions dashboard on {} (upstream {}, {:?} endpoints)",
        addr,
        config.upstream.base_url,
        config.upstream.variant
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
