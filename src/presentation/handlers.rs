// HTTP request handlers
use crate::application::dashboard_service::RefreshReport;
use crate::application::fullscreen_service::FullscreenChange;
use crate::domain::destination::Destination;
use crate::domain::document::Document;
use crate::infrastructure::chunked_updates::stream_from_receiver;
use crate::infrastructure::html_response::{accepts_brotli, html_response};
use crate::presentation::app_state::AppState;
use crate::presentation::errors::AppError;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct DestinationQuery {
    pub destination: Option<String>,
}

impl DestinationQuery {
    fn require(self) -> Result<Destination, AppError> {
        match self.destination {
            Some(name) if !name.trim().is_empty() => Ok(Destination::new(name)),
            _ => Err(AppError::BadRequest("destination is required".to_string())),
        }
    }
}

#[derive(Deserialize)]
pub struct ViewportQuery {
    pub width: u32,
}

#[derive(Serialize)]
pub struct FullscreenResponse {
    pub container: String,
    pub change: FullscreenChange,
}

#[derive(Serialize)]
pub struct ViewportResponse {
    pub width: u32,
    pub cards_fit: bool,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// The dashboard page as currently rendered
pub async fn index(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let selected = state.dashboard_service.current_destination();
    let html = {
        let document = state.dashboard_service.document();
        let doc = document.read().await;
        state.renderer.render(&doc, &selected)?
    };

    Ok(html_response(html, accepts_brotli(&headers)).await?)
}

/// Menu click: select a destination, wait for it to render, back to the page
pub async fn select_destination(
    Query(query): Query<DestinationQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Redirect, AppError> {
    let destination = query.require()?;
    let report = state
        .dashboard_service
        .select_destination(destination, None)
        .await;
    tracing::info!(
        "Selected {}: {} applied, {} failed",
        report.destination,
        report.applied(),
        report.failures()
    );
    Ok(Redirect::to("/"))
}

/// Refetch the current destination
pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<RefreshReport> {
    let destination = state.dashboard_service.current_destination();
    Json(state.dashboard_service.refresh(&destination, None).await)
}

/// Select a destination and stream region updates (progressive loading)
pub async fn stream_dashboard(
    Query(query): Query<DestinationQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let destination = query.require()?;
    let rx = state.streaming_service.stream_selection(destination).await;
    Ok(stream_from_receiver(rx))
}

pub async fn dashboard_state(State(state): State<Arc<AppState>>) -> Json<Document> {
    let document = state.dashboard_service.document();
    let doc = document.read().await;
    Json(doc.clone())
}

pub async fn toggle_fullscreen(
    Path(container): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<FullscreenResponse>, AppError> {
    let toggled = state.fullscreen_service.toggle(&container).await;
    match toggled {
        Some(toggle) => Ok(Json(FullscreenResponse {
            container,
            change: toggle.change,
        })),
        None => Err(AppError::NotFound(format!("no container {}", container))),
    }
}

/// Window resize
pub async fn resize_viewport(
    Query(query): Query<ViewportQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<ViewportResponse> {
    let document = state.dashboard_service.document();
    let mut doc = document.write().await;
    doc.resize_viewport(query.width);
    Json(ViewportResponse {
        width: doc.viewport_width(),
        cards_fit: doc.strip_layout().fits,
    })
}
