// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::fullscreen_service::FullscreenService;
use crate::application::streaming_service::StreamingDashboardService;
use crate::infrastructure::page_renderer::PageRenderer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub streaming_service: StreamingDashboardService,
    pub fullscreen_service: FullscreenService,
    pub renderer: Arc<PageRenderer>,
}
