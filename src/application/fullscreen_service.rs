// Fullscreen service - Toggle a chart container in and out of fullscreen
use crate::domain::chart::ChartKind;
use crate::domain::document::Document;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Time the viewport needs to settle before the chart is resized
pub const RESIZE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FullscreenChange {
    Entered,
    Exited,
}

pub struct FullscreenToggle {
    pub change: FullscreenChange,
    /// Completes once the delayed chart resize has run
    pub resize: JoinHandle<()>,
}

#[derive(Clone)]
pub struct FullscreenService {
    document: Arc<RwLock<Document>>,
}

impl FullscreenService {
    pub fn new(document: Arc<RwLock<Document>>) -> Self {
        Self { document }
    }

    /// Enter fullscreen on `container_id` unless something is already
    /// fullscreen, in which case exit. Returns `None` when the container is
    /// not on the page.
    pub async fn toggle(&self, container_id: &str) -> Option<FullscreenToggle> {
        let change = {
            let mut doc = self.document.write().await;
            if !doc.contains(container_id) {
                tracing::debug!("No fullscreen container {}", container_id);
                return None;
            }
            if doc.fullscreen_element().is_none() {
                doc.set_fullscreen(Some(container_id.to_string()));
                FullscreenChange::Entered
            } else {
                doc.set_fullscreen(None);
                FullscreenChange::Exited
            }
        };

        let document = self.document.clone();
        let graph_id = ChartKind::from_container_id(container_id).map(|k| k.graph_id());
        let resize = tokio::spawn(async move {
            tokio::time::sleep(RESIZE_DELAY).await;
            if let Some(graph_id) = graph_id {
                document.write().await.resize_chart(graph_id);
            }
        });

        Some(FullscreenToggle { change, resize })
    }
}
