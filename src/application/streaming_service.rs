// Streaming dashboard service - Progressive loading of a destination's regions
use crate::application::dashboard_service::{DashboardService, Region, RegionEvent};
use crate::domain::destination::Destination;
use serde::Serialize;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessage {
    /// Sent first: the regions that will be filled in
    Skeleton {
        destination: Destination,
        regions: Vec<Region>,
    },
    Update(RegionEvent),
    Complete {
        applied: usize,
        failed: usize,
        discarded: usize,
        duration_ms: u64,
    },
}

#[derive(Clone)]
pub struct StreamingDashboardService {
    dashboard: DashboardService,
}

impl StreamingDashboardService {
    pub fn new(dashboard: DashboardService) -> Self {
        Self { dashboard }
    }

    /// Select `destination` and stream each region as soon as it is applied
    pub async fn stream_selection(
        &self,
        destination: Destination,
    ) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(16);
        let start_time = Instant::now();

        let skeleton = StreamMessage::Skeleton {
            destination: destination.clone(),
            regions: self.dashboard.regions(),
        };
        let _ = tx.send(skeleton).await;

        let dashboard = self.dashboard.clone();
        tokio::spawn(async move {
            let (event_tx, event_rx) = mpsc::channel::<RegionEvent>(8);

            let forward_tx = tx.clone();
            let forward = tokio::spawn(async move {
                let mut events = ReceiverStream::new(event_rx);
                while let Some(event) = events.next().await {
                    let _ = forward_tx.send(StreamMessage::Update(event)).await;
                }
            });

            let report = dashboard.select_destination(destination, Some(event_tx)).await;
            let _ = forward.await;

            tracing::debug!(
                "Streamed {} region updates for {}",
                report.events.len(),
                report.destination
            );

            let complete = StreamMessage::Complete {
                applied: report.applied(),
                failed: report.failures(),
                discarded: report.discarded(),
                duration_ms: start_time.elapsed().as_millis() as u64,
            };
            let _ = tx.send(complete).await;
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::conditions_api::EndpointVariant;
    use crate::application::dashboard_service::RegionOutcome;
    use crate::application::dashboard_service::tests::{FakeApi, service_with};
    use crate::application::preference_store::MemoryPreferenceStore;
    use crate::domain::chart::ChartKind;
    use std::sync::Arc;

    async fn drain(mut rx: mpsc::Receiver<StreamMessage>) -> Vec<StreamMessage> {
        let mut messages = Vec::new();
        while let Some(msg) = rx.recv().await {
            messages.push(msg);
        }
        messages
    }

    #[tokio::test]
    async fn test_stream_sends_skeleton_updates_and_completion() {
        let api = Arc::new(FakeApi::with_score("Bishop, CA", 6.0));
        let dashboard = service_with(
            api,
            Arc::new(MemoryPreferenceStore::new()),
            EndpointVariant::Legacy,
        );
        let streaming = StreamingDashboardService::new(dashboard);

        let rx = streaming
            .stream_selection(Destination::new("Bishop, CA"))
            .await;
        let messages = drain(rx).await;

        assert_eq!(messages.len(), 6);
        assert!(matches!(
            &messages[0],
            StreamMessage::Skeleton { regions, .. } if regions.len() == 4
        ));
        let updates = messages
            .iter()
            .filter(|m| matches!(m, StreamMessage::Update(e) if e.outcome == RegionOutcome::Applied))
            .count();
        assert_eq!(updates, 4);
        assert!(matches!(
            messages.last(),
            Some(StreamMessage::Complete { applied: 4, failed: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_stream_reports_failure() {
        let api = Arc::new(FakeApi::with_score("Bishop, CA", 6.0));
        let dashboard = service_with(
            api,
            Arc::new(MemoryPreferenceStore::new()),
            EndpointVariant::Combined,
        );
        let streaming = StreamingDashboardService::new(dashboard);

        let rx = streaming.stream_selection(Destination::new("Nowhere")).await;
        let messages = drain(rx).await;

        assert_eq!(messages.len(), 3);
        assert!(matches!(
            messages.last(),
            Some(StreamMessage::Complete { applied: 0, failed: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_combined_skeleton_lists_failure_region() {
        let api = Arc::new(FakeApi::with_score("Bishop, CA", 6.0));
        let dashboard = service_with(
            api,
            Arc::new(MemoryPreferenceStore::new()),
            EndpointVariant::Combined,
        );
        let streaming = StreamingDashboardService::new(dashboard);

        let rx = streaming.stream_selection(Destination::new("Nowhere")).await;
        let messages = drain(rx).await;

        let StreamMessage::Skeleton { regions, .. } = &messages[0] else {
            panic!("expected skeleton first, got {:?}", messages[0]);
        };
        let StreamMessage::Update(failure) = &messages[1] else {
            panic!("expected update, got {:?}", messages[1]);
        };
        assert_eq!(failure.region, Region::AllData);
        assert!(regions.contains(&failure.region));
    }

    #[tokio::test]
    async fn test_legacy_skeleton_has_no_combined_region() {
        let api = Arc::new(FakeApi::with_score("Bishop, CA", 6.0));
        let dashboard = service_with(
            api,
            Arc::new(MemoryPreferenceStore::new()),
            EndpointVariant::Legacy,
        );
        let streaming = StreamingDashboardService::new(dashboard);

        let rx = streaming.stream_selection(Destination::new("Bishop, CA")).await;
        let messages = drain(rx).await;

        let StreamMessage::Skeleton { regions, .. } = &messages[0] else {
            panic!("expected skeleton first, got {:?}", messages[0]);
        };
        assert!(!regions.contains(&Region::AllData));
        for message in &messages[1..messages.len() - 1] {
            let StreamMessage::Update(event) = message else {
                panic!("expected update, got {:?}", message);
            };
            assert!(regions.contains(&event.region));
        }
    }

    #[test]
    fn test_update_message_json_shape() {
        let msg = StreamMessage::Update(RegionEvent {
            generation: 3,
            region: Region::Chart(ChartKind::Humidity),
            outcome: RegionOutcome::Applied,
        });
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "update");
        assert_eq!(value["generation"], 3);
        assert_eq!(value["region"]["chart"], "humidity");
        assert_eq!(value["outcome"], "applied");
    }
}
