// Dashboard service - Destination selection and the fetch-and-render cycle
use crate::application::conditions_api::{ConditionsApi, EndpointVariant};
use crate::application::preference_store::DestinationPreference;
use crate::domain::chart::{ChartKind, ChartSpec, PlotConfig};
use crate::domain::conditions::ConditionsSnapshot;
use crate::domain::destination::Destination;
use crate::domain::document::{Document, ids};
use crate::domain::fixed::to_fixed;
use crate::domain::forecast::{CardOptions, build_cards};
use crate::domain::palette::{
    ccs_band, degrees_to_cardinal, dew_point_warning, humidity_band, temperature_band,
};
use crate::infrastructure::config::{prepare_query, resolve_tz_offset};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{RwLock, mpsc};

#[derive(Debug, Clone)]
pub struct WidgetSettings {
    pub variant: EndpointVariant,
    /// Fixed offset for `/all_data`; read from the host on every fetch when unset
    pub tz_offset_minutes: Option<i32>,
    /// Link target with a `${destination}` placeholder
    pub submit_link_template: String,
}

/// Part of the page a single upstream call feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// The combined `/all_data` call, before it is split into regions
    AllData,
    Conditions,
    Chart(ChartKind),
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::AllData => f.write_str("all data"),
            Region::Conditions => f.write_str("climbing conditions"),
            Region::Chart(kind) => write!(f, "{}", kind.graph_id()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum RegionOutcome {
    Applied,
    Failed { error: String },
    /// A newer selection started before this result arrived
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionEvent {
    pub generation: u64,
    pub region: Region,
    #[serde(flatten)]
    pub outcome: RegionOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub destination: Destination,
    pub generation: u64,
    pub events: Vec<RegionEvent>,
}

impl RefreshReport {
    pub fn failures(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.outcome, RegionOutcome::Failed { .. }))
            .count()
    }

    pub fn applied(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.outcome == RegionOutcome::Applied)
            .count()
    }

    pub fn discarded(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.outcome == RegionOutcome::Discarded)
            .count()
    }
}

/// Result of one upstream call, on its way to the document
enum Fetched {
    AllDataFailed(anyhow::Error),
    Conditions(anyhow::Result<ConditionsSnapshot>),
    Chart(ChartKind, anyhow::Result<ChartSpec>),
}

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn ConditionsApi>,
    preference: DestinationPreference,
    document: Arc<RwLock<Document>>,
    settings: WidgetSettings,
    generation: Arc<AtomicU64>,
}

impl DashboardService {
    pub fn new(
        api: Arc<dyn ConditionsApi>,
        preference: DestinationPreference,
        document: Arc<RwLock<Document>>,
        settings: WidgetSettings,
    ) -> Self {
        Self {
            api,
            preference,
            document,
            settings,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn document(&self) -> Arc<RwLock<Document>> {
        self.document.clone()
    }

    pub fn current_destination(&self) -> Destination {
        self.preference.load()
    }

    /// Regions a refresh can report, in page order
    pub fn regions(&self) -> Vec<Region> {
        let mut regions = vec![Region::Conditions];
        regions.extend(ChartKind::ALL.into_iter().map(Region::Chart));
        if self.settings.variant == EndpointVariant::Combined {
            // A failed `/all_data` call is reported once for the whole page
            regions.push(Region::AllData);
        }
        regions
    }

    /// Page load: restore the remembered destination and render it
    pub async fn bootstrap(&self) -> RefreshReport {
        let destination = self.preference.load();
        tracing::info!("Restoring destination {}", destination);
        self.select_destination(destination, None).await
    }

    /// Persist `destination`, label the page with it and refetch everything.
    /// Every applied region is also sent to `observer` when one is given.
    pub async fn select_destination(
        &self,
        destination: Destination,
        observer: Option<mpsc::Sender<RegionEvent>>,
    ) -> RefreshReport {
        if let Err(e) = self.preference.remember(&destination) {
            tracing::error!("Error saving selected destination {}: {:#}", destination, e);
        }

        {
            let mut doc = self.document.write().await;
            doc.set_text(ids::DESTINATION_LABEL, destination.as_str());
            doc.set_href(ids::SUBMIT_LINK, self.submit_link(&destination));
        }

        self.refresh(&destination, observer).await
    }

    pub fn submit_link(&self, destination: &Destination) -> String {
        let mut vars = HashMap::new();
        vars.insert("destination".to_string(), destination.encoded());
        prepare_query(&self.settings.submit_link_template, &vars)
    }

    /// Fetch all regions for `destination` concurrently and apply each result
    /// as it arrives. Results of an older refresh are dropped.
    pub async fn refresh(
        &self,
        destination: &Destination,
        observer: Option<mpsc::Sender<RegionEvent>>,
    ) -> RefreshReport {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (tx, mut rx) = mpsc::channel(8);

        match self.settings.variant {
            EndpointVariant::Combined => self.spawn_combined_fetch(destination, tx),
            EndpointVariant::Legacy => self.spawn_legacy_fetches(destination, tx),
        }

        let mut events = Vec::new();
        while let Some(fetched) = rx.recv().await {
            let event = self.apply(generation, destination, fetched).await;
            if let Some(observer) = &observer {
                let _ = observer.send(event.clone()).await;
            }
            events.push(event);
        }

        RefreshReport {
            destination: destination.clone(),
            generation,
            events,
        }
    }

    fn spawn_combined_fetch(&self, destination: &Destination, tx: mpsc::Sender<Fetched>) {
        let api = self.api.clone();
        let destination = destination.clone();
        let tz_offset = resolve_tz_offset(self.settings.tz_offset_minutes);

        tokio::spawn(async move {
            match api.fetch_all_data(&destination, tz_offset).await {
                Ok(all) => {
                    let _ = tx.send(Fetched::Conditions(Ok(all.conditions.into()))).await;
                    let graphs = [
                        (ChartKind::Ccs, all.graphs.ccs),
                        (ChartKind::Temperature, all.graphs.temperature),
                        (ChartKind::Humidity, all.graphs.humidity),
                    ];
                    for (kind, raw) in graphs {
                        let spec = ChartSpec::from_json_str(&raw).map_err(anyhow::Error::from);
                        let _ = tx.send(Fetched::Chart(kind, spec)).await;
                    }
                }
                Err(e) => {
                    let _ = tx.send(Fetched::AllDataFailed(e)).await;
                }
            }
        });
    }

    fn spawn_legacy_fetches(&self, destination: &Destination, tx: mpsc::Sender<Fetched>) {
        {
            let tx = tx.clone();
            let api = self.api.clone();
            let destination = destination.clone();
            tokio::spawn(async move {
                let result = api
                    .fetch_current_conditions(&destination)
                    .await
                    .map(ConditionsSnapshot::from);
                let _ = tx.send(Fetched::Conditions(result)).await;
            });
        }

        for kind in ChartKind::ALL {
            let tx = tx.clone();
            let api = self.api.clone();
            let destination = destination.clone();
            tokio::spawn(async move {
                let result = api.fetch_chart(kind, &destination).await;
                let _ = tx.send(Fetched::Chart(kind, result)).await;
            });
        }
    }

    async fn apply(
        &self,
        generation: u64,
        destination: &Destination,
        fetched: Fetched,
    ) -> RegionEvent {
        let region = match &fetched {
            Fetched::AllDataFailed(_) => Region::AllData,
            Fetched::Conditions(_) => Region::Conditions,
            Fetched::Chart(kind, _) => Region::Chart(*kind),
        };

        let mut doc = self.document.write().await;
        let latest = self.generation.load(Ordering::SeqCst);
        if latest != generation {
            tracing::debug!(
                "Dropping {} for {} (refresh {} superseded by {})",
                region,
                destination,
                generation,
                latest
            );
            return RegionEvent {
                generation,
                region,
                outcome: RegionOutcome::Discarded,
            };
        }

        let result = match fetched {
            Fetched::AllDataFailed(e) => Err(e),
            Fetched::Conditions(result) => result.map(|snapshot| {
                render_conditions(&mut doc, &snapshot, self.settings.variant.card_options())
            }),
            Fetched::Chart(kind, result) => result.map(|spec| render_chart(&mut doc, kind, spec)),
        };

        let outcome = match result {
            Ok(()) => RegionOutcome::Applied,
            Err(e) => {
                tracing::error!("Error fetching {} for {}: {:#}", region, destination, e);
                RegionOutcome::Failed {
                    error: format!("{:#}", e),
                }
            }
        };

        RegionEvent {
            generation,
            region,
            outcome,
        }
    }
}

/// Write the metric values, their color classes and the forecast strip
fn render_conditions(doc: &mut Document, c: &ConditionsSnapshot, cards: CardOptions) {
    doc.update_metric(
        ids::SCORE,
        to_fixed(c.score, 1),
        Some(ccs_band(c.score).ccs_class().as_str()),
        Some("ccs-circle"),
    );
    doc.update_metric(
        ids::TEMPERATURE,
        format!("{} °F", to_fixed(c.temperature, 2)),
        Some(temperature_band(c.temperature).metric_class().as_str()),
        None,
    );
    doc.update_metric(
        ids::HUMIDITY,
        format!("{}%", c.humidity),
        Some(humidity_band(c.humidity).metric_class().as_str()),
        None,
    );
    let dew_class = dew_point_warning(c.temperature, c.dew_point).then_some("metric-red");
    doc.update_metric(
        ids::DEW_POINT,
        format!("{} °F", to_fixed(c.dew_point, 2)),
        dew_class,
        None,
    );

    if let Some(speed) = c.wind_speed {
        doc.update_metric(ids::WIND_SPEED, format!("{} mph", to_fixed(speed, 0)), None, None);
    }
    if let Some(gust) = c.wind_gust {
        doc.update_metric(ids::WIND_GUST, format!("{} mph", to_fixed(gust, 0)), None, None);
    }
    if let Some(direction) = c.wind_direction {
        doc.update_metric(ids::WIND_DIRECTION, degrees_to_cardinal(direction), None, None);
    }

    if let Some(forecast) = &c.forecast {
        doc.render_forecast(build_cards(forecast, cards));
    }
}

/// Draw into the chart's graph element and reveal its buttons
fn render_chart(doc: &mut Document, kind: ChartKind, spec: ChartSpec) {
    if doc.draw_chart(kind.graph_id(), spec.without_drag(), PlotConfig::default()) {
        doc.show(kind.button_container_id());
    }
}
