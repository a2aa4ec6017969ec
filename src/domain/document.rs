// Document model - the page regions the widget writes into
use super::chart::{ChartKind, ChartSpec, PlotConfig};
use super::forecast::{ForecastCard, StripLayout};
use serde::Serialize;
use std::collections::BTreeMap;

pub mod ids {
    pub const SCORE: &str = "climbing-conditions-score";
    pub const TEMPERATURE: &str = "temperature";
    pub const HUMIDITY: &str = "humidity";
    pub const DEW_POINT: &str = "dew-point";
    pub const WIND_SPEED: &str = "wind-speed";
    pub const WIND_GUST: &str = "wind-gust";
    pub const WIND_DIRECTION: &str = "wind-direction";
    pub const DESTINATION_LABEL: &str = "selected-destination-label";
    pub const SUBMIT_LINK: &str = "submit-ccs-link";
    pub const FORECAST_CONTAINER: &str = "forecast-container";
    pub const FORECAST_CARDS: &str = "forecast-cards";
}

/// A chart currently drawn into a graph element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawnChart {
    pub spec: ChartSpec,
    pub config: PlotConfig,
    pub resizes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Element {
    pub text: String,
    pub classes: Vec<String>,
    pub visible: bool,
    pub href: Option<String>,
    pub chart: Option<DrawnChart>,
}

impl Element {
    fn visible() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    fn hidden() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    elements: BTreeMap<String, Element>,
    forecast_cards: Vec<ForecastCard>,
    strip_layout: StripLayout,
    viewport_width: u32,
    fullscreen_element: Option<String>,
}

impl Document {
    /// A document holding only the given elements, all visible
    pub fn with_elements<'a>(
        element_ids: impl IntoIterator<Item = &'a str>,
        viewport_width: u32,
    ) -> Self {
        let elements = element_ids
            .into_iter()
            .map(|id| (id.to_string(), Element::visible()))
            .collect();
        Self {
            elements,
            forecast_cards: Vec::new(),
            strip_layout: StripLayout::compute(0, viewport_width),
            viewport_width,
            fullscreen_element: None,
        }
    }

    /// Every region of the conditions dashboard page
    pub fn dashboard(viewport_width: u32) -> Self {
        let mut doc = Self::with_elements(
            [
                ids::SCORE,
                ids::TEMPERATURE,
                ids::HUMIDITY,
                ids::DEW_POINT,
                ids::WIND_SPEED,
                ids::WIND_GUST,
                ids::WIND_DIRECTION,
                ids::DESTINATION_LABEL,
                ids::SUBMIT_LINK,
                ids::FORECAST_CARDS,
            ],
            viewport_width,
        );
        doc.elements.insert(ids::FORECAST_CONTAINER.to_string(), Element::hidden());
        for kind in ChartKind::ALL {
            doc.elements.insert(kind.graph_id().to_string(), Element::visible());
            doc.elements.insert(kind.container_id().to_string(), Element::visible());
            doc.elements.insert(kind.button_container_id().to_string(), Element::hidden());
        }
        doc
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Replace a metric's text and reset its classes to `base_class` plus
    /// `color_class`. Returns false when the element does not exist.
    pub fn update_metric(
        &mut self,
        id: &str,
        text: impl Into<String>,
        color_class: Option<&str>,
        base_class: Option<&str>,
    ) -> bool {
        let Some(el) = self.elements.get_mut(id) else {
            return false;
        };
        el.text = text.into();
        el.classes.clear();
        el.classes.extend(base_class.map(str::to_string));
        el.classes.extend(color_class.map(str::to_string));
        true
    }

    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn set_href(&mut self, id: &str, href: impl Into<String>) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.href = Some(href.into());
                true
            }
            None => false,
        }
    }

    pub fn show(&mut self, id: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.visible = true;
                true
            }
            None => false,
        }
    }

    /// Purge whatever is drawn in `graph_id` and draw `spec` in its place
    pub fn draw_chart(&mut self, graph_id: &str, spec: ChartSpec, config: PlotConfig) -> bool {
        match self.elements.get_mut(graph_id) {
            Some(el) => {
                el.chart = Some(DrawnChart {
                    spec,
                    config,
                    resizes: 0,
                });
                true
            }
            None => false,
        }
    }

    /// Replace the forecast strip with `cards` and reveal the forecast region
    pub fn render_forecast(&mut self, cards: Vec<ForecastCard>) -> bool {
        if !self.contains(ids::FORECAST_CARDS) {
            return false;
        }
        self.forecast_cards = cards;
        self.show(ids::FORECAST_CONTAINER);
        self.relayout_strip();
        true
    }

    pub fn forecast_cards(&self) -> &[ForecastCard] {
        &self.forecast_cards
    }

    pub fn strip_layout(&self) -> StripLayout {
        self.strip_layout
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    fn relayout_strip(&mut self) {
        self.strip_layout = StripLayout::compute(self.forecast_cards.len(), self.viewport_width);
    }

    /// Window resize: re-layout the card strip and resize every drawn chart
    pub fn resize_viewport(&mut self, width: u32) {
        self.viewport_width = width;
        self.relayout_strip();
        for kind in ChartKind::ALL {
            self.resize_chart(kind.graph_id());
        }
    }

    /// Resize the chart drawn in `graph_id`, if any
    pub fn resize_chart(&mut self, graph_id: &str) -> bool {
        match self
            .elements
            .get_mut(graph_id)
            .and_then(|el| el.chart.as_mut())
        {
            Some(chart) => {
                chart.resizes += 1;
                true
            }
            None => false,
        }
    }

    pub fn fullscreen_element(&self) -> Option<&str> {
        self.fullscreen_element.as_deref()
    }

    pub fn set_fullscreen(&mut self, element: Option<String>) {
        self.fullscreen_element = element;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_metric_resets_classes() {
        let mut doc = Document::dashboard(1200);
        doc.update_metric(ids::SCORE, "7.1", Some("ccs-green"), Some("ccs-circle"));
        assert_eq!(doc.element(ids::SCORE).unwrap().classes, vec!["ccs-circle", "ccs-green"]);

        doc.update_metric(ids::SCORE, "3.0", Some("ccs-red"), Some("ccs-circle"));
        let el = doc.element(ids::SCORE).unwrap();
        assert_eq!(el.text, "3.0");
        assert_eq!(el.classes, vec!["ccs-circle", "ccs-red"]);

        doc.update_metric(ids::DEW_POINT, "40.00 °F", None, None);
        assert!(doc.element(ids::DEW_POINT).unwrap().classes.is_empty());
    }

    #[test]
    fn test_missing_elements_are_skipped() {
        let mut doc = Document::with_elements([ids::SCORE], 1200);
        assert!(!doc.update_metric(ids::HUMIDITY, "40%", None, None));
        assert!(!doc.set_text(ids::DESTINATION_LABEL, "Bishop"));
        assert!(!doc.render_forecast(vec![]));
        assert!(doc.element(ids::HUMIDITY).is_none());
    }

    #[test]
    fn test_dashboard_starts_with_hidden_regions() {
        let doc = Document::dashboard(1200);
        assert!(!doc.element(ids::FORECAST_CONTAINER).unwrap().visible);
        assert!(!doc.element("conditions-button-container").unwrap().visible);
        assert!(doc.element("conditions-graph").unwrap().chart.is_none());
    }

    #[test]
    fn test_draw_chart_replaces_previous() {
        let mut doc = Document::dashboard(1200);
        let first = ChartSpec::from_value(json!({"data": [1]})).unwrap();
        let second = ChartSpec::from_value(json!({"data": [2]})).unwrap();

        doc.draw_chart("temp-graph", first, PlotConfig::default());
        doc.resize_chart("temp-graph");
        doc.draw_chart("temp-graph", second, PlotConfig::default());

        let drawn = doc.element("temp-graph").unwrap().chart.as_ref().unwrap();
        assert_eq!(drawn.spec.data, json!([2]));
        assert_eq!(drawn.resizes, 0);
    }

    #[test]
    fn test_resize_viewport_relayouts_strip() {
        let mut doc = Document::dashboard(2000);
        let card = crate::domain::forecast::build_cards(
            &[crate::domain::forecast::ForecastDay {
                date: "2024-03-10".to_string(),
                source: None,
                ccs_low: 1.0,
                ccs_high: 2.0,
                temp_low: 30.0,
                temp_high: 40.0,
                humidity_low: 20.0,
                humidity_high: 30.0,
                precip_high: 0.0,
                wind_low: None,
                wind_high: None,
                rain_accumulation: None,
            }],
            crate::domain::forecast::CardOptions::LEGACY,
        );
        let cards: Vec<_> = std::iter::repeat(card[0].clone()).take(5).collect();

        assert!(doc.render_forecast(cards));
        assert!(doc.element(ids::FORECAST_CONTAINER).unwrap().visible);
        assert!(doc.strip_layout().fits);

        doc.resize_viewport(600);
        assert!(!doc.strip_layout().fits);
    }
}
