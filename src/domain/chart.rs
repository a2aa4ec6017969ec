// Chart specifications produced upstream and drawn by Plotly on the page
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The three charts of the dashboard, each with its graph and button container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Ccs,
    Temperature,
    Humidity,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Ccs, ChartKind::Temperature, ChartKind::Humidity];

    pub fn graph_id(self) -> &'static str {
        match self {
            ChartKind::Ccs => "conditions-graph",
            ChartKind::Temperature => "temp-graph",
            ChartKind::Humidity => "humidity-graph",
        }
    }

    pub fn button_container_id(self) -> &'static str {
        match self {
            ChartKind::Ccs => "conditions-button-container",
            ChartKind::Temperature => "temperature-button-container",
            ChartKind::Humidity => "humidity-button-container",
        }
    }

    /// Fullscreen container wrapping the graph
    pub fn container_id(self) -> &'static str {
        match self {
            ChartKind::Ccs => "conditions-graph-container",
            ChartKind::Temperature => "temperature-graph-container",
            ChartKind::Humidity => "humidity-graph-container",
        }
    }

    /// Path of the per-chart endpoint of the legacy contract
    pub fn legacy_path(self) -> &'static str {
        match self {
            ChartKind::Ccs => "/graph",
            ChartKind::Temperature => "/graphtemp",
            ChartKind::Humidity => "/graphhumidity",
        }
    }

    pub fn from_container_id(id: &str) -> Option<ChartKind> {
        Self::ALL.into_iter().find(|k| k.container_id() == id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChartSpecError {
    #[error("chart spec is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("chart spec layout must be an object")]
    Layout,
}

/// Plotted series plus layout, as the charting library expects them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Value,
    pub layout: Map<String, Value>,
}

impl ChartSpec {
    /// Accept a chart object. Without a `data` key the whole value is the data.
    pub fn from_value(value: Value) -> Result<Self, ChartSpecError> {
        match value {
            Value::Object(mut obj) if obj.contains_key("data") => {
                let data = obj.remove("data").unwrap_or(Value::Null);
                let layout = match obj.remove("layout") {
                    None | Some(Value::Null) => Map::new(),
                    Some(Value::Object(layout)) => layout,
                    Some(_) => return Err(ChartSpecError::Layout),
                };
                Ok(Self { data, layout })
            }
            other => Ok(Self {
                data: other,
                layout: Map::new(),
            }),
        }
    }

    /// Parse a chart serialized as a JSON string
    pub fn from_json_str(raw: &str) -> Result<Self, ChartSpecError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Copy of the spec with drag interaction switched off
    pub fn without_drag(mut self) -> Self {
        self.layout.insert("dragmode".to_string(), Value::Bool(false));
        self
    }
}

/// Plot options passed alongside every chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    pub display_mode_bar: bool,
    pub responsive: bool,
    pub scroll_zoom: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            display_mode_bar: false,
            responsive: true,
            scroll_zoom: false,
        }
    }
}
