// Conditions payloads delivered by the upstream server
use super::forecast::ForecastDay;
use serde::{Deserialize, Serialize};

/// `conditions.current` of the combined payload
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CurrentWeather {
    pub temp: f64,
    pub humidity: f64,
    pub dew_point: f64,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub wind_gust: Option<f64>,
    #[serde(default)]
    pub wind_direction: Option<f64>,
}

/// `conditions` object of `/all_data`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConditionsReport {
    pub current: CurrentWeather,
    pub climbing_conditions_score: f64,
    #[serde(default)]
    pub forecast: Option<Vec<ForecastDay>>,
}

/// Serialized chart specs of `/all_data`, one JSON string per chart
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GraphSet {
    pub ccs: String,
    pub temperature: String,
    pub humidity: String,
}

/// Full `/all_data` response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AllData {
    pub conditions: ConditionsReport,
    pub graphs: GraphSet,
}

/// Flat `/current_conditions` response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LegacyConditions {
    pub temperature: f64,
    pub humidity: f64,
    pub dew_point: f64,
    pub climbing_conditions_score: f64,
    #[serde(default)]
    pub forecast: Option<Vec<ForecastDay>>,
}

/// What the widget renders, whichever contract produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionsSnapshot {
    pub score: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub dew_point: f64,
    pub wind_speed: Option<f64>,
    pub wind_gust: Option<f64>,
    pub wind_direction: Option<f64>,
    pub forecast: Option<Vec<ForecastDay>>,
}

impl From<ConditionsReport> for ConditionsSnapshot {
    fn from(report: ConditionsReport) -> Self {
        let current = report.current;
        Self {
            score: report.climbing_conditions_score,
            temperature: current.temp,
            humidity: current.humidity,
            dew_point: current.dew_point,
            wind_speed: current.wind_speed,
            wind_gust: current.wind_gust,
            wind_direction: current.wind_direction,
            forecast: report.forecast,
        }
    }
}

impl From<LegacyConditions> for ConditionsSnapshot {
    fn from(flat: LegacyConditions) -> Self {
        Self {
            score: flat.climbing_conditions_score,
            temperature: flat.temperature,
            humidity: flat.humidity,
            dew_point: flat.dew_point,
            wind_speed: None,
            wind_gust: None,
            wind_direction: None,
            forecast: flat.forecast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_payload_normalizes() {
        let json = serde_json::json!({
            "conditions": {
                "current": {
                    "temp": 52.3, "humidity": 41, "dew_point": 30.1,
                    "wind_speed": 6.4, "wind_gust": 12.0, "wind_direction": 270
                },
                "climbing_conditions_score": 7.4,
                "forecast": []
            },
            "graphs": { "ccs": "{}", "temperature": "{}", "humidity": "{}" }
        });

        let all: AllData = serde_json::from_value(json).unwrap();
        let snapshot = ConditionsSnapshot::from(all.conditions);
        assert_eq!(snapshot.score, 7.4);
        assert_eq!(snapshot.humidity, 41.0);
        assert_eq!(snapshot.wind_direction, Some(270.0));
        assert_eq!(snapshot.forecast, Some(vec![]));
    }

    #[test]
    fn test_legacy_payload_has_no_wind() {
        let json = serde_json::json!({
            "temperature": 70.0, "humidity": 50, "dew_point": 55.5,
            "climbing_conditions_score": 3.1
        });

        let flat: LegacyConditions = serde_json::from_value(json).unwrap();
        let snapshot = ConditionsSnapshot::from(flat);
        assert_eq!(snapshot.temperature, 70.0);
        assert_eq!(snapshot.wind_speed, None);
        assert!(snapshot.forecast.is_none());
    }
}
