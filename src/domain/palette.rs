// Color bands for metrics and forecast cards
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Red,
    Yellow,
    Green,
}

impl Band {
    fn suffix(self) -> &'static str {
        match self {
            Band::Red => "red",
            Band::Yellow => "yellow",
            Band::Green => "green",
        }
    }

    /// Class applied to the score circle, e.g. `ccs-green`
    pub fn ccs_class(self) -> String {
        format!("ccs-{}", self.suffix())
    }

    /// Class applied to plain metrics, e.g. `metric-yellow`
    pub fn metric_class(self) -> String {
        format!("metric-{}", self.suffix())
    }

    pub fn card_palette(self) -> CardPalette {
        match self {
            Band::Red => CardPalette {
                background: "linear-gradient(135deg, #f8d7da 0%, #f1b0b7 100%)",
                text: "#721c24",
            },
            Band::Yellow => CardPalette {
                background: "linear-gradient(135deg, #fff3cd 0%, #ffe69e 100%)",
                text: "#856404",
            },
            Band::Green => CardPalette {
                background: "linear-gradient(135deg, #d4edda 0%, #a8d5a3 100%)",
                text: "#155724",
            },
        }
    }
}

/// Background and text color pair of a forecast card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardPalette {
    pub background: &'static str,
    pub text: &'static str,
}

pub fn ccs_band(score: f64) -> Band {
    if score < 4.0 {
        Band::Red
    } else if score <= 6.0 {
        Band::Yellow
    } else {
        Band::Green
    }
}

/// Temperature in °F. Thresholds are checked in ascending order, so a
/// boundary value lands in the lower bucket.
pub fn temperature_band(temp: f64) -> Band {
    if temp < 25.0 {
        Band::Red
    } else if temp <= 35.0 {
        Band::Yellow
    } else if temp <= 65.0 {
        Band::Green
    } else if temp <= 80.0 {
        Band::Yellow
    } else {
        Band::Red
    }
}

pub fn humidity_band(humidity: f64) -> Band {
    if humidity < 35.0 {
        Band::Green
    } else if humidity <= 45.0 {
        Band::Yellow
    } else {
        Band::Red
    }
}

/// Air at or below its dew point is saturated: condensation or frost on rock.
pub fn dew_point_warning(temp: f64, dew_point: f64) -> bool {
    temp <= dew_point
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Convert a bearing in degrees to a 16-point compass name
pub fn degrees_to_cardinal(degrees: f64) -> &'static str {
    let sector = (degrees / 22.5 + 0.5).floor() as i64;
    COMPASS_POINTS[sector.rem_euclid(16) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ccs_band_thresholds() {
        assert_eq!(ccs_band(0.0), Band::Red);
        assert_eq!(ccs_band(3.99), Band::Red);
        assert_eq!(ccs_band(4.0), Band::Yellow);
        assert_eq!(ccs_band(5.2), Band::Yellow);
        assert_eq!(ccs_band(6.0), Band::Yellow);
        assert_eq!(ccs_band(6.01), Band::Green);
        assert_eq!(ccs_band(10.0), Band::Green);
    }

    #[test]
    fn test_temperature_band_boundaries_fall_low() {
        assert_eq!(temperature_band(24.9), Band::Red);
        assert_eq!(temperature_band(25.0), Band::Yellow);
        assert_eq!(temperature_band(35.0), Band::Yellow);
        assert_eq!(temperature_band(35.1), Band::Green);
        assert_eq!(temperature_band(65.0), Band::Green);
        assert_eq!(temperature_band(65.1), Band::Yellow);
        assert_eq!(temperature_band(80.0), Band::Yellow);
        assert_eq!(temperature_band(80.1), Band::Red);
        assert_eq!(temperature_band(-10.0), Band::Red);
    }

    #[test]
    fn test_humidity_band() {
        assert_eq!(humidity_band(34.0), Band::Green);
        assert_eq!(humidity_band(35.0), Band::Yellow);
        assert_eq!(humidity_band(45.0), Band::Yellow);
        assert_eq!(humidity_band(46.0), Band::Red);
    }

    #[test]
    fn test_dew_point_warning_includes_equality() {
        assert!(dew_point_warning(40.0, 40.0));
        assert!(dew_point_warning(38.5, 40.0));
        assert!(!dew_point_warning(40.1, 40.0));
    }

    #[test]
    fn test_classes_and_palette() {
        assert_eq!(Band::Green.ccs_class(), "ccs-green");
        assert_eq!(Band::Red.metric_class(), "metric-red");
        assert_eq!(Band::Yellow.card_palette().text, "#856404");
    }

    #[test]
    fn test_degrees_to_cardinal() {
        assert_eq!(degrees_to_cardinal(0.0), "N");
        assert_eq!(degrees_to_cardinal(11.24), "N");
        assert_eq!(degrees_to_cardinal(11.25), "NNE");
        assert_eq!(degrees_to_cardinal(90.0), "E");
        assert_eq!(degrees_to_cardinal(225.0), "SW");
        assert_eq!(degrees_to_cardinal(350.0), "N");
        assert_eq!(degrees_to_cardinal(360.0), "N");
    }
}
