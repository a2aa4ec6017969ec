// Forecast days and the cards built from them
use super::fixed::to_fixed;
use super::palette::{Band, CardPalette, ccs_band};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub const CARD_WIDTH_PX: u32 = 250;
pub const CARD_GAP_PX: u32 = 16;

/// One day of the upstream daily forecast
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ForecastDay {
    pub date: String,
    #[serde(default)]
    pub source: Option<String>,
    pub ccs_low: f64,
    pub ccs_high: f64,
    pub temp_low: f64,
    pub temp_high: f64,
    pub humidity_low: f64,
    pub humidity_high: f64,
    #[serde(default)]
    pub precip_high: f64,
    #[serde(default)]
    pub wind_low: Option<f64>,
    #[serde(default)]
    pub wind_high: Option<f64>,
    #[serde(default)]
    pub rain_accumulation: Option<f64>,
}

/// How many days become cards and which lines they carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardOptions {
    pub limit: usize,
    pub extended: bool,
}

impl CardOptions {
    pub const LEGACY: CardOptions = CardOptions {
        limit: 5,
        extended: false,
    };
    pub const COMBINED: CardOptions = CardOptions {
        limit: 8,
        extended: true,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardLine {
    pub icon: &'static str,
    pub text: String,
}

impl CardLine {
    fn new(icon: &'static str, text: String) -> Self {
        Self { icon, text }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCard {
    pub date: String,
    pub weekday: String,
    pub band: Band,
    pub palette: CardPalette,
    pub lines: Vec<CardLine>,
}

/// Weekday of an ISO `YYYY-MM-DD` date taken as a UTC calendar day
pub fn weekday_of(date: &str) -> Option<Weekday> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.weekday())
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

pub fn build_cards(forecast: &[ForecastDay], options: CardOptions) -> Vec<ForecastCard> {
    forecast
        .iter()
        .take(options.limit)
        .map(|day| build_card(day, options.extended))
        .collect()
}

fn build_card(day: &ForecastDay, extended: bool) -> ForecastCard {
    let weekday = match weekday_of(&day.date) {
        Some(weekday) => weekday_name(weekday).to_string(),
        None => {
            tracing::warn!("Forecast day has unparseable date: {}", day.date);
            day.date.clone()
        }
    };
    let band = ccs_band(day.ccs_high);

    let mut lines = vec![
        CardLine::new(
            "bi-speedometer2",
            format!("CCS: {}–{}", to_fixed(day.ccs_low, 1), to_fixed(day.ccs_high, 1)),
        ),
        CardLine::new(
            "bi-thermometer-half",
            format!(
                "Temp: {}–{} °F",
                to_fixed(day.temp_low, 1),
                to_fixed(day.temp_high, 1)
            ),
        ),
        CardLine::new(
            "bi-droplet-half",
            format!("Humidity: {}%–{}%", day.humidity_low, day.humidity_high),
        ),
        CardLine::new("bi-cloud-rain", format!("Rain: {}%", day.precip_high)),
    ];

    if extended {
        if let (Some(low), Some(high)) = (day.wind_low, day.wind_high) {
            lines.push(CardLine::new("bi-wind", format!("Wind: {}–{}mph", low, high)));
        }
        let total = day.rain_accumulation.unwrap_or(0.0);
        lines.push(CardLine::new("bi-beaker", format!("Rain Total: {}\"", total)));
    }

    ForecastCard {
        date: day.date.clone(),
        weekday,
        band,
        palette: band.card_palette(),
        lines,
    }
}

/// Transform and shadow of a card at rest and under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Elevation {
    pub transform: &'static str,
    pub box_shadow: &'static str,
}

pub const RESTING: Elevation = Elevation {
    transform: "scale(1)",
    box_shadow: "0 8px 20px rgba(0,0,0,0.12)",
};

pub const RAISED: Elevation = Elevation {
    transform: "scale(1.05)",
    box_shadow: "0 12px 30px rgba(0,0,0,0.25)",
};

/// Flex layout of the card strip for a given container width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StripLayout {
    pub fits: bool,
}

impl StripLayout {
    pub fn compute(card_count: usize, container_width: u32) -> Self {
        let n = card_count as i64;
        let total = CARD_WIDTH_PX as i64 * n + CARD_GAP_PX as i64 * (n - 1);
        Self {
            fits: total <= container_width as i64,
        }
    }

    pub fn flex_wrap(&self) -> &'static str {
        if self.fits { "wrap" } else { "nowrap" }
    }

    pub fn justify_content(&self) -> &'static str {
        if self.fits { "center" } else { "flex-start" }
    }

    pub fn overflow_x(&self) -> &'static str {
        if self.fits { "visible" } else { "auto" }
    }

    pub fn padding_bottom(&self) -> &'static str {
        if self.fits { "0" } else { "0.5rem" }
    }

    pub fn to_css(&self) -> String {
        format!(
            "display: flex; flex-wrap: {}; justify-content: {}; overflow-x: {}; gap: 1rem; padding-bottom: {};",
            self.flex_wrap(),
            self.justify_content(),
            self.overflow_x(),
            self.padding_bottom()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, ccs_high: f64) -> ForecastDay {
        ForecastDay {
            date: date.to_string(),
            source: Some("hourly".to_string()),
            ccs_low: 2.04,
            ccs_high,
            temp_low: 41.0,
            temp_high: 63.3,
            humidity_low: 30.0,
            humidity_high: 55.0,
            precip_high: 20.0,
            wind_low: Some(3.0),
            wind_high: Some(11.0),
            rain_accumulation: Some(0.12),
        }
    }

    #[test]
    fn test_weekday_is_calendar_day() {
        assert_eq!(weekday_of("2024-03-10"), Some(Weekday::Sun));
        assert_eq!(weekday_of("2024-02-29"), Some(Weekday::Thu));
        assert_eq!(weekday_of("not-a-date"), None);
    }

    #[test]
    fn test_build_cards_truncates_per_variant() {
        let forecast: Vec<ForecastDay> = (1..=10)
            .map(|d| day(&format!("2024-03-{:02}", d), 5.0))
            .collect();

        assert_eq!(build_cards(&forecast, CardOptions::LEGACY).len(), 5);
        assert_eq!(build_cards(&forecast, CardOptions::COMBINED).len(), 8);

        let cards = build_cards(&forecast[..3], CardOptions::COMBINED);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].date, "2024-03-01");
    }

    #[test]
    fn test_card_halves_round_up() {
        let mut tie = day("2024-03-10", 6.25);
        tie.ccs_low = 3.25;
        tie.temp_low = 40.25;
        tie.temp_high = 62.75;

        let card = build_card(&tie, false);
        assert_eq!(card.lines[0].text, "CCS: 3.3–6.3");
        assert_eq!(card.lines[1].text, "Temp: 40.3–62.8 °F");
    }

    #[test]
    fn test_card_content_and_palette() {
        let card = build_card(&day("2024-03-10", 7.5), true);
        assert_eq!(card.weekday, "Sunday");
        assert_eq!(card.band, Band::Green);
        assert_eq!(card.palette.text, "#155724");

        let texts: Vec<&str> = card.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "CCS: 2.0–7.5",
                "Temp: 41.0–63.3 °F",
                "Humidity: 30%–55%",
                "Rain: 20%",
                "Wind: 3–11mph",
                "Rain Total: 0.12\"",
            ]
        );
    }

    #[test]
    fn test_basic_card_has_four_lines() {
        let card = build_card(&day("2024-03-11", 3.0), false);
        assert_eq!(card.weekday, "Monday");
        assert_eq!(card.band, Band::Red);
        assert_eq!(card.lines.len(), 4);
    }

    #[test]
    fn test_bad_date_keeps_raw_label() {
        let card = build_card(&day("someday", 5.0), false);
        assert_eq!(card.weekday, "someday");
        assert_eq!(card.band, Band::Yellow);
    }

    #[test]
    fn test_strip_layout_threshold() {
        // 5 cards: 5 * 250 + 4 * 16 = 1314
        assert!(StripLayout::compute(5, 1314).fits);
        assert!(!StripLayout::compute(5, 1313).fits);

        let scrolling = StripLayout::compute(8, 800);
        assert_eq!(scrolling.flex_wrap(), "nowrap");
        assert_eq!(scrolling.justify_content(), "flex-start");
        assert_eq!(scrolling.overflow_x(), "auto");
        assert_eq!(scrolling.padding_bottom(), "0.5rem");

        let centered = StripLayout::compute(1, 800);
        assert!(centered.to_css().contains("flex-wrap: wrap"));
        assert!(centered.to_css().contains("justify-content: center"));
    }

    #[test]
    fn test_empty_strip_fits() {
        assert!(StripLayout::compute(0, 0).fits);
    }
}
