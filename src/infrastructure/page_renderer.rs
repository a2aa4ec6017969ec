// Page renderer - Serialize the dashboard document to an HTML page
use crate::domain::chart::ChartKind;
use crate::domain::destination::Destination;
use crate::domain::document::{ids, Document, Element};
use crate::domain::forecast::{ForecastCard, CARD_WIDTH_PX, RAISED, RESTING};

const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Escape text for element content and quoted attribute values
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON that is safe to embed inside a `<script>` element
fn script_json<T: serde::Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

pub struct PageRenderer {
    catalog: Vec<String>,
}

impl PageRenderer {
    pub fn new(catalog: Vec<String>) -> Self {
        Self { catalog }
    }

    pub fn render(&self, doc: &Document, selected: &Destination) -> serde_json::Result<String> {
        let mut html = String::with_capacity(16 * 1024);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        html.push_str("<title>Climbing Conditions</title>\n");
        html.push_str(&format!("<script src=\"{}\"></script>\n", PLOTLY_SRC));
        html.push_str(&stylesheet());
        html.push_str("</head>\n<body>\n");

        html.push_str(&self.destination_menu(selected));
        html.push_str(&heading(doc));
        html.push_str(&metrics(doc));
        html.push_str(&forecast(doc));

        let mut scripts = String::new();
        for kind in ChartKind::ALL {
            html.push_str(&chart_region(doc, kind));
            if let Some(script) = plot_script(doc, kind)? {
                scripts.push_str(&script);
            }
        }

        if !scripts.is_empty() {
            html.push_str("<script>\n");
            html.push_str(&scripts);
            html.push_str("</script>\n");
        }
        html.push_str("</body>\n</html>\n");
        Ok(html)
    }

    fn destination_menu(&self, selected: &Destination) -> String {
        let mut menu = String::from("<nav class=\"destination-menu\">\n<ul>\n");
        for name in &self.catalog {
            let destination = Destination::new(name.as_str());
            let active = if destination == *selected { " class=\"active\"" } else { "" };
            menu.push_str(&format!(
                "<li{}><a href=\"/select?destination={}\">{}</a></li>\n",
                active,
                destination.encoded(),
                escape_html(name)
            ));
        }
        menu.push_str("</ul>\n</nav>\n");
        menu
    }
}

fn stylesheet() -> String {
    format!(
        "<style>\n\
         .ccs-red, .metric-red {{ color: #dc3545; }}\n\
         .ccs-yellow, .metric-yellow {{ color: #ffc107; }}\n\
         .ccs-green, .metric-green {{ color: #28a745; }}\n\
         .forecast-card {{ flex: 0 0 auto; width: {}px; border-radius: 12px; padding: 1rem; \
         text-align: center; transition: transform 0.2s, box-shadow 0.2s; \
         transform: {}; box-shadow: {}; }}\n\
         .forecast-card:hover {{ transform: {}; box-shadow: {}; }}\n\
         </style>\n",
        CARD_WIDTH_PX, RESTING.transform, RESTING.box_shadow, RAISED.transform, RAISED.box_shadow
    )
}

fn display_style(element: &Element) -> &'static str {
    if element.visible { "" } else { " style=\"display: none\"" }
}

/// A text element, or nothing when the document lacks `id`
fn text_element(doc: &Document, tag: &str, id: &str) -> String {
    let Some(element) = doc.element(id) else {
        return String::new();
    };
    let class = if element.classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", escape_html(&element.classes.join(" ")))
    };
    format!(
        "<{tag} id=\"{}\"{}{}>{}</{tag}>",
        id,
        class,
        display_style(element),
        escape_html(&element.text)
    )
}

fn heading(doc: &Document) -> String {
    let mut out = String::from("<header>\n<h1>");
    out.push_str(&text_element(doc, "span", ids::DESTINATION_LABEL));
    out.push_str("</h1>\n");
    if let Some(link) = doc.element(ids::SUBMIT_LINK) {
        let href = link.href.as_deref().unwrap_or("#");
        out.push_str(&format!(
            "<a id=\"{}\" href=\"{}\"{}>Submit conditions</a>\n",
            ids::SUBMIT_LINK,
            escape_html(href),
            display_style(link)
        ));
    }
    out.push_str("</header>\n");
    out
}

fn metrics(doc: &Document) -> String {
    let rows = [
        ("Climbing Conditions Score", ids::SCORE),
        ("Temperature", ids::TEMPERATURE),
        ("Humidity", ids::HUMIDITY),
        ("Dew Point", ids::DEW_POINT),
        ("Wind Speed", ids::WIND_SPEED),
        ("Wind Gust", ids::WIND_GUST),
        ("Wind Direction", ids::WIND_DIRECTION),
    ];
    let mut out = String::from("<section class=\"metrics\">\n");
    for (label, id) in rows {
        if doc.contains(id) {
            out.push_str(&format!(
                "<div class=\"metric\"><span class=\"metric-label\">{}</span> {}</div>\n",
                label,
                text_element(doc, "span", id)
            ));
        }
    }
    out.push_str("</section>\n");
    out
}

fn forecast(doc: &Document) -> String {
    let Some(container) = doc.element(ids::FORECAST_CONTAINER) else {
        return String::new();
    };
    let mut out = format!(
        "<section id=\"{}\"{}>\n<h2>Forecast</h2>\n",
        ids::FORECAST_CONTAINER,
        display_style(container)
    );
    if doc.contains(ids::FORECAST_CARDS) {
        out.push_str(&format!(
            "<div id=\"{}\" style=\"{}\">\n",
            ids::FORECAST_CARDS,
            doc.strip_layout().to_css()
        ));
        for card in doc.forecast_cards() {
            out.push_str(&forecast_card(card));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
    out
}

fn forecast_card(card: &ForecastCard) -> String {
    let mut out = format!(
        "<div class=\"forecast-card\" data-date=\"{}\" style=\"background: {}; color: {};\">\n\
         <h5>{}</h5>\n",
        escape_html(&card.date),
        card.palette.background,
        card.palette.text,
        escape_html(&card.weekday)
    );
    for line in &card.lines {
        out.push_str(&format!(
            "<p><i class=\"bi {}\"></i> {}</p>\n",
            line.icon,
            escape_html(&line.text)
        ));
    }
    out.push_str("</div>\n");
    out
}

fn chart_region(doc: &Document, kind: ChartKind) -> String {
    let Some(container) = doc.element(kind.container_id()) else {
        return String::new();
    };
    let fullscreen = if doc.fullscreen_element() == Some(kind.container_id()) {
        " fullscreen"
    } else {
        ""
    };
    let mut out = format!(
        "<section id=\"{}\" class=\"chart-container{}\"{}>\n",
        kind.container_id(),
        fullscreen,
        display_style(container)
    );
    if doc.contains(kind.graph_id()) {
        out.push_str(&format!("<div id=\"{}\"></div>\n", kind.graph_id()));
    }
    if let Some(buttons) = doc.element(kind.button_container_id()) {
        out.push_str(&format!(
            "<div id=\"{}\"{}>\n\
             <form method=\"post\" action=\"/fullscreen/{}\"><button type=\"submit\">Fullscreen</button></form>\n\
             </div>\n",
            kind.button_container_id(),
            display_style(buttons),
            kind.container_id()
        ));
    }
    out.push_str("</section>\n");
    out
}

fn plot_script(doc: &Document, kind: ChartKind) -> serde_json::Result<Option<String>> {
    let Some(drawn) = doc.element(kind.graph_id()).and_then(|e| e.chart.as_ref()) else {
        return Ok(None);
    };
    Ok(Some(format!(
        "Plotly.newPlot(\"{}\", {}, {}, {});\n",
        kind.graph_id(),
        script_json(&drawn.spec.data)?,
        script_json(&drawn.spec.layout)?,
        script_json(&drawn.config)?
    )))
}
