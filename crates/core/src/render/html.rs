use crate::render::chart::LineChart;
use crate::render::format::PLACEHOLDER;
use crate::render::view::{DashboardSurface, Slot};
use serde_json::{json, Value};
use std::collections::BTreeMap;

const CHART_JS_SRC: &str = "https://cdn.jsdelivr.net/npm/chart.js@4";

const STYLE: &str = r#"
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #0b1220; color: #e5e7eb; margin: 0; padding: 24px; }
    .container { max-width: 1100px; margin: 0 auto; }
    header { display: flex; justify-content: space-between; align-items: baseline; }
    .badge { display: inline-block; padding: 6px 14px; border-radius: 999px; font-weight: 700; background: #1f2937; }
    .headline { font-size: 1.15em; margin: 12px 0 20px; }
    .track { position: relative; height: 12px; border-radius: 6px; background: linear-gradient(90deg, #ef4444 0%, #ef4444 30%, #f59e0b 30%, #f59e0b 40%, #22c55e 40%, #22c55e 60%, #15803d 60%, #15803d 100%); }
    .marker { position: absolute; top: -6px; width: 4px; height: 24px; margin-left: -2px; background: #f9fafb; }
    .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px; margin: 24px 0; }
    .tile { background: #111827; border-radius: 10px; padding: 14px; }
    .tile .label { font-size: 0.8em; color: #9ca3af; }
    .tile .value { font-size: 1.4em; font-weight: 600; margin-top: 4px; }
    .error { background: #7f1d1d; border-radius: 10px; padding: 16px; }
"#;

const TILE_SLOTS: [Slot; 8] = [
    Slot::HealthPct,
    Slot::DailySignal,
    Slot::GreenProb,
    Slot::GreenAlert,
    Slot::Pct20,
    Slot::Pct50,
    Slot::Pct200,
    Slot::AdRatio,
];

/// Collects one render pass and turns it into a standalone HTML page.
#[derive(Debug, Clone)]
pub struct HtmlSurface {
    title: String,
    texts: BTreeMap<Slot, String>,
    indicator_offset: f64,
    chart: Option<Value>,
}

impl Default for HtmlSurface {
    fn default() -> Self {
        Self::new("Market Health")
    }
}

impl HtmlSurface {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            texts: BTreeMap::new(),
            indicator_offset: 0.0,
            chart: None,
        }
    }

    fn text(&self, slot: Slot) -> &str {
        self.texts.get(&slot).map(String::as_str).unwrap_or(PLACEHOLDER)
    }

    fn span(&self, slot: Slot) -> String {
        format!(
            r#"<span id="{}">{}</span>"#,
            slot.id(),
            escape_html(self.text(slot))
        )
    }

    pub fn to_html(&self) -> String {
        let tiles: String = TILE_SLOTS
            .iter()
            .map(|slot| {
                format!(
                    r#"<div class="tile"><div class="label">{}</div><div class="value">{}</div></div>"#,
                    escape_html(slot.caption()),
                    self.span(*slot)
                )
            })
            .collect::<Vec<_>>()
            .join("\n            ");

        let chart = match &self.chart {
            Some(config) => format!(
                "<canvas id=\"chart\" height=\"120\"></canvas>\n        <script src=\"{CHART_JS_SRC}\"></script>\n        <script>new Chart(document.getElementById('chart'), {});</script>",
                script_json(config)
            ),
            None => String::new(),
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <header>
            <h1>{title}</h1>
            {date}
        </header>
        <div class="badge">{badge}</div>
        <div class="headline">{headline}</div>
        <div class="track"><div class="marker" id="marker" style="left: {offset}%"></div></div>
        <div class="grid">
            {tiles}
        </div>
        {chart}
    </div>
</body>
</html>
"#,
            title = escape_html(&self.title),
            date = self.span(Slot::Date),
            badge = self.span(Slot::ZoneBadge),
            headline = self.span(Slot::Headline),
            offset = self.indicator_offset,
        )
    }
}

impl DashboardSurface for HtmlSurface {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.texts.insert(slot, text.to_string());
    }

    fn set_indicator_offset(&mut self, percent: f64) {
        self.indicator_offset = percent;
    }

    fn draw_line_chart(&mut self, chart: &LineChart) {
        self.chart = Some(chartjs_config(chart));
    }
}

/// Chart.js line config. Missing points serialize as `null`, which Chart.js leaves as gaps.
pub fn chartjs_config(chart: &LineChart) -> Value {
    let datasets: Vec<Value> = chart
        .series
        .iter()
        .map(|s| {
            json!({
                "label": s.label,
                "data": s.data,
                "borderColor": s.color,
                "backgroundColor": s.color,
                "tension": 0.25,
                "pointRadius": 0,
            })
        })
        .collect();

    json!({
        "type": "line",
        "data": {
            "labels": chart.labels,
            "datasets": datasets,
        },
        "options": {
            "responsive": true,
            "interaction": {"mode": "index", "intersect": false},
            "plugins": {"legend": {"labels": {"color": chart.tick_color}}},
            "scales": {
                "x": {"ticks": {"color": chart.tick_color}},
                "y": {"ticks": {"color": chart.tick_color}},
            },
        },
    })
}

/// Visible failure state: replaces the dashboard entirely.
pub fn error_page(title: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        <div class="error" id="error">Dashboard data could not be loaded: {message}</div>
    </div>
</body>
</html>
"#,
        title = escape_html(title),
        message = escape_html(message),
    )
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

// Keeps `</script>` inside a label from closing the script element.
fn script_json(v: &Value) -> String {
    v.to_string().replace("</", "<\\/")
}
