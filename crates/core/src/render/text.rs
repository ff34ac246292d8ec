use crate::render::chart::LineChart;
use crate::render::format::PLACEHOLDER;
use crate::render::view::{DashboardSurface, Slot};
use std::collections::BTreeMap;

const TRACK_WIDTH: usize = 50;

/// Terminal rendition of the dashboard.
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    texts: BTreeMap<Slot, String>,
    indicator_offset: f64,
    chart: Option<LineChart>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn text(&self, slot: Slot) -> &str {
        self.texts.get(&slot).map(String::as_str).unwrap_or(PLACEHOLDER)
    }

    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("{}  [{}]", self.text(Slot::Date), self.text(Slot::ZoneBadge)),
            self.text(Slot::Headline).to_string(),
            track(self.indicator_offset),
            String::new(),
        ];

        lines.extend(
            Slot::ALL
                .into_iter()
                .filter(|slot| !matches!(slot, Slot::Date | Slot::ZoneBadge | Slot::Headline))
                .map(|slot| format!("{:<24}{}", slot.caption(), self.text(slot))),
        );

        if let Some(chart) = &self.chart {
            lines.push(String::new());
            lines.push(format!(
                "{:<24}{:>24}{:>24}",
                "Date", chart.series[0].label, chart.series[1].label
            ));
            for (i, label) in chart.labels.iter().enumerate() {
                lines.push(format!(
                    "{:<24}{:>24}{:>24}",
                    label,
                    cell(chart.series[0].data[i]),
                    cell(chart.series[1].data[i])
                ));
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl DashboardSurface for TextSurface {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.texts.insert(slot, text.to_string());
    }

    fn set_indicator_offset(&mut self, percent: f64) {
        self.indicator_offset = percent;
    }

    fn draw_line_chart(&mut self, chart: &LineChart) {
        self.chart = Some(chart.clone());
    }
}

/// `|----^-----|` with the marker at `percent` of the track.
fn track(percent: f64) -> String {
    let pos = ((percent / 100.0) * (TRACK_WIDTH - 1) as f64).round() as usize;
    let pos = pos.min(TRACK_WIDTH - 1);
    let mut s = String::with_capacity(TRACK_WIDTH + 2);
    s.push('|');
    for i in 0..TRACK_WIDTH {
        s.push(if i == pos { '^' } else { '-' });
    }
    s.push('|');
    s
}

fn cell(v: Option<f64>) -> String {
    match v {
        Some(v) => v.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::{History, Snapshot};
    use crate::render::chart::ChartStyle;
    use crate::render::view::render;
    use serde_json::json;

    #[test]
    fn track_marker_positions() {
        assert!(track(0.0).starts_with("|^"));
        assert!(track(100.0).ends_with("^|"));
        assert_eq!(track(50.0).chars().filter(|c| *c == '^').count(), 1);
        assert_eq!(track(50.0).chars().count(), TRACK_WIDTH + 2);
    }

    #[test]
    fn renders_slots_and_chart_rows() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "date_pretty": "12 Jun",
            "market_health_pct": 45,
            "pct_above_50": 42.36
        }))
        .unwrap();
        let history: History = serde_json::from_value(json!([
            {"dt": "10 Jun", "pct_above_50": 38, "green_prob_5d": 60},
            {"dt": "11 Jun", "pct_above_50": null, "green_prob_5d": 65}
        ]))
        .unwrap();

        let mut surface = TextSurface::new();
        render(snapshot, history, &ChartStyle::default(), &mut surface);
        let text = surface.to_text();

        assert!(text.starts_with("12 Jun  [GO GREEN]"));
        assert!(text.contains("42.4%"));
        assert!(text.contains("10 Jun"));
        let row = text.lines().find(|l| l.starts_with("11 Jun")).unwrap();
        assert!(row.contains('—'));
        assert!(row.contains("65"));
    }

    #[test]
    fn one_line_per_slot_without_chart() {
        let mut surface = TextSurface::new();
        surface.set_text(Slot::Date, "12 Jun");
        let text = surface.to_text();

        // Header block of four lines, then the eight remaining slots.
        assert_eq!(text.lines().count(), 4 + 8);
        assert!(text.ends_with('\n'));
        assert!(text.starts_with("12 Jun  [—]"));
    }
}
