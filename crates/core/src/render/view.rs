use crate::domain::snapshot::{History, Snapshot};
use crate::domain::zone::Zone;
use crate::render::chart::{build_chart, ChartStyle, LineChart};
use crate::render::format::{fmt_pct, fmt_raw_pct};
use crate::render::resolve::{
    health_or_zero, resolve_date_label, resolve_headline, resolve_health, text_or_placeholder,
};
use std::collections::BTreeMap;

/// Named text targets on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Date,
    DailySignal,
    GreenProb,
    GreenAlert,
    HealthPct,
    Pct20,
    Pct50,
    Pct200,
    AdRatio,
    ZoneBadge,
    Headline,
}

impl Slot {
    pub const ALL: [Slot; 11] = [
        Slot::Date,
        Slot::DailySignal,
        Slot::GreenProb,
        Slot::GreenAlert,
        Slot::HealthPct,
        Slot::Pct20,
        Slot::Pct50,
        Slot::Pct200,
        Slot::AdRatio,
        Slot::ZoneBadge,
        Slot::Headline,
    ];

    /// Element id on the HTML page.
    pub fn id(self) -> &'static str {
        match self {
            Slot::Date => "dt",
            Slot::DailySignal => "dailySignal",
            Slot::GreenProb => "greenProb",
            Slot::GreenAlert => "greenAlert",
            Slot::HealthPct => "healthPct",
            Slot::Pct20 => "p20",
            Slot::Pct50 => "p50",
            Slot::Pct200 => "p200",
            Slot::AdRatio => "ad",
            Slot::ZoneBadge => "zoneBadge",
            Slot::Headline => "headline",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            Slot::Date => "Date",
            Slot::DailySignal => "Daily Signal",
            Slot::GreenProb => "Green Probability (5D)",
            Slot::GreenAlert => "Green Alert",
            Slot::HealthPct => "Market Health",
            Slot::Pct20 => "% Above 20-EMA",
            Slot::Pct50 => "% Above 50-EMA",
            Slot::Pct200 => "% Above 200-EMA",
            Slot::AdRatio => "Advance/Decline",
            Slot::ZoneBadge => "Zone",
            Slot::Headline => "Headline",
        }
    }
}

/// What the hosting surface must be able to do.
pub trait DashboardSurface {
    fn set_text(&mut self, slot: Slot, text: &str);

    /// Horizontal marker position as a percentage of the track width, already in 0..=100.
    fn set_indicator_offset(&mut self, percent: f64);

    fn draw_line_chart(&mut self, chart: &LineChart);
}

/// Marker position on the 0–100 track. Classification does not clamp; this does.
pub fn indicator_offset(health: f64) -> f64 {
    if health.is_nan() {
        return 0.0;
    }
    health.clamp(0.0, 100.0)
}

/// Everything one render pass puts on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub texts: BTreeMap<Slot, String>,
    pub zone: Zone,
    pub health: Option<f64>,
    pub indicator_offset: f64,
    pub chart: LineChart,
}

impl DashboardView {
    pub fn build(snapshot: &Snapshot, history: &History, style: &ChartStyle) -> Self {
        let health = resolve_health(snapshot);
        let effective = health_or_zero(health);
        let zone = Zone::classify(effective);

        if let Some(upstream) = snapshot.badge.as_deref() {
            if upstream != zone.badge() {
                tracing::warn!(
                    upstream_badge = upstream,
                    badge = zone.badge(),
                    health = effective,
                    "upstream badge disagrees with classified zone; using classified badge"
                );
            }
        }

        let ad = snapshot.ad_ratio.as_ref().map(|r| r.to_string());

        let texts = BTreeMap::from([
            (Slot::Date, resolve_date_label(snapshot)),
            (Slot::DailySignal, text_or_placeholder(snapshot.signal.as_deref())),
            (Slot::GreenProb, fmt_raw_pct(snapshot.green_prob_5d)),
            (Slot::GreenAlert, text_or_placeholder(snapshot.green_alert.as_deref())),
            (Slot::HealthPct, fmt_raw_pct(health)),
            (Slot::Pct20, fmt_pct(snapshot.pct_above_20)),
            (Slot::Pct50, fmt_pct(snapshot.pct_above_50)),
            (Slot::Pct200, fmt_pct(snapshot.pct_above_200)),
            (Slot::AdRatio, text_or_placeholder(ad.as_deref())),
            (Slot::ZoneBadge, zone.badge().to_string()),
            (Slot::Headline, resolve_headline(snapshot, zone)),
        ]);

        Self {
            texts,
            zone,
            health,
            indicator_offset: indicator_offset(effective),
            chart: build_chart(history, style),
        }
    }

    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }

    /// Each slot written once, then the marker, then exactly one chart call.
    pub fn apply(&self, surface: &mut dyn DashboardSurface) {
        for (slot, text) in &self.texts {
            surface.set_text(*slot, text);
        }
        surface.set_indicator_offset(self.indicator_offset);
        surface.draw_line_chart(&self.chart);
    }
}

/// One render pass. The documents are consumed; nothing outlives the call.
pub fn render(
    snapshot: Snapshot,
    history: History,
    style: &ChartStyle,
    surface: &mut dyn DashboardSurface,
) {
    let view = DashboardView::build(&snapshot, &history, style);
    view.apply(surface);

    tracing::info!(
        zone = view.zone.label(),
        health = ?view.health,
        indicator_offset = view.indicator_offset,
        points = view.chart.len(),
        "dashboard rendered"
    );
}
