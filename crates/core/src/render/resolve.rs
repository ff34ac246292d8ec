//! Per-field fallback chains. Each resolver lists its candidates in priority order.

use crate::domain::snapshot::Snapshot;
use crate::domain::zone::Zone;
use crate::render::format::PLACEHOLDER;

/// First candidate that is present.
pub fn first_present<T>(candidates: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    candidates.into_iter().flatten().next()
}

pub fn text_or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

/// `date_pretty`, then `dt`, then the placeholder.
pub fn resolve_date_label(snapshot: &Snapshot) -> String {
    text_or_placeholder(first_present([
        snapshot.date_pretty.as_deref(),
        snapshot.dt.as_deref(),
    ]))
}

/// `market_health_pct`, then the legacy `health_pct`.
pub fn resolve_health(snapshot: &Snapshot) -> Option<f64> {
    first_present([snapshot.market_health_pct, snapshot.health_pct])
}

/// Value fed to the classifier and the indicator. Absent health counts as 0.
pub fn health_or_zero(health: Option<f64>) -> f64 {
    health.unwrap_or(0.0)
}

/// An explicit headline wins unless it is blank; otherwise the zone's default.
pub fn resolve_headline(snapshot: &Snapshot, zone: Zone) -> String {
    let explicit = snapshot
        .headline
        .as_deref()
        .filter(|s| !s.trim().is_empty());
    first_present([explicit, Some(zone.default_headline())])
        .unwrap_or(PLACEHOLDER)
        .to_string()
}
