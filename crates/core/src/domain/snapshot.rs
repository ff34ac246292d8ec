use serde::Deserialize;
use std::fmt;

/// Today's values as written to `latest.json` by the upstream batch job.
///
/// Every key is optional; a missing key or JSON `null` deserializes to `None`. Numeric keys
/// that carry a non-numeric JSON value are rejected at parse time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Snapshot {
    pub date_pretty: Option<String>,
    pub dt: Option<String>,
    pub signal: Option<String>,
    pub green_prob_5d: Option<f64>,
    pub green_alert: Option<String>,
    pub market_health_pct: Option<f64>,
    /// Legacy name for `market_health_pct`.
    pub health_pct: Option<f64>,
    pub pct_above_20: Option<f64>,
    pub pct_above_50: Option<f64>,
    pub pct_above_200: Option<f64>,
    pub ad_ratio: Option<AdRatio>,
    pub headline: Option<String>,

    // Emitted upstream, not rendered.
    pub badge: Option<String>,
    pub score: Option<i64>,
    pub adv: Option<i64>,
    pub dec: Option<i64>,
    pub universe_count: Option<i64>,
}

/// Advance/decline ratio. Displayed verbatim, so either JSON form is accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdRatio {
    Number(f64),
    Text(String),
}

impl fmt::Display for AdRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdRatio::Number(n) => write!(f, "{n}"),
            AdRatio::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HistoryPoint {
    #[serde(default)]
    pub dt: String,
    pub pct_above_50: Option<f64>,
    pub green_prob_5d: Option<f64>,
    pub pct_above_200: Option<f64>,
    pub market_health_pct: Option<f64>,
}

/// Ordered as received; the x-axis of the chart follows this order.
pub type History = Vec<HistoryPoint>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_upstream_latest_shape() {
        let v = json!({
            "dt": "2026-01-27",
            "date_pretty": "27 Jan 2026 (Tuesday)",
            "signal": "WATCH",
            "score": 3,
            "pct_above_20": 51.2,
            "pct_above_50": 47.8,
            "pct_above_200": 39.0,
            "adv": 260,
            "dec": 231,
            "ad_ratio": 1.126,
            "market_health_pct": 44.3,
            "green_prob_5d": 73.0,
            "green_alert": "HIGH",
            "headline": "Go green: participation improving — deploy gradually.",
            "badge": "GO GREEN",
            "flags": {"p50_thrust": 1, "ad_strong": 1, "p200_improving": 0},
            "universe_count": 491
        });

        let s: Snapshot = serde_json::from_value(v).unwrap();
        assert_eq!(s.dt.as_deref(), Some("2026-01-27"));
        assert_eq!(s.market_health_pct, Some(44.3));
        assert_eq!(s.ad_ratio, Some(AdRatio::Number(1.126)));
        assert_eq!(s.universe_count, Some(491));
        assert!(s.health_pct.is_none());
    }

    #[test]
    fn empty_object_is_a_valid_snapshot() {
        let s: Snapshot = serde_json::from_value(json!({})).unwrap();
        assert_eq!(s, Snapshot::default());
    }

    #[test]
    fn null_numeric_fields_are_absent() {
        let s: Snapshot =
            serde_json::from_value(json!({"green_prob_5d": null, "pct_above_50": null})).unwrap();
        assert!(s.green_prob_5d.is_none());
        assert!(s.pct_above_50.is_none());
    }

    #[test]
    fn rejects_non_numeric_health() {
        let res = serde_json::from_value::<Snapshot>(json!({"market_health_pct": "45"}));
        assert!(res.is_err());
    }

    #[test]
    fn ad_ratio_accepts_text() {
        let s: Snapshot = serde_json::from_value(json!({"ad_ratio": "n/a"})).unwrap();
        assert_eq!(s.ad_ratio.unwrap().to_string(), "n/a");
    }

    #[test]
    fn ad_ratio_number_displays_shortest_form() {
        assert_eq!(AdRatio::Number(2.0).to_string(), "2");
        assert_eq!(AdRatio::Number(1.126).to_string(), "1.126");
    }

    #[test]
    fn history_preserves_order_and_duplicates() {
        let v = json!([
            {"dt": "2026-01-02", "pct_above_50": 40.0, "green_prob_5d": 50.0},
            {"dt": "2026-01-01", "pct_above_50": null, "green_prob_5d": 45.0},
            {"dt": "2026-01-01", "pct_above_50": 38.5}
        ]);

        let h: History = serde_json::from_value(v).unwrap();
        let dts: Vec<&str> = h.iter().map(|p| p.dt.as_str()).collect();
        assert_eq!(dts, ["2026-01-02", "2026-01-01", "2026-01-01"]);
        assert!(h[1].pct_above_50.is_none());
        assert!(h[2].green_prob_5d.is_none());
    }

    #[test]
    fn history_point_without_dt_gets_empty_label() {
        let h: History = serde_json::from_value(json!([{"pct_above_50": 1.0}])).unwrap();
        assert_eq!(h[0].dt, "");
    }
}
