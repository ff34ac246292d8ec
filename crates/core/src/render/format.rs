/// Shown in any slot whose value is absent.
pub const PLACEHOLDER: &str = "—";

/// Breadth percentages: one decimal place, `%` suffix.
///
/// Rounds the exact binary value of `x` to the nearest tenth (Rust `{:.1}`), so `42.36`
/// becomes `42.4%` and `42.05` (stored as 42.04999…) becomes `42.0%`. Only an exact binary
/// tie such as `0.25` is resolved to even (`0.2%`, while `0.75` gives `0.8%`). Negative
/// values keep their sign, including `-0.0%` for small negatives; negative zero itself
/// prints as `0.0%`.
pub fn fmt_pct(x: Option<f64>) -> String {
    match x {
        Some(v) => format!("{:.1}%", unsigned_zero(v)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Health and green probability: the value as-is (shortest form, `70.0` prints as `70`)
/// with a `%` suffix. No fixed-decimal rounding.
pub fn fmt_raw_pct(x: Option<f64>) -> String {
    match x {
        Some(v) => format!("{}%", unsigned_zero(v)),
        None => PLACEHOLDER.to_string(),
    }
}

// `-0.0` would otherwise print with a minus sign.
fn unsigned_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}
