use crate::domain::snapshot::History;

/// Presentation defaults for the history chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    pub p50_label: String,
    pub p50_color: String,
    pub prob_label: String,
    pub prob_color: String,
    pub tick_color: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            p50_label: "% Above 50-EMA".to_string(),
            p50_color: "#22c55e".to_string(),
            prob_label: "Green Probability (5D)".to_string(),
            prob_color: "#3b82f6".to_string(),
            tick_color: "#9ca3af".to_string(),
        }
    }
}

impl ChartStyle {
    pub fn from_env() -> Self {
        let mut out = Self::default();

        let overrides = [
            ("BREADTH_CHART_P50_LABEL", &mut out.p50_label),
            ("BREADTH_CHART_P50_COLOR", &mut out.p50_color),
            ("BREADTH_CHART_PROB_LABEL", &mut out.prob_label),
            ("BREADTH_CHART_PROB_COLOR", &mut out.prob_color),
            ("BREADTH_CHART_TICK_COLOR", &mut out.tick_color),
        ];
        for (key, field) in overrides {
            if let Ok(s) = std::env::var(key) {
                if !s.trim().is_empty() {
                    *field = s.trim().to_string();
                }
            }
        }

        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub color: String,
    /// `None` is a gap; the charting surface decides how to draw it.
    pub data: Vec<Option<f64>>,
}

/// Two line series over one shared date axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub labels: Vec<String>,
    pub series: [LineSeries; 2],
    pub tick_color: String,
}

impl LineChart {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Index `i` of the labels and of both series comes from `history[i]`.
pub fn build_chart(history: &History, style: &ChartStyle) -> LineChart {
    let mut labels = Vec::with_capacity(history.len());
    let mut p50 = Vec::with_capacity(history.len());
    let mut prob = Vec::with_capacity(history.len());

    for point in history {
        labels.push(point.dt.clone());
        p50.push(point.pct_above_50);
        prob.push(point.green_prob_5d);
    }

    LineChart {
        labels,
        series: [
            LineSeries {
                label: style.p50_label.clone(),
                color: style.p50_color.clone(),
                data: p50,
            },
            LineSeries {
                label: style.prob_label.clone(),
                color: style.prob_color.clone(),
                data: prob,
            },
        ],
        tick_color: style.tick_color.clone(),
    }
}
