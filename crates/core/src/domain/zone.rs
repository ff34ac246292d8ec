/// Market-condition category derived from the health percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Danger,
    WaitAndWatch,
    GoGreen,
    FullForce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneInfo {
    pub label: &'static str,
    pub badge: &'static str,
    pub headline: &'static str,
}

// Scanned top-down; the first band whose lower bound is <= p wins. Anything below the last
// bound (including NaN) is Danger.
const ZONE_THRESHOLDS: [(f64, Zone); 3] = [
    (60.0, Zone::FullForce),
    (40.0, Zone::GoGreen),
    (30.0, Zone::WaitAndWatch),
];

impl Zone {
    pub const ALL: [Zone; 4] = [
        Zone::Danger,
        Zone::WaitAndWatch,
        Zone::GoGreen,
        Zone::FullForce,
    ];

    /// Total over f64. The input is not clamped: -5 is Danger, 150 is FullForce.
    pub fn classify(percent: f64) -> Zone {
        ZONE_THRESHOLDS
            .iter()
            .find(|(min, _)| percent >= *min)
            .map(|(_, zone)| *zone)
            .unwrap_or(Zone::Danger)
    }

    pub fn info(self) -> ZoneInfo {
        match self {
            Zone::Danger => ZoneInfo {
                label: "Danger Zone",
                badge: "DANGER",
                headline: "Danger zone: protect capital, reduce risk.",
            },
            Zone::WaitAndWatch => ZoneInfo {
                label: "Wait & Watch",
                badge: "WAIT & WATCH",
                headline: "Wait & watch: early improvement possible, but no confirmation yet.",
            },
            Zone::GoGreen => ZoneInfo {
                label: "Go Green",
                badge: "GO GREEN",
                headline: "Go green: participation improving — deploy gradually.",
            },
            Zone::FullForce => ZoneInfo {
                label: "Full Force",
                badge: "FULL FORCE",
                headline: "Full force: broad participation — trend-following has the edge.",
            },
        }
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn badge(self) -> &'static str {
        self.info().badge
    }

    pub fn default_headline(self) -> &'static str {
        self.info().headline
    }
}
