pub mod domain;
pub mod ingest;
pub mod render;

pub mod config {
    use anyhow::Context;

    const DEFAULT_LATEST_PATH: &str = "data/latest.json";
    const DEFAULT_HISTORY_PATH: &str = "data/history.json";
    const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub data_base_url: Option<String>,
        pub data_dir: String,
        pub latest_path: String,
        pub history_path: String,
        pub http_timeout_secs: u64,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                data_base_url: None,
                data_dir: ".".to_string(),
                latest_path: DEFAULT_LATEST_PATH.to_string(),
                history_path: DEFAULT_HISTORY_PATH.to_string(),
                http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let defaults = Self::default();

            let http_timeout_secs = match non_empty_var("BREADTH_HTTP_TIMEOUT_SECS") {
                Some(s) => s
                    .parse::<u64>()
                    .with_context(|| format!("BREADTH_HTTP_TIMEOUT_SECS must be an integer (got {s})"))?,
                None => defaults.http_timeout_secs,
            };

            Ok(Self {
                data_base_url: non_empty_var("BREADTH_DATA_BASE_URL"),
                data_dir: non_empty_var("BREADTH_DATA_DIR").unwrap_or(defaults.data_dir),
                latest_path: non_empty_var("BREADTH_LATEST_PATH").unwrap_or(defaults.latest_path),
                history_path: non_empty_var("BREADTH_HISTORY_PATH")
                    .unwrap_or(defaults.history_path),
                http_timeout_secs,
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_data_base_url(&self) -> anyhow::Result<&str> {
            self.data_base_url
                .as_deref()
                .context("BREADTH_DATA_BASE_URL is required")
        }

        pub fn document_paths(&self) -> crate::ingest::DocumentPaths {
            crate::ingest::DocumentPaths {
                latest: self.latest_path.clone(),
                history: self.history_path.clone(),
            }
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

}
