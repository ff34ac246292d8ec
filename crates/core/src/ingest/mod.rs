use crate::domain::snapshot::{History, Snapshot};
use serde::de::DeserializeOwned;

pub mod error;
pub mod file;
pub mod http;

pub use error::DocumentError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPaths {
    pub latest: String,
    pub history: String,
}

/// Where the two dashboard documents come from. Every fetch must return the current copy.
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, DocumentError>;
}

pub async fn load<T: DeserializeOwned>(
    source: &dyn DocumentSource,
    path: &str,
) -> Result<T, DocumentError> {
    let body = source.fetch(path).await?;
    let doc = serde_json::from_slice::<T>(&body).map_err(|e| DocumentError::Parse {
        path: path.to_string(),
        source: e,
    })?;

    tracing::debug!(
        source = source.source_name(),
        path,
        bytes = body.len(),
        "document loaded"
    );
    Ok(doc)
}

/// Loads both documents concurrently. Either failure aborts the pair.
pub async fn load_dashboard(
    source: &dyn DocumentSource,
    paths: &DocumentPaths,
) -> Result<(Snapshot, History), DocumentError> {
    let (snapshot, history) = tokio::try_join!(
        load::<Snapshot>(source, &paths.latest),
        load::<History>(source, &paths.history),
    )?;

    tracing::info!(
        source = source.source_name(),
        latest = %paths.latest,
        history = %paths.history,
        points = history.len(),
        "dashboard documents loaded"
    );
    Ok((snapshot, history))
}
