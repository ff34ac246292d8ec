use crate::config::Settings;
use crate::ingest::{DocumentError, DocumentSource};
use std::path::PathBuf;

/// Reads documents from the directory the upstream job writes into.
#[derive(Debug, Clone)]
pub struct FileDocumentSource {
    root: PathBuf,
}

impl FileDocumentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.data_dir)
    }
}

#[async_trait::async_trait]
impl DocumentSource for FileDocumentSource {
    fn source_name(&self) -> &'static str {
        "file"
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, DocumentError> {
        let full = self.root.join(path);
        tokio::fs::read(&full).await.map_err(|e| {
            tracing::warn!(path = %full.display(), error = %e, "document read failed");
            DocumentError::io(path, &e)
        })
    }
}
