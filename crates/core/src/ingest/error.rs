/// Fatal to the render pass: nothing is drawn once a document fails.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to load {path}: {reason}")]
    Load {
        path: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DocumentError {
    pub fn status(path: &str, status: reqwest::StatusCode) -> Self {
        DocumentError::Load {
            path: path.to_string(),
            status: Some(status.as_u16()),
            reason: format!("HTTP {status}"),
        }
    }

    pub fn transport(path: &str, err: &reqwest::Error) -> Self {
        DocumentError::Load {
            path: path.to_string(),
            status: err.status().map(|s| s.as_u16()),
            reason: err.to_string(),
        }
    }

    pub fn io(path: &str, err: &std::io::Error) -> Self {
        DocumentError::Load {
            path: path.to_string(),
            status: None,
            reason: err.to_string(),
        }
    }

    /// The document that failed.
    pub fn path(&self) -> &str {
        match self {
            DocumentError::Load { path, .. } | DocumentError::Parse { path, .. } => path,
        }
    }

    pub fn is_load(&self) -> bool {
        matches!(self, DocumentError::Load { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, DocumentError::Parse { .. })
    }
}
