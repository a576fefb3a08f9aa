use thiserror::Error;

/// Failures talking to the remote collection. Rejected and transport failures
/// look the same to the user but are logged with their detail.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RemoteError {
    pub fn is_rejected(&self) -> bool {
        matches!(self, RemoteError::Rejected { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Rejected { status, .. } => Some(*status),
            RemoteError::Transport(err) => err.status().map(|s| s.as_u16()),
            RemoteError::Decode(_) => None,
        }
    }
}
