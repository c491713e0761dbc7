use thiserror::Error;

/// Failures reported by a dictionary backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    // ============================================================
    // Transport
    // ============================================================
    #[error("Network error: {0}")]
    Transport(String),

    // ============================================================
    // Service responses
    // ============================================================
    #[error("Not authenticated{}", format_detail(.detail))]
    Unauthorized { detail: Option<String> },

    #[error("Request failed with status {status}{}", format_detail(.detail))]
    Status { status: u16, detail: Option<String> },

    #[error("Invalid response: {0}")]
    Decode(String),

    // ============================================================
    // Client-side
    // ============================================================
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

fn format_detail(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl BackendError {
    /// Human-readable detail sent by the service, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            BackendError::Status { detail, .. } | BackendError::Unauthorized { detail } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BackendError::Unauthorized { .. })
    }
}
