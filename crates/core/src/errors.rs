use thiserror::Error;

/// Unified error type for the entire farm-ledger-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── User input ──────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Local storage ───────────────────────────────────────────────
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Remote backend ──────────────────────────────────────────────
    #[error("Remote error ({function}): {message}")]
    RemoteError {
        function: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),
}

impl CoreError {
    /// True for errors caused by bad user input rather than I/O.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::ValidationError(_))
    }

    /// Collapse storage-layer failures into `PersistenceError`, leaving
    /// everything else untouched.
    pub fn into_persistence(self) -> Self {
        match self {
            CoreError::Serialization(m)
            | CoreError::Deserialization(m)
            | CoreError::FileIO(m) => CoreError::PersistenceError(m),
            other => other,
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            CoreError::FileIO(e.to_string())
        } else {
            CoreError::Deserialization(e.to_string())
        }
    }
}

impl From<rust_decimal::Error> for CoreError {
    fn from(e: rust_decimal::Error) -> Self {
        CoreError::ValidationError(format!("Invalid amount: {e}"))
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters: backend URLs may carry the anon key.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
