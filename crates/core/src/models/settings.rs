use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Storage key holding the JSON transaction collection.
pub const DEFAULT_TRANSACTIONS_KEY: &str = "farmer_transactions";

/// Storage key holding the logged-in farmer.
pub const DEFAULT_SESSION_KEY: &str = "farmer";

/// Application configuration.
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key under which the transaction collection is persisted.
    pub transactions_key: String,

    /// Key under which the current farmer session is persisted.
    pub session_key: String,

    /// Symbol prefixed to formatted amounts (e.g., "₹").
    pub currency_symbol: String,

    /// Remote backend; `None` runs the ledger offline (no login/signup).
    pub backend: Option<BackendSettings>,
}

/// Connection details for the hosted backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,

    /// Public (anon) API key sent with every RPC.
    pub anon_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transactions_key: DEFAULT_TRANSACTIONS_KEY.to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            currency_symbol: "₹".to_string(),
            backend: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::Deserialization(format!("Invalid settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.transactions_key.trim().is_empty() || self.session_key.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Storage keys must not be empty".into(),
            ));
        }
        if self.transactions_key == self.session_key {
            return Err(CoreError::ValidationError(
                "Transactions and session keys must differ".into(),
            ));
        }
        if let Some(backend) = &self.backend {
            if !backend.url.starts_with("http://") && !backend.url.starts_with("https://") {
                return Err(CoreError::ValidationError(format!(
                    "Backend URL must start with http:// or https://: {}",
                    backend.url
                )));
            }
        }
        Ok(())
    }
}
