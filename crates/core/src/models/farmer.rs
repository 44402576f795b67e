use serde::{Deserialize, Deserializer, Serialize};

/// A registered farmer as returned by the backend and kept as the local session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    /// Backend row id (numeric or UUID depending on the table)
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    pub mobile_number: String,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Payload for creating a farmer account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFarmer {
    pub name: String,
    pub mobile_number: String,
    pub password: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Sign-up form as entered by the user, including confirmation fields.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub mobile_number: String,
    pub confirm_mobile_number: String,
    pub password: String,
    pub confirm_password: String,
    /// Coordinates captured by the host app, if the user granted location access
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl SignupForm {
    /// Drop the confirmation fields once they have been checked.
    pub fn into_new_farmer(self) -> NewFarmer {
        NewFarmer {
            name: self.name.trim().to_string(),
            mobile_number: self.mobile_number.trim().to_string(),
            password: self.password,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Raw reply of the `login_farmer` RPC.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginReply {
    pub success: bool,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub farmer: Option<Farmer>,
}

/// `{success, message, data}`-shaped result handed back to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farmer: Option<Farmer>,
}

impl AuthResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            farmer: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            farmer: None,
        }
    }

    pub fn with_farmer(mut self, farmer: Farmer) -> Self {
        self.farmer = Some(farmer);
        self
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
