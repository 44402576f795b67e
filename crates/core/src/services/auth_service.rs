use std::sync::Arc;

use log::{error, info, warn};

use crate::errors::CoreError;
use crate::models::farmer::{AuthResponse, Farmer, SignupForm};
use crate::models::settings::DEFAULT_SESSION_KEY;
use crate::remote::traits::FarmerBackend;
use crate::storage::traits::KeyValueStore;

/// Sign-up, login and the locally persisted farmer session.
///
/// Form mistakes (blank fields, mismatched confirmations) are returned as
/// `ValidationError` before the backend is contacted. Backend failures are
/// logged and turned into an unsuccessful [`AuthResponse`] with a message
/// suitable for the user.
pub struct AuthService {
    backend: Arc<dyn FarmerBackend>,
    storage: Arc<dyn KeyValueStore>,
    session_key: String,
}

impl AuthService {
    pub fn new(backend: Arc<dyn FarmerBackend>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_session_key(backend, storage, DEFAULT_SESSION_KEY)
    }

    pub fn with_session_key(
        backend: Arc<dyn FarmerBackend>,
        storage: Arc<dyn KeyValueStore>,
        session_key: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            storage,
            session_key: session_key.into(),
        }
    }

    /// Register a new farmer.
    pub async fn signup(&self, form: SignupForm) -> Result<AuthResponse, CoreError> {
        Self::validate_signup(&form)?;
        let farmer = form.into_new_farmer();

        match self.backend.check_mobile_exists(&farmer.mobile_number).await {
            Ok(true) => return Ok(AuthResponse::failure("Mobile number already registered")),
            Ok(false) => {}
            Err(e) => {
                error!("Check mobile error ({}): {e}", self.backend.name());
                return Ok(AuthResponse::failure("Error checking mobile number"));
            }
        }

        if let Err(e) = self.backend.create_farmer(&farmer).await {
            error!("Signup error ({}): {e}", self.backend.name());
            return Ok(AuthResponse::failure("Failed to create account"));
        }

        info!("Registered farmer {}", farmer.mobile_number);
        Ok(AuthResponse::ok("Signup successful"))
    }

    /// Check credentials and, on success, persist the farmer as the session.
    pub async fn login(&self, mobile_number: &str, password: &str) -> Result<AuthResponse, CoreError> {
        let mobile_number = mobile_number.trim();
        if mobile_number.is_empty() || password.is_empty() {
            return Err(CoreError::ValidationError(
                "Please enter mobile number and password".into(),
            ));
        }

        let reply = match self.backend.login(mobile_number, password).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("RPC error ({}): {e}", self.backend.name());
                return Ok(AuthResponse::failure("Login failed. Please try again."));
            }
        };

        if !reply.success {
            return Ok(AuthResponse::failure(reply.message));
        }

        let Some(farmer) = reply.farmer else {
            warn!("Login reply for {mobile_number} reported success without farmer data");
            return Ok(AuthResponse::failure("Login failed. Please try again."));
        };

        if let Err(e) = self.save_session(&farmer).await {
            error!("Error logging in: {e}");
            return Ok(AuthResponse::failure("An error occurred during login"));
        }

        Ok(AuthResponse::ok("Login successful").with_farmer(farmer))
    }

    /// The logged-in farmer, if any. Unreadable sessions are logged and
    /// treated as logged out.
    pub async fn current_farmer(&self) -> Option<Farmer> {
        let bytes = match self.storage.get(&self.session_key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                error!("Error getting current farmer: {e}");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(farmer) => Some(farmer),
            Err(e) => {
                error!("Error getting current farmer: {e}");
                None
            }
        }
    }

    pub async fn logout(&self) -> AuthResponse {
        match self.storage.remove(&self.session_key).await {
            Ok(()) => AuthResponse::ok("Logged out"),
            Err(e) => {
                error!("Error logging out: {e}");
                AuthResponse::failure("Failed to log out")
            }
        }
    }

    fn validate_signup(form: &SignupForm) -> Result<(), CoreError> {
        if form.name.trim().is_empty() {
            return Err(CoreError::ValidationError("Please enter your name".into()));
        }
        if form.mobile_number.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Please enter your mobile number".into(),
            ));
        }
        if form.password.is_empty() {
            return Err(CoreError::ValidationError("Please enter a password".into()));
        }
        if form.mobile_number.trim() != form.confirm_mobile_number.trim() {
            return Err(CoreError::ValidationError("Mobile numbers don't match!".into()));
        }
        if form.password != form.confirm_password {
            return Err(CoreError::ValidationError("Passwords don't match!".into()));
        }
        Ok(())
    }

    async fn save_session(&self, farmer: &Farmer) -> Result<(), CoreError> {
        let bytes = serde_json::to_vec(farmer)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize farmer: {e}")))?;
        self.storage
            .set(&self.session_key, &bytes)
            .await
            .map_err(CoreError::into_persistence)
    }
}
