use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::farmer::{LoginReply, NewFarmer};

/// Trait abstraction for the hosted farmer-account backend.
///
/// Implementations only move data; deciding what a reply means for the
/// user is `AuthService`'s job. Transport or decode failures are
/// `CoreError::RemoteError` / `CoreError::Network`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait FarmerBackend: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Check credentials. A wrong password is an unsuccessful reply, not an error.
    async fn login(&self, mobile_number: &str, password: &str) -> Result<LoginReply, CoreError>;

    /// Whether an account with this mobile number already exists.
    async fn check_mobile_exists(&self, mobile_number: &str) -> Result<bool, CoreError>;

    /// Register a new farmer account.
    async fn create_farmer(&self, farmer: &NewFarmer) -> Result<(), CoreError>;
}
