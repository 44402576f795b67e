use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::farmer::{LoginReply, NewFarmer};
use crate::models::settings::BackendSettings;
use super::traits::FarmerBackend;

pub const LOGIN_FN: &str = "login_farmer";
pub const CHECK_MOBILE_FN: &str = "check_mobile_exists";
pub const CREATE_FARMER_FN: &str = "create_farmer";

/// Supabase (PostgREST) backend calling database RPC functions.
///
/// - **Endpoint**: `POST {url}/rest/v1/rpc/{function}` with a JSON body
/// - **Auth**: the project's anon key, sent both as `apikey` and as bearer token
/// - **Functions**: `login_farmer`, `check_mobile_exists`, `create_farmer`
pub struct SupabaseBackend {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseBackend {
    pub fn new(settings: &BackendSettings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: settings.url.trim_end_matches('/').to_string(),
            anon_key: settings.anon_key.clone(),
        }
    }

    /// Full URL of an RPC function.
    pub fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{function}", self.base_url)
    }

    async fn send(&self, function: &str, params: &Value) -> Result<Response, CoreError> {
        let resp = self
            .client
            .post(self.rpc_url(function))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CoreError::RemoteError {
                function: function.into(),
                message: format!("HTTP {status}: {body}"),
            });
        }
        Ok(resp)
    }

    async fn call<T: DeserializeOwned>(&self, function: &str, params: &Value) -> Result<T, CoreError> {
        self.send(function, params)
            .await?
            .json()
            .await
            .map_err(|e| CoreError::RemoteError {
                function: function.into(),
                message: format!("Failed to parse response: {e}"),
            })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl FarmerBackend for SupabaseBackend {
    fn name(&self) -> &str {
        "Supabase"
    }

    async fn login(&self, mobile_number: &str, password: &str) -> Result<LoginReply, CoreError> {
        let params = json!({
            "p_mobile_number": mobile_number,
            "p_password": password,
        });
        self.call(LOGIN_FN, &params).await
    }

    async fn check_mobile_exists(&self, mobile_number: &str) -> Result<bool, CoreError> {
        let params = json!({ "p_mobile_number": mobile_number });
        self.call(CHECK_MOBILE_FN, &params).await
    }

    async fn create_farmer(&self, farmer: &NewFarmer) -> Result<(), CoreError> {
        let params = json!({
            "p_name": farmer.name,
            "p_mobile_number": farmer.mobile_number,
            "p_password": farmer.password,
            "p_latitude": farmer.latitude,
            "p_longitude": farmer.longitude,
        });
        // The function's return value carries nothing we need.
        self.send(CREATE_FARMER_FN, &params).await?;
        Ok(())
    }
}
