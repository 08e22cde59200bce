//! Authentication API trait

use async_trait::async_trait;
use serde_json::Value;

use crate::client::models::{AccessToken, FirmSetup, SignupRequest};
use crate::error::Result;

/// Account and onboarding operations of the Veritas API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for an access token and start a session
    async fn login(&self, identifier: &str, secret: &str) -> Result<AccessToken>;

    /// Register a new user
    async fn signup(&self, profile: &SignupRequest) -> Result<Value>;

    /// Submit the firm configuration collected during onboarding
    async fn setup_firm(&self, firm: &FirmSetup) -> Result<Value>;

    /// End the current session
    async fn logout(&self) -> Result<()>;
}
