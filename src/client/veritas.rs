//! Veritas API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api::AuthApi;
use super::descriptor::RequestDescriptor;
use super::middleware::{
    BearerAuth, ConnectivityPolicy, Disposition, Outcome, RequestHook, ResponseHook, RetryOnce,
};
use super::models::{AccessToken, FirmSetup, SignupRequest};
use super::transport::{ApiResponse, ReqwestTransport, Transport};
use crate::config::{API_BASE_PATH, DEFAULT_API_HOST};
use crate::error::{ApiError, GENERIC_AUTH_FAILURE, Result};
use crate::navigation::{MemoryNavigator, Navigator, View};
use crate::session::{MemorySessionStore, SessionStore};

const LOGIN_PATH: &str = "/auth/login";
const SIGNUP_PATH: &str = "/auth/signup";
const SETUP_FIRM_PATH: &str = "/auth/setup-firm";

/// Resends allowed per logical request, whatever the hooks ask for
const MAX_RESENDS: usize = 1;

/// Authenticated Veritas API client.
///
/// Every call goes through the hook chain: the session token is attached
/// before sending, and a failed call gets at most one automatic resend.
pub struct VeritasClient {
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    request_hooks: Vec<Arc<dyn RequestHook>>,
    response_hooks: Vec<Arc<dyn ResponseHook>>,
}

/// Builder for [`VeritasClient`]
#[derive(Default)]
pub struct VeritasClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
    session: Option<Arc<dyn SessionStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    policy: Option<ConnectivityPolicy>,
    request_hooks: Vec<Arc<dyn RequestHook>>,
    response_hooks: Vec<Arc<dyn ResponseHook>>,
}

impl VeritasClientBuilder {
    /// Base URL including the API prefix; ignored when a transport is supplied
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Request timeout for the default transport
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn session(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Replace the rule deciding when a spent retry means "offline"
    pub fn connectivity_policy(mut self, policy: ConnectivityPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Append a request hook after the bearer hook
    pub fn request_hook(mut self, hook: Arc<dyn RequestHook>) -> Self {
        self.request_hooks.push(hook);
        self
    }

    /// Append a response hook after the retry hook
    pub fn response_hook(mut self, hook: Arc<dyn ResponseHook>) -> Self {
        self.response_hooks.push(hook);
        self
    }

    pub fn build(self) -> Result<VeritasClient> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let base_url = self
                    .base_url
                    .unwrap_or_else(|| format!("{}{}", DEFAULT_API_HOST, API_BASE_PATH));
                Arc::new(ReqwestTransport::new(base_url, self.timeout)?)
            }
        };
        let session = self
            .session
            .unwrap_or_else(|| Arc::new(MemorySessionStore::new()));
        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(MemoryNavigator::default()));

        let retry = match self.policy {
            Some(policy) => RetryOnce::with_policy(navigator.clone(), policy),
            None => RetryOnce::new(navigator.clone()),
        };

        let mut request_hooks: Vec<Arc<dyn RequestHook>> =
            vec![Arc::new(BearerAuth::new(session.clone()))];
        request_hooks.extend(self.request_hooks);

        let mut response_hooks: Vec<Arc<dyn ResponseHook>> = vec![Arc::new(retry)];
        response_hooks.extend(self.response_hooks);

        Ok(VeritasClient {
            transport,
            session,
            navigator,
            request_hooks,
            response_hooks,
        })
    }
}

impl VeritasClient {
    pub fn builder() -> VeritasClientBuilder {
        VeritasClientBuilder::default()
    }

    /// Client against `base_url` with an in-memory session
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Send a request through the hook chain.
    ///
    /// Resolves with the first successful response, or with the failure that
    /// ended the chain. A resend requested after the limit is spent is
    /// ignored and the last transmission's outcome is returned.
    pub async fn request(&self, descriptor: RequestDescriptor) -> Result<ApiResponse> {
        let mut descriptor = descriptor;
        let mut resends = 0;

        loop {
            for hook in &self.request_hooks {
                hook.on_request(&mut descriptor);
            }

            let outcome = self.transport.send(&descriptor).await;
            let last = (resends >= MAX_RESENDS).then(|| outcome.clone());

            match (self.settle(&mut descriptor, outcome).await, last) {
                (Some(outcome), _) => return outcome.map_err(Into::into),
                (None, Some(last)) => {
                    warn!(
                        "Resend limit reached for {} {}, returning last result",
                        descriptor.method, descriptor.path
                    );
                    return last.map_err(Into::into);
                }
                (None, None) => {
                    resends += 1;
                    debug!("Resending {} {}", descriptor.method, descriptor.path);
                }
            }
        }
    }

    /// Run response hooks; `None` means the descriptor must be resent
    async fn settle(&self, descriptor: &mut RequestDescriptor, mut outcome: Outcome) -> Option<Outcome> {
        for hook in &self.response_hooks {
            match hook.on_result(descriptor, outcome).await {
                Disposition::Complete(next) => outcome = next,
                Disposition::Resend => return None,
            }
        }
        Some(outcome)
    }

    /// Send a request and deserialize the payload
    pub async fn request_json<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> Result<T> {
        let response = self.request(descriptor).await?;
        serde_json::from_value(response.body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into())
    }
}

#[async_trait]
impl AuthApi for VeritasClient {
    async fn login(&self, identifier: &str, secret: &str) -> Result<AccessToken> {
        let descriptor =
            RequestDescriptor::post_form(LOGIN_PATH, [("username", identifier), ("password", secret)]);

        let token: AccessToken = match self.request_json(descriptor).await {
            Ok(token) => token,
            Err(crate::error::Error::Api(ApiError::Status { detail, .. })) => {
                let message = detail.unwrap_or_else(|| GENERIC_AUTH_FAILURE.to_string());
                return Err(ApiError::AuthenticationFailed(message).into());
            }
            Err(e) => return Err(e),
        };

        self.session.set(&token.access_token)?;
        info!("Signed in as {}", identifier);
        self.navigator.navigate(View::Dashboard);

        Ok(token)
    }

    async fn signup(&self, profile: &SignupRequest) -> Result<Value> {
        let descriptor = RequestDescriptor::post_json(SIGNUP_PATH, profile)?;
        let response = self.request(descriptor).await?;
        info!("Registered {}", profile.email);
        Ok(response.body)
    }

    async fn setup_firm(&self, firm: &FirmSetup) -> Result<Value> {
        let descriptor = RequestDescriptor::post_json(SETUP_FIRM_PATH, firm)?;
        let response = self.request(descriptor).await?;
        info!("Firm '{}' configured", firm.name);
        self.navigator.navigate(View::Dashboard);
        Ok(response.body)
    }

    async fn logout(&self) -> Result<()> {
        self.session.clear()?;
        self.navigator.navigate(View::Login);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::descriptor::RequestBody;
    use crate::client::mock::MockTransport;
    use crate::error::Error;
    use crate::navigation::Role;
    use reqwest::header::{HeaderValue, USER_AGENT};
    use reqwest::{Method, StatusCode};
    use serde_json::json;

    struct Harness {
        client: VeritasClient,
        transport: Arc<MockTransport>,
        session: Arc<MemorySessionStore>,
        navigator: Arc<MemoryNavigator>,
    }

    fn harness(transport: MockTransport, session: MemorySessionStore) -> Harness {
        let transport = Arc::new(transport);
        let session = Arc::new(session);
        let navigator = Arc::new(MemoryNavigator::new(View::Dashboard));
        let client = VeritasClient::builder()
            .transport(transport.clone())
            .session(session.clone())
            .navigator(navigator.clone())
            .build()
            .unwrap();

        Harness {
            client,
            transport,
            session,
            navigator,
        }
    }

    #[test]
    fn test_client_creation() {
        assert!(VeritasClient::new("http://localhost:8000/api/v1").is_ok());
    }

    #[tokio::test]
    async fn test_token_attached_when_present() {
        let h = harness(
            MockTransport::new().then_ok(json!([])),
            MemorySessionStore::with_token("tok123"),
        );

        h.client.request(RequestDescriptor::get("/cases")).await.unwrap();

        let sent = h.transport.sent();
        assert_eq!(sent[0].authorization(), Some("Bearer tok123"));
    }

    #[tokio::test]
    async fn test_no_header_without_token() {
        let h = harness(MockTransport::new().then_ok(json!([])), MemorySessionStore::new());

        h.client.request(RequestDescriptor::get("/cases")).await.unwrap();

        assert!(h.transport.sent()[0].authorization().is_none());
    }

    #[tokio::test]
    async fn test_success_passthrough() {
        let payload = json!({ "cases": [{ "id": "c-1", "title": "State v. Doe" }] });
        let h = harness(MockTransport::new().then_ok(payload.clone()), MemorySessionStore::new());

        let response = h.client.request(RequestDescriptor::get("/cases")).await.unwrap();

        assert_eq!(response.body, payload);
        assert_eq!(h.transport.attempts(), 1);
        assert!(!h.transport.sent()[0].retried);
        assert!(h.navigator.history().is_empty());
    }

    #[tokio::test]
    async fn test_failing_read_resent_then_succeeds() {
        let h = harness(
            MockTransport::new()
                .then_status(StatusCode::SERVICE_UNAVAILABLE, None)
                .then_ok(json!({ "ok": true })),
            MemorySessionStore::with_token("tok123"),
        );

        let response = h.client.request(RequestDescriptor::get("/tasks")).await.unwrap();

        assert_eq!(response.body, json!({ "ok": true }));
        let sent = h.transport.sent();
        assert_eq!(sent.len(), 2);
        assert!(!sent[0].retried);
        assert!(sent[1].retried);
        // Resends pass through the request hooks again
        assert_eq!(sent[1].authorization(), Some("Bearer tok123"));
    }

    #[tokio::test]
    async fn test_at_most_one_resend() {
        let h = harness(
            MockTransport::new()
                .then_status(StatusCode::BAD_GATEWAY, None)
                .then_status(StatusCode::BAD_GATEWAY, None)
                .then_ok(json!({ "never": "reached" })),
            MemorySessionStore::new(),
        );

        let err = h.client.request(RequestDescriptor::get("/calendar")).await.unwrap_err();

        assert_eq!(h.transport.attempts(), 2);
        assert_eq!(err.as_api().and_then(ApiError::status), Some(StatusCode::BAD_GATEWAY));
        assert!(h.navigator.history().is_empty());
    }

    #[tokio::test]
    async fn test_failing_post_rejects_immediately() {
        let h = harness(
            MockTransport::new()
                .then_status(StatusCode::BAD_REQUEST, Some("Email already registered"))
                .then_ok(json!({})),
            MemorySessionStore::new(),
        );
        let profile = SignupRequest {
            email: "a@court.gov".to_string(),
            password: "secret".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Byron".to_string(),
            role: Role::Lawyer,
        };

        let err = h.client.signup(&profile).await.unwrap_err();

        assert_eq!(h.transport.attempts(), 1);
        assert!(err.to_string().contains("Email already registered"));
    }

    #[tokio::test]
    async fn test_dropped_post_is_not_resent_and_stays_online() {
        let h = harness(MockTransport::new().then_drop(), MemorySessionStore::new());

        let err = h
            .client
            .setup_firm(&FirmSetup::new("Firm", "NY"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::NoResponse(_))));
        assert_eq!(h.transport.attempts(), 1);
        assert_eq!(h.navigator.current(), View::Dashboard);
    }

    #[tokio::test]
    async fn test_timed_out_post_is_resent_once() {
        let h = harness(
            MockTransport::new().then_timeout().then_ok(json!({ "id": "firm-1" })),
            MemorySessionStore::new(),
        );

        let ack = h.client.setup_firm(&FirmSetup::new("Firm", "NY")).await.unwrap();

        assert_eq!(ack, json!({ "id": "firm-1" }));
        assert_eq!(h.transport.attempts(), 2);
    }

    #[tokio::test]
    async fn test_dropped_read_twice_goes_offline() {
        let h = harness(
            MockTransport::new().then_drop().then_drop(),
            MemorySessionStore::new(),
        );

        let err = h.client.request(RequestDescriptor::get("/cases")).await.unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::NoResponse(_))));
        assert_eq!(h.transport.attempts(), 2);
        assert_eq!(h.navigator.current(), View::Offline);
        assert_eq!(h.navigator.visits(View::Offline), 1);
    }

    #[tokio::test]
    async fn test_offline_navigation_not_repeated() {
        let h = harness(
            MockTransport::new().then_drop().then_drop().then_drop().then_drop(),
            MemorySessionStore::new(),
        );

        let _ = h.client.request(RequestDescriptor::get("/cases")).await;
        let _ = h.client.request(RequestDescriptor::get("/tasks")).await;

        assert_eq!(h.transport.attempts(), 4);
        assert_eq!(h.navigator.visits(View::Offline), 1);
    }

    #[tokio::test]
    async fn test_login_stores_token_and_sends_form() {
        let h = harness(
            MockTransport::new()
                .then_ok(json!({ "access_token": "tok123", "token_type": "bearer" }))
                .then_ok(json!({ "id": "firm-1" })),
            MemorySessionStore::new(),
        );

        let token = h.client.login("a@court.gov", "secret").await.unwrap();
        assert_eq!(token.access_token, "tok123");
        assert_eq!(h.session.get().as_deref(), Some("tok123"));
        assert_eq!(h.navigator.current(), View::Dashboard);

        h.client.setup_firm(&FirmSetup::new("Firm", "NY")).await.unwrap();

        let sent = h.transport.sent();
        assert_eq!(sent[0].path, "/auth/login");
        assert!(sent[0].authorization().is_none());
        assert_eq!(
            sent[0].body,
            RequestBody::Form(vec![
                ("username".to_string(), "a@court.gov".to_string()),
                ("password".to_string(), "secret".to_string()),
            ])
        );
        assert_eq!(sent[1].path, "/auth/setup-firm");
        assert_eq!(sent[1].authorization(), Some("Bearer tok123"));
    }

    #[tokio::test]
    async fn test_login_rejection_uses_server_detail() {
        let h = harness(
            MockTransport::new().then_status(StatusCode::UNAUTHORIZED, Some("Incorrect email or password")),
            MemorySessionStore::new(),
        );

        let err = h.client.login("a@court.gov", "wrong").await.unwrap_err();

        assert_eq!(err.to_string(), "Incorrect email or password");
        assert!(h.session.get().is_none());
        assert_eq!(h.transport.attempts(), 1);
    }

    #[tokio::test]
    async fn test_login_rejection_without_detail_is_generic() {
        let h = harness(
            MockTransport::new().then_status(StatusCode::INTERNAL_SERVER_ERROR, None),
            MemorySessionStore::new(),
        );

        let err = h.client.login("a@court.gov", "secret").await.unwrap_err();

        assert!(matches!(&err, Error::Api(ApiError::AuthenticationFailed(_))));
        assert_eq!(err.to_string(), GENERIC_AUTH_FAILURE);
    }

    #[tokio::test]
    async fn test_login_with_malformed_payload() {
        let h = harness(
            MockTransport::new().then_ok(json!({ "token": "wrong-field" })),
            MemorySessionStore::new(),
        );

        let err = h.client.login("a@court.gov", "secret").await.unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::InvalidResponse(_))));
        assert!(h.session.get().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let h = harness(MockTransport::new(), MemorySessionStore::with_token("tok123"));

        h.client.logout().await.unwrap();

        assert!(h.session.get().is_none());
        assert_eq!(h.navigator.current(), View::Login);
        assert_eq!(h.transport.attempts(), 0);
    }

    #[tokio::test]
    async fn test_extra_request_hook_runs_after_bearer() {
        struct Tag;
        impl RequestHook for Tag {
            fn on_request(&self, request: &mut RequestDescriptor) {
                let seen = request.authorization().unwrap_or("none").to_string();
                request
                    .headers
                    .insert(USER_AGENT, HeaderValue::from_str(&format!("veritas ({})", seen)).unwrap());
            }
        }

        let transport = Arc::new(MockTransport::new().then_ok(json!(null)));
        let client = VeritasClient::builder()
            .transport(transport.clone())
            .session(Arc::new(MemorySessionStore::with_token("t")))
            .request_hook(Arc::new(Tag))
            .build()
            .unwrap();

        client.request(RequestDescriptor::get("/")).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].headers.get(USER_AGENT).unwrap(), "veritas (Bearer t)");
    }

    #[tokio::test]
    async fn test_failing_put_and_delete_are_not_resent() {
        for method in [Method::PUT, Method::DELETE] {
            let h = harness(
                MockTransport::new()
                    .then_status(StatusCode::CONFLICT, Some("Case is closed"))
                    .then_ok(json!({})),
                MemorySessionStore::new(),
            );

            let err = h
                .client
                .request(RequestDescriptor::new(method.clone(), "/cases/c-1"))
                .await
                .unwrap_err();

            assert_eq!(h.transport.attempts(), 1, "{} was resent", method);
            assert_eq!(err.as_api().and_then(ApiError::status), Some(StatusCode::CONFLICT));
        }
    }

    #[tokio::test]
    async fn test_greedy_response_hook_cannot_exceed_resend_limit() {
        struct AlwaysResend;
        #[async_trait]
        impl ResponseHook for AlwaysResend {
            async fn on_result(&self, _request: &mut RequestDescriptor, _outcome: Outcome) -> Disposition {
                Disposition::Resend
            }
        }

        let transport = Arc::new(
            MockTransport::new()
                .then_ok(json!({ "attempt": 1 }))
                .then_ok(json!({ "attempt": 2 }))
                .then_ok(json!({ "attempt": 3 })),
        );
        let client = VeritasClient::builder()
            .transport(transport.clone())
            .response_hook(Arc::new(AlwaysResend))
            .build()
            .unwrap();

        let response = client.request(RequestDescriptor::get("/cases")).await.unwrap();

        assert_eq!(transport.attempts(), 2);
        assert_eq!(response.body, json!({ "attempt": 2 }));
    }
}
