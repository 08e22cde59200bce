//! Request/response hook chain
//!
//! Request hooks run in order before every transmission, resends included.
//! Response hooks run in order after every transmission and decide whether
//! the call is complete or the descriptor goes out again.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, HeaderValue};

use super::descriptor::RequestDescriptor;
use super::transport::ApiResponse;
use crate::error::ApiError;
use crate::navigation::{Navigator, View};
use crate::session::SessionStore;

/// Result of one transmission as seen by response hooks
pub type Outcome = std::result::Result<ApiResponse, ApiError>;

/// Decision of a response hook
#[derive(Debug)]
pub enum Disposition {
    /// Hand this outcome to the next hook, or to the caller
    Complete(Outcome),
    /// Send the descriptor again
    Resend,
}

/// Rewrites a request before it is sent. Must not fail.
pub trait RequestHook: Send + Sync {
    fn on_request(&self, request: &mut RequestDescriptor);
}

/// Inspects the outcome of a transmission.
///
/// A hook that returns [`Disposition::Resend`] must record that on the
/// descriptor so the next outcome is not resent forever.
#[async_trait]
pub trait ResponseHook: Send + Sync {
    async fn on_result(&self, request: &mut RequestDescriptor, outcome: Outcome) -> Disposition;
}

/// Decides whether a failure means the API is unreachable
pub type ConnectivityPolicy = Arc<dyn Fn(&ApiError) -> bool + Send + Sync>;

/// Default connectivity policy: no response at all means offline.
///
/// Aborted requests and refused connections land here too.
pub fn no_response(err: &ApiError) -> bool {
    !err.has_response()
}

/// Attaches the stored session token as a bearer credential
pub struct BearerAuth {
    session: Arc<dyn SessionStore>,
}

impl BearerAuth {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }
}

impl RequestHook for BearerAuth {
    fn on_request(&self, request: &mut RequestDescriptor) {
        let Some(token) = self.session.get() else {
            return;
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers.insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("Stored session token is not a valid header value, sending without it"),
        }
    }
}

/// One-shot retry with offline navigation once the retry is spent.
///
/// Only reads and timeouts are resent; a failed write is returned as is so
/// that side effects are never duplicated.
pub struct RetryOnce {
    navigator: Arc<dyn Navigator>,
    policy: ConnectivityPolicy,
}

impl RetryOnce {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self::with_policy(navigator, Arc::new(no_response))
    }

    pub fn with_policy(navigator: Arc<dyn Navigator>, policy: ConnectivityPolicy) -> Self {
        Self { navigator, policy }
    }
}

#[async_trait]
impl ResponseHook for RetryOnce {
    async fn on_result(&self, request: &mut RequestDescriptor, outcome: Outcome) -> Disposition {
        let err = match outcome {
            Ok(response) => return Disposition::Complete(Ok(response)),
            Err(err) => err,
        };

        if request.retried {
            if (self.policy)(&err) && self.navigator.enter_unless_current(View::Offline) {
                warn!(
                    "{} {} failed after retry with no response, switched to offline view",
                    request.method, request.path
                );
            }
            return Disposition::Complete(Err(err));
        }

        request.retried = true;

        if request.is_read() || err.is_timeout() {
            debug!("Retrying {} {} after: {}", request.method, request.path, err);
            return Disposition::Resend;
        }

        Disposition::Complete(Err(err))
    }
}
