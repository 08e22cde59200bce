//! Veritas API client
//!
//! Requests flow through an explicit hook chain:
//! - [`BearerAuth`] attaches the session token before every send
//! - [`RetryOnce`] resends a failed read (or a timeout) once, then switches
//!   the application to the offline view when nothing answers

pub mod api;
pub mod descriptor;
pub mod middleware;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod transport;
pub mod veritas;

pub use api::AuthApi;
pub use descriptor::{RequestBody, RequestDescriptor};
pub use middleware::{
    BearerAuth, ConnectivityPolicy, Disposition, Outcome, RequestHook, ResponseHook, RetryOnce,
    no_response,
};
pub use models::{AccessToken, EmployeeCounts, FirmSetup, PRACTICE_AREAS, SignupRequest};
pub use transport::{ApiResponse, ReqwestTransport, Transport};
pub use veritas::{VeritasClient, VeritasClientBuilder};
