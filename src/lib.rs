//! Veritas client library
//!
//! Authenticated access to the Veritas legal platform API: session token
//! storage, a bearer-token request hook, one-shot retry, and offline
//! navigation when the API cannot be reached.

pub mod client;
pub mod config;
pub mod error;
pub mod navigation;
pub mod session;

pub use client::{AuthApi, RequestDescriptor, VeritasClient};
pub use error::{ApiError, Error, Result};
pub use navigation::{MemoryNavigator, Navigator, Role, View};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
