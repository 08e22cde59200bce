//! API trait definitions

mod auth;

pub use auth::AuthApi;
