//! Veritas API data models

mod auth;
mod firm;

pub use auth::{AccessToken, SignupRequest};
pub use firm::{EmployeeCounts, FirmSetup, PRACTICE_AREAS};
