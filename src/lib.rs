//! Client library for the EduLearn learning-management backend.
//!
//! - [`store`]: durable token/profile storage (keychain, file, memory)
//! - [`api`]: the request gateway and typed resource endpoints
//! - [`dashboard`]: per-role data loaders
//! - [`seed`]: sample catalogue seeding
//! - [`state`]: one run's session (credentials + client + cancellation)

pub mod api;
pub mod config;
pub mod dashboard;
pub mod seed;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, ApiError};
pub use config::ClientConfig;
pub use state::AppState;
pub use store::CredentialStore;
