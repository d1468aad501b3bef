//! Typed access to the EduLearn backend.
//!
//! `ApiClient` is the single gateway: auth header injection, payload
//! encoding and error typing live there. The resource groups below are thin
//! typed wrappers that decode the response envelope once per endpoint.

pub mod admin;
pub mod auth;
pub mod client;
pub mod envelope;
pub mod error;
pub mod lessons;
pub mod quizzes;
pub mod types;

pub use client::{ApiClient, RawBody, RequestOptions};
pub use error::ApiError;

impl ApiClient {
    pub fn auth(&self) -> auth::Auth<'_> {
        auth::Auth::new(self)
    }

    pub fn lessons(&self) -> lessons::Lessons<'_> {
        lessons::Lessons::new(self)
    }

    pub fn quizzes(&self) -> quizzes::Quizzes<'_> {
        quizzes::Quizzes::new(self)
    }

    pub fn admin(&self) -> admin::Admin<'_> {
        admin::Admin::new(self)
    }
}
