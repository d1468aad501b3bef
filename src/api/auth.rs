//! Authentication endpoints.
//!
//! `login`, `register` and `me` persist what they receive into the
//! credential store. `logout` only tells the backend; clearing local
//! credentials is the caller's decision.

use super::client::{segment, ApiClient, RequestOptions};
use super::envelope;
use super::error::ApiError;
use super::types::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, MessageResponse, Profile,
    RegisterRequest, ResetPasswordRequest,
};

pub struct Auth<'a> {
    api: &'a ApiClient,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// POST /auth/login. Stores token and profile, returns the profile.
    pub async fn login(&self, email: &str, password: &str) -> Result<Profile, ApiError> {
        let options = RequestOptions::post().json(&LoginRequest { email, password })?;
        let body = self.api.request("/auth/login", options).await?;
        let profile = self.persist_session(body)?;
        log::info!("Logged in as {} ({})", profile.email.as_deref().unwrap_or("?"), profile.role);
        Ok(profile)
    }

    /// POST /auth/register. Same persistence as `login`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Profile, ApiError> {
        let options = RequestOptions::post().json(&RegisterRequest {
            name,
            email,
            password,
        })?;
        let body = self.api.request("/auth/register", options).await?;
        let profile = self.persist_session(body)?;
        log::info!("Registered {} ({})", profile.email.as_deref().unwrap_or("?"), profile.role);
        Ok(profile)
    }

    /// GET /auth/me. Replaces the stored profile with the fresh one.
    pub async fn me(&self) -> Result<Profile, ApiError> {
        let body = self.api.request("/auth/me", RequestOptions::get()).await?;
        let profile: Profile = envelope::unwrap(body, "user")?;
        self.api.credentials().set_user(Some(&profile))?;
        Ok(profile)
    }

    /// POST /auth/logout. Local credentials are left untouched.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.api.request("/auth/logout", RequestOptions::post()).await?;
        Ok(())
    }

    /// POST /auth/forgot-password. Returns the server's acknowledgement text.
    pub async fn forgot_password(&self, email: &str) -> Result<Option<String>, ApiError> {
        let options = RequestOptions::post().json(&ForgotPasswordRequest { email })?;
        let body = self.api.request("/auth/forgot-password", options).await?;
        Ok(acknowledgement(body))
    }

    /// PATCH /auth/reset-password/:token.
    pub async fn reset_password(
        &self,
        reset_token: &str,
        password: &str,
    ) -> Result<Option<String>, ApiError> {
        let path = format!("/auth/reset-password/{}", segment(reset_token));
        let options = RequestOptions::patch().json(&ResetPasswordRequest { password })?;
        let body = self.api.request(&path, options).await?;
        Ok(acknowledgement(body))
    }

    fn persist_session(&self, body: serde_json::Value) -> Result<Profile, ApiError> {
        let auth: AuthResponse = envelope::decode(body, "user")?;
        let credentials = self.api.credentials();
        credentials.set_token(Some(&auth.token))?;
        credentials.set_user(Some(&auth.data.user))?;
        Ok(auth.data.user)
    }
}

fn acknowledgement(body: serde_json::Value) -> Option<String> {
    serde_json::from_value::<MessageResponse>(body)
        .unwrap_or_default()
        .message
}
