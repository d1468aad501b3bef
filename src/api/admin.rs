//! Admin endpoints: user management and platform statistics.

use super::client::{segment, ApiClient, RequestOptions};
use super::envelope;
use super::error::ApiError;
use super::types::{AdminStatistics, NewUser, Profile, Role, UpdateRoleRequest};

pub struct Admin<'a> {
    api: &'a ApiClient,
}

impl<'a> Admin<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// GET /admin/users
    pub async fn users(&self) -> Result<Vec<Profile>, ApiError> {
        let body = self.api.request("/admin/users", RequestOptions::get()).await?;
        envelope::unwrap(body, "users")
    }

    /// PATCH /admin/users/:id with the new role.
    pub async fn update_role(&self, id: &str, role: Role) -> Result<Profile, ApiError> {
        let path = format!("/admin/users/{}", segment(id));
        let options = RequestOptions::patch().json(&UpdateRoleRequest { role })?;
        let body = self.api.request(&path, options).await?;
        envelope::unwrap(body, "user")
    }

    /// POST /admin/users
    pub async fn create_user(&self, user: &NewUser) -> Result<Profile, ApiError> {
        let options = RequestOptions::post().json(user)?;
        let body = self.api.request("/admin/users", options).await?;
        envelope::unwrap(body, "user")
    }

    /// DELETE /admin/users/:id
    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/admin/users/{}", segment(id));
        self.api.request(&path, RequestOptions::delete()).await?;
        Ok(())
    }

    /// GET /admin/statistics
    pub async fn statistics(&self) -> Result<AdminStatistics, ApiError> {
        let body = self
            .api
            .request("/admin/statistics", RequestOptions::get())
            .await?;
        envelope::unwrap(body, "statistics")
    }
}
