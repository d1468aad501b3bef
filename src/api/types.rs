//! Request and response types for the EduLearn backend API.
//!
//! All structs use camelCase serialization to match the API's JSON format.
//! Documents coming from the backend carry their identifier as `_id`; the
//! envelope decoder folds it into `id` before these types see it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Account role. Decides which dashboard a user lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Learner,
    Instructor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Learner => "learner",
            Role::Instructor => "instructor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "learner" => Ok(Role::Learner),
            "instructor" => Ok(Role::Instructor),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// The authenticated user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Empty when the backend omits it.
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Login/register response: the token sits beside the envelope.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub data: AuthData,
}

#[derive(Debug, Deserialize)]
pub struct AuthData {
    pub user: Profile,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordRequest<'a> {
    pub password: &'a str,
}

/// Free-form `{ message }` acknowledgement (forgot/reset password).
#[derive(Debug, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Instructor id or populated instructor document.
    #[serde(default)]
    pub instructor: Option<Value>,
    #[serde(default)]
    pub created_by: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_text: String,
    pub options: Vec<String>,
    /// Hidden from learners by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_option_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(alias = "_id")]
    pub id: String,
    /// Lesson id or populated lesson document.
    #[serde(default)]
    pub lesson: Option<Value>,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub passing_score: Option<u32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Body of POST /quizzes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuiz {
    pub lesson: String,
    pub title: String,
    pub questions: Vec<Question>,
    #[serde(default = "default_passing_score")]
    pub passing_score: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_passing_score() -> u32 {
    70
}

fn default_active() -> bool {
    true
}

/// One answer per question, in question order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    pub selected_option_index: u32,
}

#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    pub answers: &'a [QuizAnswer],
}

/// Graded attempt returned by POST /quizzes/:id/submit.
///
/// Only the commonly present fields are typed; everything else the backend
/// sends is kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub passed: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Per-quiz attempt/pass aggregates from GET /quizzes/analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnalytics {
    #[serde(default)]
    pub quiz: Option<Value>,
    #[serde(default)]
    pub total_attempts: Option<u64>,
    #[serde(default)]
    pub pass_rate: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Platform-wide counters from GET /admin/statistics. Shape is backend-defined.
pub type AdminStatistics = serde_json::Map<String, Value>;

/// Body of POST /admin/users.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}
