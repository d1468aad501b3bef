//! Data loaders for the role dashboards.
//!
//! Staff dashboards (admin, instructor) always fetch quiz analytics first
//! and wait for it before issuing any other request: some backend builds
//! match `/quizzes/analytics` against `/quizzes/:id` when the two race.
//! Analytics is optional; everything else a staff dashboard needs is not.

use serde::Serialize;

use crate::api::types::{AdminStatistics, Lesson, Profile, Quiz, QuizAnalytics};
use crate::api::{ApiClient, ApiError};

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total_users: Option<u64>,
    pub total_lessons: usize,
    pub total_quizzes: usize,
}

/// Everything the admin and instructor dashboards render.
#[derive(Debug, Serialize)]
pub struct StaffDashboard {
    pub users: Vec<Profile>,
    pub lessons: Vec<Lesson>,
    pub quizzes: Vec<Quiz>,
    pub analytics: Vec<QuizAnalytics>,
    pub statistics: AdminStatistics,
    pub summary: Summary,
    /// Non-fatal problems the caller should surface.
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LearnerDashboard {
    pub user: Profile,
    pub lessons: Vec<Lesson>,
    pub quizzes: Vec<Quiz>,
}

#[derive(Debug, Serialize)]
pub struct ManagerDashboard {
    pub lessons: Vec<Lesson>,
    pub quizzes: Vec<Quiz>,
    pub analytics: Vec<QuizAnalytics>,
    pub warnings: Vec<String>,
}

pub async fn load_admin(api: &ApiClient) -> Result<StaffDashboard, ApiError> {
    load_staff(api).await
}

/// Instructors see the same aggregate view as admins.
pub async fn load_instructor(api: &ApiClient) -> Result<StaffDashboard, ApiError> {
    load_staff(api).await
}

async fn load_staff(api: &ApiClient) -> Result<StaffDashboard, ApiError> {
    let mut warnings = Vec::new();

    let analytics = match api.quizzes().analytics().await {
        Ok(analytics) => analytics,
        Err(ApiError::Cancelled) => return Err(ApiError::Cancelled),
        Err(e) => {
            log::warn!("Analytics unavailable, loading dashboard without it: {}", e);
            warnings.push(format!("Quiz analytics unavailable: {}", e.message()));
            Vec::new()
        }
    };

    let quizzes_api = api.quizzes();
    let lessons_api = api.lessons();
    let admin_api = api.admin();
    let (users, lessons, quizzes, statistics) = tokio::try_join!(
        admin_api.users(),
        lessons_api.list(None),
        quizzes_api.list(None),
        admin_api.statistics(),
    )?;

    let summary = Summary {
        total_users: statistics.get("totalUsers").and_then(|v| v.as_u64()),
        total_lessons: lessons.len(),
        total_quizzes: quizzes.len(),
    };

    Ok(StaffDashboard {
        users,
        lessons,
        quizzes,
        analytics,
        statistics,
        summary,
        warnings,
    })
}

pub async fn load_learner(api: &ApiClient) -> Result<LearnerDashboard, ApiError> {
    let lessons_api = api.lessons();
    let quizzes_api = api.quizzes();
    let auth_api = api.auth();
    let (lessons, quizzes, user) = tokio::try_join!(
        lessons_api.list(None),
        quizzes_api.list(None),
        auth_api.me(),
    )?;
    Ok(LearnerDashboard {
        user,
        lessons,
        quizzes,
    })
}

/// Manager view: every part falls back to empty on its own.
pub async fn load_manager(api: &ApiClient) -> Result<ManagerDashboard, ApiError> {
    let lessons_api = api.lessons();
    let quizzes_api = api.quizzes();
    let (lessons, quizzes, analytics) = tokio::join!(
        lessons_api.list(None),
        quizzes_api.list(None),
        quizzes_api.analytics(),
    );

    let mut warnings = Vec::new();
    let lessons = or_empty(lessons, "lessons", &mut warnings)?;
    let quizzes = or_empty(quizzes, "quizzes", &mut warnings)?;
    let analytics = or_empty(analytics, "analytics", &mut warnings)?;

    Ok(ManagerDashboard {
        lessons,
        quizzes,
        analytics,
        warnings,
    })
}

/// Empty list on failure, except cancellation which still aborts the load.
fn or_empty<T>(
    result: Result<Vec<T>, ApiError>,
    what: &str,
    warnings: &mut Vec<String>,
) -> Result<Vec<T>, ApiError> {
    match result {
        Ok(items) => Ok(items),
        Err(ApiError::Cancelled) => Err(ApiError::Cancelled),
        Err(e) => {
            log::warn!("Failed to load {}: {}", what, e);
            warnings.push(format!("Failed to load {}: {}", what, e.message()));
            Ok(Vec::new())
        }
    }
}
