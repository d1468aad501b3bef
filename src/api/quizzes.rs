//! Quiz endpoints.

use serde_json::Value;

use super::client::{segment, ApiClient, RequestOptions};
use super::envelope;
use super::error::ApiError;
use super::types::{NewQuiz, Quiz, QuizAnalytics, QuizAnswer, QuizResult, SubmitRequest};

pub struct Quizzes<'a> {
    api: &'a ApiClient,
}

impl<'a> Quizzes<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// GET /quizzes, optionally only those of one instructor.
    pub async fn list(&self, instructor: Option<&str>) -> Result<Vec<Quiz>, ApiError> {
        let path = match instructor {
            Some(id) => format!("/quizzes?instructor={}", segment(id)),
            None => "/quizzes".to_string(),
        };
        let body = self.api.request(&path, RequestOptions::get()).await?;
        envelope::unwrap(body, "quizzes")
    }

    pub async fn get(&self, id: &str) -> Result<Quiz, ApiError> {
        let path = format!("/quizzes/{}", segment(id));
        let body = self.api.request(&path, RequestOptions::get()).await?;
        envelope::unwrap(body, "quiz")
    }

    /// GET /quizzes/lesson/:lessonId
    pub async fn by_lesson(&self, lesson_id: &str) -> Result<Quiz, ApiError> {
        let path = format!("/quizzes/lesson/{}", segment(lesson_id));
        let body = self.api.request(&path, RequestOptions::get()).await?;
        envelope::unwrap(body, "quiz")
    }

    pub async fn create(&self, quiz: &NewQuiz) -> Result<Quiz, ApiError> {
        let options = RequestOptions::post().json(quiz)?;
        let body = self.api.request("/quizzes", options).await?;
        envelope::unwrap(body, "quiz")
    }

    /// PATCH /quizzes/:id with any subset of quiz fields.
    pub async fn update(&self, id: &str, changes: &Value) -> Result<Quiz, ApiError> {
        let path = format!("/quizzes/{}", segment(id));
        let body = self
            .api
            .request(&path, RequestOptions::patch().json(changes)?)
            .await?;
        envelope::unwrap(body, "quiz")
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/quizzes/{}", segment(id));
        self.api.request(&path, RequestOptions::delete()).await?;
        Ok(())
    }

    /// POST /quizzes/:id/submit. `answers` must follow question order.
    pub async fn submit(&self, id: &str, answers: &[QuizAnswer]) -> Result<QuizResult, ApiError> {
        let path = format!("/quizzes/{}/submit", segment(id));
        let options = RequestOptions::post().json(&SubmitRequest { answers })?;
        let body = self.api.request(&path, options).await?;
        envelope::unwrap(body, "result")
    }

    /// GET /quizzes/analytics
    ///
    /// The backend resolves `/quizzes/:id` before this route on some
    /// deployments; dashboard loaders issue this call before any other
    /// quiz request for that reason.
    pub async fn analytics(&self) -> Result<Vec<QuizAnalytics>, ApiError> {
        let body = self
            .api
            .request("/quizzes/analytics", RequestOptions::get())
            .await?;
        envelope::unwrap(body, "analytics")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api::types::Question;
    use crate::store::CredentialStore;
    use crate::testing::{MockServer, Reply};

    #[tokio::test]
    async fn test_submit_sends_ordered_answers() {
        let server = MockServer::start().await;
        server.on(
            "POST",
            "/quizzes/q-1/submit",
            Reply::json(200, json!({"data": {"result": {"score": 100, "passed": true, "attempt": "a-1"}}})),
        );
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        let answers = [QuizAnswer {
            selected_option_index: 2,
        }];
        let result = api.quizzes().submit("q-1", &answers).await.unwrap();

        assert_eq!(result.passed, Some(true));
        assert_eq!(result.score, Some(100.0));
        assert_eq!(result.extra["attempt"], "a-1");
        let received = &server.received()[0];
        assert_eq!(received.method, "POST");
        assert_eq!(received.path, "/quizzes/q-1/submit");
        assert_eq!(received.json(), json!({"answers": [{"selectedOptionIndex": 2}]}));
    }

    #[tokio::test]
    async fn test_by_lesson_and_get() {
        let server = MockServer::start().await;
        let quiz = json!({"_id": "q-1", "lesson": "l-1", "title": "Basics", "questions": [
            {"questionText": "?", "options": ["a", "b"]}
        ]});
        server.on("GET", "/quizzes/lesson/l-1", Reply::json(200, json!({"data": {"quiz": quiz}})));
        server.on("GET", "/quizzes/q-1", Reply::json(200, json!({"data": {"quiz": quiz}})));
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        let by_lesson = api.quizzes().by_lesson("l-1").await.unwrap();
        let by_id = api.quizzes().get("q-1").await.unwrap();

        assert_eq!(by_lesson.id, "q-1");
        assert_eq!(by_id.questions.len(), 1);
        assert_eq!(by_id.questions[0].correct_option_index, None);
    }

    #[tokio::test]
    async fn test_create_posts_json() {
        let server = MockServer::start().await;
        server.on(
            "POST",
            "/quizzes",
            Reply::json(201, json!({"data": {"quiz": {"_id": "q-2", "title": "New"}}})),
        );
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        let quiz = NewQuiz {
            lesson: "l-1".to_string(),
            title: "New".to_string(),
            questions: vec![Question {
                question_text: "Pick".to_string(),
                options: vec!["x".to_string(), "y".to_string()],
                correct_option_index: Some(0),
                points: Some(1),
            }],
            passing_score: 70,
            is_active: true,
        };
        let created = api.quizzes().create(&quiz).await.unwrap();

        assert_eq!(created.id, "q-2");
        let sent = server.received()[0].json();
        assert_eq!(sent["lesson"], "l-1");
        assert_eq!(sent["passingScore"], 70);
    }

    #[tokio::test]
    async fn test_analytics_list() {
        let server = MockServer::start().await;
        server.on(
            "GET",
            "/quizzes/analytics",
            Reply::json(200, json!({"data": {"analytics": [
                {"quiz": "q-1", "totalAttempts": 12, "passRate": 0.75, "averageScore": 81}
            ]}})),
        );
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        let analytics = api.quizzes().analytics().await.unwrap();

        assert_eq!(analytics.len(), 1);
        assert_eq!(analytics[0].total_attempts, Some(12));
        assert_eq!(analytics[0].extra["averageScore"], 81);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let server = MockServer::start().await;
        server.on(
            "PATCH",
            "/quizzes/q-1",
            Reply::json(200, json!({"data": {"quiz": {"_id": "q-1", "title": "Renamed"}}})),
        );
        server.on("DELETE", "/quizzes/q-1", Reply::raw(204, ""));
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        let updated = api
            .quizzes()
            .update("q-1", &json!({"title": "Renamed", "isActive": false}))
            .await
            .unwrap();
        api.quizzes().delete("q-1").await.unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(
            server.received_paths(),
            vec!["PATCH /quizzes/q-1", "DELETE /quizzes/q-1"]
        );
    }
}
