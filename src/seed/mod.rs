//! Populate a backend with the sample catalogue.
//!
//! Runs strictly in sequence: every lesson is created, the lesson list is
//! fetched to learn the new ids, then each quiz is attached to the lesson
//! with the matching title. A failed item is logged and skipped; only the
//! lesson listing (without which no quiz can be placed) aborts the run.
//! Requires an instructor or admin session.

pub mod data;

pub use data::{SampleLesson, SampleQuestion, SampleQuiz};

use serde::Serialize;

use crate::api::lessons::LessonForm;
use crate::api::types::{Lesson, NewQuiz, Question};
use crate::api::{ApiClient, ApiError};

/// Backend operations the seeder needs.
///
/// `ApiClient` is the production implementation; tests use in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait SeedTarget {
    async fn create_lesson(&self, lesson: &SampleLesson) -> Result<(), ApiError>;

    async fn list_lessons(&self) -> Result<Vec<Lesson>, ApiError>;

    async fn create_quiz(&self, quiz: &NewQuiz) -> Result<(), ApiError>;
}

impl SeedTarget for ApiClient {
    async fn create_lesson(&self, lesson: &SampleLesson) -> Result<(), ApiError> {
        let form = LessonForm {
            title: lesson.title.to_string(),
            description: lesson.description.to_string(),
            content: lesson.content.to_string(),
            category: lesson.category.to_string(),
            order: Some(lesson.order),
            images: Vec::new(),
        };
        self.lessons().create(form.into_multipart()?).await?;
        Ok(())
    }

    async fn list_lessons(&self) -> Result<Vec<Lesson>, ApiError> {
        self.lessons().list(None).await
    }

    async fn create_quiz(&self, quiz: &NewQuiz) -> Result<(), ApiError> {
        self.quizzes().create(quiz).await?;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize)]
pub struct SeedReport {
    pub lessons_created: usize,
    pub quizzes_created: usize,
    /// Quizzes whose lesson could not be found.
    pub quizzes_skipped: usize,
    /// One line per failed create.
    pub failures: Vec<String>,
}

/// Seed the built-in catalogue.
pub async fn seed_database<T: SeedTarget>(target: &T) -> Result<SeedReport, ApiError> {
    seed_with(target, data::LESSONS, data::QUIZZES).await
}

pub async fn seed_with<T: SeedTarget>(
    target: &T,
    lessons: &[SampleLesson],
    quizzes: &[SampleQuiz],
) -> Result<SeedReport, ApiError> {
    let mut report = SeedReport::default();
    log::info!("Seeding {} lessons and {} quizzes", lessons.len(), quizzes.len());

    for lesson in lessons {
        match target.create_lesson(lesson).await {
            Ok(()) => {
                log::info!("Created lesson: {}", lesson.title);
                report.lessons_created += 1;
            }
            Err(ApiError::Cancelled) => return Err(ApiError::Cancelled),
            Err(e) => {
                log::error!("Failed to create lesson {}: {}", lesson.title, e);
                report.failures.push(format!("lesson '{}': {}", lesson.title, e.message()));
            }
        }
    }

    let existing = target.list_lessons().await?;

    for quiz in quizzes {
        let Some(lesson) = find_lesson(&existing, quiz.lesson_title) else {
            log::warn!("Lesson not found for quiz: {}", quiz.title);
            report.quizzes_skipped += 1;
            continue;
        };

        match target.create_quiz(&to_new_quiz(quiz, &lesson.id)).await {
            Ok(()) => {
                log::info!("Created quiz: {}", quiz.title);
                report.quizzes_created += 1;
            }
            Err(ApiError::Cancelled) => return Err(ApiError::Cancelled),
            Err(e) => {
                log::error!("Failed to create quiz {}: {}", quiz.title, e);
                report.failures.push(format!("quiz '{}': {}", quiz.title, e.message()));
            }
        }
    }

    log::info!(
        "Seeding complete: {} lessons, {} quizzes created",
        report.lessons_created,
        report.quizzes_created
    );
    Ok(report)
}

/// First lesson whose title matches, ignoring case.
///
/// Re-running the seeder creates duplicate lessons; the earliest one wins.
fn find_lesson<'a>(lessons: &'a [Lesson], title: &str) -> Option<&'a Lesson> {
    lessons.iter().find(|l| l.title.eq_ignore_ascii_case(title))
}

fn to_new_quiz(sample: &SampleQuiz, lesson_id: &str) -> NewQuiz {
    NewQuiz {
        lesson: lesson_id.to_string(),
        title: sample.title.to_string(),
        questions: sample
            .questions
            .iter()
            .map(|q| Question {
                question_text: q.text.to_string(),
                options: q.options.iter().map(|o| o.to_string()).collect(),
                correct_option_index: Some(q.correct),
                points: Some(1),
            })
            .collect(),
        passing_score: sample.passing_score,
        is_active: sample.is_active,
    }
}
