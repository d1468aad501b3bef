//! CLI command handlers.
//!
//! Each handler runs one gateway operation against the session in
//! `AppState` and returns JSON for `main` to print (`Null` prints nothing).

use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use edulearn_client::api::lessons::{ImageUpload, LessonForm, LessonPatch};
use edulearn_client::api::types::{NewQuiz, NewUser, QuizAnswer};
use edulearn_client::store::StoreError;
use edulearn_client::{dashboard, seed, ApiError, AppState};

use crate::cli::{AdminCommand, Command, DashboardView, LessonCommand, QuizCommand};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Cannot read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid: {source}")]
    InvalidFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to render output: {0}")]
    Output(#[source] serde_json::Error),
}

impl CommandError {
    /// Follow-up advice printed after the error itself.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CommandError::Api(e) if e.is_unauthorized() => {
                Some("Session missing or expired; run `edulearn login` and retry")
            }
            _ => None,
        }
    }
}

pub async fn run(state: &AppState, command: Command) -> Result<Value, CommandError> {
    let api = &state.api;
    match command {
        Command::Login { email, password } => {
            let profile = api.auth().login(&email, &password).await?;
            render(&profile)
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let profile = api.auth().register(&name, &email, &password).await?;
            render(&profile)
        }
        Command::Me => render(&api.auth().me().await?),
        Command::Whoami => match state.current_user() {
            Some(profile) => render(&profile),
            None => {
                log::info!("Not logged in");
                Ok(Value::Null)
            }
        },
        Command::Logout => {
            state.end_session().await?;
            Ok(Value::Null)
        }
        Command::ForgotPassword { email } => {
            let message = api.auth().forgot_password(&email).await?;
            Ok(json!({ "message": message }))
        }
        Command::ResetPassword { token, password } => {
            let message = api.auth().reset_password(&token, &password).await?;
            Ok(json!({ "message": message }))
        }
        Command::Lessons(cmd) => run_lessons(state, cmd).await,
        Command::Quizzes(cmd) => run_quizzes(state, cmd).await,
        Command::Admin(cmd) => run_admin(state, cmd).await,
        Command::Dashboard { view } => match view {
            DashboardView::Admin => render(&dashboard::load_admin(api).await?),
            DashboardView::Instructor => render(&dashboard::load_instructor(api).await?),
            DashboardView::Learner => render(&dashboard::load_learner(api).await?),
            DashboardView::Manager => render(&dashboard::load_manager(api).await?),
        },
        Command::Seed => {
            if !state.is_authenticated() {
                log::warn!("No stored session; the backend will likely reject seeding");
            }
            render(&seed::seed_database(api).await?)
        }
    }
}

async fn run_lessons(state: &AppState, cmd: LessonCommand) -> Result<Value, CommandError> {
    let lessons = state.api.lessons();
    match cmd {
        LessonCommand::List { instructor } => render(&lessons.list(instructor.as_deref()).await?),
        LessonCommand::Get { id } => render(&lessons.get(&id).await?),
        LessonCommand::Create {
            title,
            description,
            content,
            category,
            order,
            images,
        } => {
            let form = LessonForm {
                title,
                description,
                content,
                category,
                order,
                images: read_images(&images)?,
            };
            render(&lessons.create(form.into_multipart()?).await?)
        }
        LessonCommand::Update {
            id,
            title,
            description,
            content,
            category,
            order,
            images,
        } => {
            let patch = LessonPatch {
                title,
                description,
                content,
                category,
                order,
                images: read_images(&images)?,
            };
            render(&lessons.update(&id, patch.into_multipart()?).await?)
        }
        LessonCommand::Delete { id } => {
            lessons.delete(&id).await?;
            log::info!("Deleted lesson {}", id);
            Ok(Value::Null)
        }
    }
}

async fn run_quizzes(state: &AppState, cmd: QuizCommand) -> Result<Value, CommandError> {
    let quizzes = state.api.quizzes();
    match cmd {
        QuizCommand::List { instructor } => render(&quizzes.list(instructor.as_deref()).await?),
        QuizCommand::Get { id } => render(&quizzes.get(&id).await?),
        QuizCommand::ByLesson { lesson_id } => render(&quizzes.by_lesson(&lesson_id).await?),
        QuizCommand::Create { file } => {
            let quiz: NewQuiz = read_json_file(&file)?;
            render(&quizzes.create(&quiz).await?)
        }
        QuizCommand::Update { id, file } => {
            let changes: Value = read_json_file(&file)?;
            render(&quizzes.update(&id, &changes).await?)
        }
        QuizCommand::Submit { id, answers } => {
            let answers: Vec<QuizAnswer> = answers
                .into_iter()
                .map(|selected_option_index| QuizAnswer {
                    selected_option_index,
                })
                .collect();
            render(&quizzes.submit(&id, &answers).await?)
        }
        QuizCommand::Analytics => render(&quizzes.analytics().await?),
        QuizCommand::Delete { id } => {
            quizzes.delete(&id).await?;
            log::info!("Deleted quiz {}", id);
            Ok(Value::Null)
        }
    }
}

async fn run_admin(state: &AppState, cmd: AdminCommand) -> Result<Value, CommandError> {
    let admin = state.api.admin();
    match cmd {
        AdminCommand::Users => render(&admin.users().await?),
        AdminCommand::SetRole { id, role } => render(&admin.update_role(&id, role).await?),
        AdminCommand::CreateUser {
            name,
            email,
            password,
            role,
        } => {
            let user = NewUser {
                name,
                email,
                password,
                role,
            };
            render(&admin.create_user(&user).await?)
        }
        AdminCommand::DeleteUser { id } => {
            admin.delete_user(&id).await?;
            log::info!("Deleted user {}", id);
            Ok(Value::Null)
        }
        AdminCommand::Stats => render(&admin.statistics().await?),
    }
}

fn render<T: Serialize + ?Sized>(value: &T) -> Result<Value, CommandError> {
    serde_json::to_value(value).map_err(CommandError::Output)
}

fn read_images(paths: &[std::path::PathBuf]) -> Result<Vec<ImageUpload>, CommandError> {
    paths
        .iter()
        .map(|path| {
            ImageUpload::from_path(path).map_err(|source| CommandError::ReadFile {
                path: path.display().to_string(),
                source,
            })
        })
        .collect()
}

fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CommandError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CommandError::InvalidFile {
        path: path.display().to_string(),
        source,
    })
}
