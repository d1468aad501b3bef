mod commands;

use std::process::ExitCode;

use clap::Parser;
use edulearn_client::config::{ClientConfig, StoreKind};
use edulearn_client::AppState;

mod cli {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand};
    use edulearn_client::api::types::Role;
    use edulearn_client::config::StoreKind;

    #[derive(Parser, Debug)]
    #[command(name = "edulearn", version, about = "EduLearn backend client")]
    pub struct Args {
        /// Backend base URL (overrides EDULEARN_API_URL)
        #[arg(long, global = true)]
        pub api_url: Option<String>,

        /// Where to keep the session token and profile
        #[arg(long, global = true, value_enum)]
        pub store: Option<StoreKind>,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Subcommand, Debug)]
    pub enum Command {
        /// Log in and store the session
        Login {
            #[arg(long)]
            email: String,
            #[arg(long)]
            password: String,
        },
        /// Create an account and store the session
        Register {
            #[arg(long)]
            name: String,
            #[arg(long)]
            email: String,
            #[arg(long)]
            password: String,
        },
        /// Fetch the current profile from the backend
        Me,
        /// Print the stored profile without contacting the backend
        Whoami,
        /// End the session on the backend and clear local credentials
        Logout,
        ForgotPassword {
            #[arg(long)]
            email: String,
        },
        ResetPassword {
            /// Token from the reset email
            #[arg(long)]
            token: String,
            #[arg(long)]
            password: String,
        },
        #[command(subcommand)]
        Lessons(LessonCommand),
        #[command(subcommand)]
        Quizzes(QuizCommand),
        #[command(subcommand)]
        Admin(AdminCommand),
        /// Load the data behind a role dashboard
        Dashboard {
            #[arg(value_enum)]
            view: DashboardView,
        },
        /// Create the sample lessons and quizzes (instructor or admin session)
        Seed,
    }

    #[derive(Subcommand, Debug)]
    pub enum LessonCommand {
        List {
            #[arg(long)]
            instructor: Option<String>,
        },
        Get {
            id: String,
        },
        Create {
            #[arg(long)]
            title: String,
            #[arg(long, default_value = "")]
            description: String,
            #[arg(long, default_value = "")]
            content: String,
            #[arg(long, default_value = "")]
            category: String,
            #[arg(long)]
            order: Option<u32>,
            /// Image file to attach (repeatable)
            #[arg(long = "image")]
            images: Vec<PathBuf>,
        },
        Update {
            id: String,
            #[arg(long)]
            title: Option<String>,
            #[arg(long)]
            description: Option<String>,
            #[arg(long)]
            content: Option<String>,
            #[arg(long)]
            category: Option<String>,
            #[arg(long)]
            order: Option<u32>,
            #[arg(long = "image")]
            images: Vec<PathBuf>,
        },
        Delete {
            id: String,
        },
    }

    #[derive(Subcommand, Debug)]
    pub enum QuizCommand {
        List {
            #[arg(long)]
            instructor: Option<String>,
        },
        Get {
            id: String,
        },
        ByLesson {
            lesson_id: String,
        },
        /// Create a quiz from a JSON file (lesson, title, questions, passingScore, isActive)
        Create {
            file: PathBuf,
        },
        /// Apply a JSON object of changes to a quiz
        Update {
            id: String,
            file: PathBuf,
        },
        /// Submit answers as comma-separated option indexes, in question order
        Submit {
            id: String,
            #[arg(long, value_delimiter = ',')]
            answers: Vec<u32>,
        },
        Analytics,
        Delete {
            id: String,
        },
    }

    #[derive(Subcommand, Debug)]
    pub enum AdminCommand {
        Users,
        SetRole {
            id: String,
            role: Role,
        },
        CreateUser {
            #[arg(long)]
            name: String,
            #[arg(long)]
            email: String,
            #[arg(long)]
            password: String,
            #[arg(long, default_value = "learner")]
            role: Role,
        },
        DeleteUser {
            id: String,
        },
        Stats,
    }

    #[derive(clap::ValueEnum, Clone, Copy, Debug)]
    pub enum DashboardView {
        Admin,
        Instructor,
        Learner,
        Manager,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = args.api_url.as_deref() {
        config = config.with_base_url(url);
    }
    let store = args.store.unwrap_or_else(StoreKind::from_env);
    log::debug!("API base URL: {}", config.base_url);

    let state = match AppState::open(&config, store) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot open credential store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Ctrl-C aborts the in-flight request instead of leaving it dangling.
    let cancel = state.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling");
            cancel.cancel();
        }
    });

    match commands::run(&state, args.command).await {
        Ok(output) => {
            if !output.is_null() {
                match serde_json::to_string_pretty(&output) {
                    Ok(text) => println!("{}", text),
                    Err(e) => log::error!("Failed to render output: {}", e),
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            if let Some(hint) = e.hint() {
                log::info!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}
