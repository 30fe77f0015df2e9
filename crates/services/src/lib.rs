#![forbid(unsafe_code)]

pub mod account_service;
pub mod app_services;
pub mod error;
pub mod forms;
pub mod password;
pub mod progress_service;

pub use quest_core::Clock;

pub use account_service::AccountService;
pub use app_services::AppServices;
pub use error::{AccountError, AppServicesError, ProgressError};
pub use forms::{Field, FieldErrors, LoginForm, RegisterForm, UsernameLookup};
pub use progress_service::{AnswerOutcome, GradeProgress, ProgressService, QuestStatus};
