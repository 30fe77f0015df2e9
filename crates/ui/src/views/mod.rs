mod dashboard;
mod error;
mod layout;
mod login;
mod quest;
mod quests;
mod register;

pub use dashboard::{DashboardPage, DashboardPageProps};
pub use error::{ErrorPage, ErrorPageProps};
pub use layout::Layout;
pub use login::{LoginPage, LoginPageProps};
pub use quest::{QuestPage, QuestPageProps};
pub use quests::{QuestListPage, QuestListPageProps};
pub use register::{RegisterPage, RegisterPageProps};

#[cfg(test)]
mod view_smoke;
