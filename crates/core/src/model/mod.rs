mod catalog;
mod ids;
mod progress;
mod quest;
mod user;

pub use catalog::{CatalogError, QuestCatalog};
pub use ids::UserId;
pub use progress::CompletedQuests;
pub use quest::{Grade, Quest, QuestId, QuestKey};
pub use user::{
    PASSWORD_MAX_LEN, PASSWORD_MIN_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN, User, UserError,
};
