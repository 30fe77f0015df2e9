use std::sync::Arc;

use quest_core::model::QuestCatalog;
use storage::repository::Storage;

use crate::Clock;
use crate::account_service::AccountService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one storage backend and catalog.
#[derive(Clone)]
pub struct AppServices {
    accounts: Arc<AccountService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        catalog: Arc<QuestCatalog>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, catalog))
    }

    /// Build services over an existing storage aggregate.
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, catalog: Arc<QuestCatalog>) -> Self {
        let accounts = Arc::new(AccountService::new(clock, Arc::clone(&storage.users)));
        let progress = Arc::new(ProgressService::new(
            clock,
            Arc::clone(&storage.users),
            Arc::clone(&storage.progress),
            catalog,
        ));
        Self { accounts, progress }
    }

    #[must_use]
    pub fn accounts(&self) -> Arc<AccountService> {
        Arc::clone(&self.accounts)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}
