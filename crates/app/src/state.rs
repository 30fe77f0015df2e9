use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use chrono::Datelike;
use services::{AppServices, Clock};

/// Shared handler state. Cheap to clone; everything inside is `Arc`-backed.
#[derive(Clone)]
pub struct AppState {
    pub services: AppServices,
    pub clock: Clock,
    key: Key,
}

impl AppState {
    #[must_use]
    pub fn new(services: AppServices, key: Key, clock: Clock) -> Self {
        Self {
            services,
            clock,
            key,
        }
    }

    /// Year shown in the page footer.
    #[must_use]
    pub fn current_year(&self) -> i32 {
        self.clock.now().year()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}
