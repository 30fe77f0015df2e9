use crate::flash::Flash;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashVm {
    pub class: &'static str,
    pub message: String,
}

impl From<&Flash> for FlashVm {
    fn from(flash: &Flash) -> Self {
        Self {
            class: flash.level.css_class(),
            message: flash.message.clone(),
        }
    }
}

/// Everything the shared layout needs besides the page body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageChrome {
    pub title: String,
    /// Set when the request is authenticated; drives the navigation bar.
    pub username: Option<String>,
    pub flashes: Vec<FlashVm>,
    pub current_year: i32,
}

impl PageChrome {
    #[must_use]
    pub fn new(title: impl Into<String>, current_year: i32) -> Self {
        Self {
            title: title.into(),
            username: None,
            flashes: Vec::new(),
            current_year,
        }
    }

    #[must_use]
    pub fn with_user(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn with_flashes<'a>(mut self, flashes: impl IntoIterator<Item = &'a Flash>) -> Self {
        self.flashes.extend(flashes.into_iter().map(FlashVm::from));
        self
    }
}
