//! Registration and login form validation.
//!
//! Messages are user-facing and rendered next to the offending field.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;

use quest_core::model::{PASSWORD_MAX_LEN, PASSWORD_MIN_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN};
use storage::repository::{StorageError, UserRepository};

use crate::error::AccountError;

pub const MSG_REQUIRED: &str = "Обязательное поле.";
pub const MSG_USERNAME_TAKEN: &str = "Это имя уже занято. Придумайте другое.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Username,
    Password,
}

impl Field {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
        }
    }
}

/// Validation messages grouped by field, in insertion order per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, Vec<String>>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn single(field: Field, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    #[must_use]
    pub fn for_field(&self, field: Field) -> &[String] {
        self.errors.get(&field).map_or(&[], Vec::as_slice)
    }

    /// Every message, ordered by field.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.values().flatten().map(String::as_str)
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Answers "is this username already registered?" for the register form.
#[async_trait]
pub trait UsernameLookup: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be queried.
    async fn username_taken(&self, username: &str) -> Result<bool, StorageError>;
}

#[async_trait]
impl<T: UserRepository + ?Sized> UsernameLookup for T {
    async fn username_taken(&self, username: &str) -> Result<bool, StorageError> {
        Ok(self.find_by_username(username).await?.is_some())
    }
}

fn length_message(min: usize, max: usize) -> String {
    format!("Длина должна быть от {min} до {max} символов.")
}

/// Required + length check. Length counts characters, not bytes.
fn check_text(errors: &mut FieldErrors, field: Field, value: &str, min: usize, max: usize) {
    if value.is_empty() {
        errors.push(field, MSG_REQUIRED);
        return;
    }
    let len = value.chars().count();
    if len < min || len > max {
        errors.push(field, length_message(min, max));
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterForm {
    /// Validate field rules, then check the username against `lookup`.
    ///
    /// The uniqueness query only runs when the username itself is well-formed.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Invalid` for rejected input and
    /// `AccountError::Storage` if the lookup fails.
    pub async fn validate<L: UsernameLookup + ?Sized>(
        &self,
        lookup: &L,
    ) -> Result<(), AccountError> {
        let mut errors = FieldErrors::new();
        check_text(
            &mut errors,
            Field::Username,
            &self.username,
            USERNAME_MIN_LEN,
            USERNAME_MAX_LEN,
        );
        check_text(
            &mut errors,
            Field::Password,
            &self.password,
            PASSWORD_MIN_LEN,
            PASSWORD_MAX_LEN,
        );

        if !errors.has(Field::Username) && lookup.username_taken(&self.username).await? {
            errors.push(Field::Username, MSG_USERNAME_TAKEN);
        }

        errors.into_result().map_err(AccountError::Invalid)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Both fields must be present; correctness is checked by authentication.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages for missing input.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.username.is_empty() {
            errors.push(Field::Username, MSG_REQUIRED);
        }
        if self.password.is_empty() {
            errors.push(Field::Password, MSG_REQUIRED);
        }
        errors.into_result()
    }
}
