use services::{Field, FieldErrors};

/// Register form state for re-rendering after a failed submit.
///
/// The password is never echoed back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormVm {
    pub username: String,
    pub username_errors: Vec<String>,
    pub password_errors: Vec<String>,
}

impl FormVm {
    #[must_use]
    pub fn with_errors(username: impl Into<String>, errors: &FieldErrors) -> Self {
        Self {
            username: username.into(),
            username_errors: errors.for_field(Field::Username).to_vec(),
            password_errors: errors.for_field(Field::Password).to_vec(),
        }
    }
}
