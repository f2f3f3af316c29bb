use super::{ValidationError, require_name};

pub type AccountId = i64;

/// Registration input after validation. The password is handled by the
/// credential verifier and never stored on this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
}

impl NewAccount {
    /// Usernames must be non-empty. They are matched exactly, so surrounding
    /// whitespace is kept as typed.
    pub fn new(username: &str) -> Result<Self, ValidationError> {
        require_name("Username", username)?;
        Ok(Self {
            username: username.to_string(),
        })
    }
}
