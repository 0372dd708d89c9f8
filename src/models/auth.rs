//! Login credentials.
//!
//! There is no real authentication: any non-empty email and password pair
//! is accepted.

use secrecy::{ExposeSecret as _, SecretString};

use crate::error::{FinControlError, Result};

/// Email and password submitted at login.
#[derive(Debug)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password, redacted in `Debug` output.
    pub password: SecretString,
}

impl Credentials {
    /// Creates credentials from an email and a password.
    #[inline]
    #[must_use]
    pub fn new<E: Into<String>>(email: E, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }

    /// Checks that both fields were filled in.
    ///
    /// # Errors
    ///
    /// Returns [`FinControlError::MissingCredentials`] if either field is
    /// empty.
    #[inline]
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() || self.password.expose_secret().is_empty() {
            return Err(FinControlError::MissingCredentials);
        }
        Ok(())
    }
}
