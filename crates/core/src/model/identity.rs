use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::UserId;

/// Minimum accepted password length. Passwords are never verified further.
pub const MIN_PASSWORD_LEN: usize = 6;

//
// ─── ROLE ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Label shown in role pickers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "Pengguna Biasa",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

//
// ─── IDENTITY ──────────────────────────────────────────────────────────────────
//

/// The authenticated person behind a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: UserId,
    email: String,
    display_name: String,
    role: Role,
}

impl Identity {
    #[must_use]
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: display_name.into(),
            role,
        }
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

//
// ─── REGISTRATION ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistrationError {
    #[error("Nama lengkap harus diisi")]
    EmptyFullName,

    #[error("Email harus diisi")]
    EmptyEmail,

    #[error("Format email tidak valid")]
    InvalidEmail,

    #[error("Kata sandi minimal 6 karakter")]
    PasswordTooShort,

    #[error("Konfirmasi kata sandi tidak cocok")]
    PasswordMismatch,

    #[error("Peran harus dipilih")]
    MissingRole,
}

/// Raw registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRegistration {
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl RegistrationDraft {
    /// Validate fields in form order, stopping at the first problem.
    ///
    /// # Errors
    ///
    /// Returns the first `RegistrationError` encountered.
    pub fn validate(self) -> Result<ValidatedRegistration, RegistrationError> {
        let full_name = self.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(RegistrationError::EmptyFullName);
        }
        let email = self.email.trim().to_string();
        if email.is_empty() {
            return Err(RegistrationError::EmptyEmail);
        }
        if !email.contains('@') {
            return Err(RegistrationError::InvalidEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegistrationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        let role = self.role.ok_or(RegistrationError::MissingRole)?;

        Ok(ValidatedRegistration {
            full_name,
            email,
            role,
        })
    }
}

impl ValidatedRegistration {
    #[must_use]
    pub fn into_identity(self, id: UserId) -> Identity {
        Identity::new(id, self.email, self.full_name, self.role)
    }
}
