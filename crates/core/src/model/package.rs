use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::PackageId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PackageError {
    #[error("package name cannot be empty")]
    EmptyName,

    #[error("package description cannot be empty")]
    EmptyDescription,

    #[error("duration must be > 0 minutes")]
    InvalidDuration,

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("unknown package status: {0}")]
    UnknownStatus(String),
}

//
// ─── DIFFICULTY / STATUS ───────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Mudah",
            Difficulty::Medium => "Sedang",
            Difficulty::Hard => "Sulit",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PackageError::UnknownDifficulty(s.to_string()))
    }
}

/// Whether test-takers can see the package yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageStatus {
    #[default]
    Active,
    Draft,
}

impl PackageStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PackageStatus::Active => "Aktif",
            PackageStatus::Draft => "Draft",
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PackageStatus {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Aktif" | "active" => Ok(PackageStatus::Active),
            "Draft" | "draft" => Ok(PackageStatus::Draft),
            other => Err(PackageError::UnknownStatus(other.to_string())),
        }
    }
}

//
// ─── PACKAGE ───────────────────────────────────────────────────────────────────
//

/// A named, fixed collection of questions representing one test variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    id: PackageId,
    name: String,
    description: String,
    duration_minutes: Option<u32>,
    difficulty: Option<Difficulty>,
    status: PackageStatus,
    created_at: DateTime<Utc>,
}

impl Package {
    /// Rehydrate a package from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `PackageError` if the stored values violate package invariants.
    pub fn from_persisted(
        id: PackageId,
        name: impl Into<String>,
        description: impl Into<String>,
        duration_minutes: Option<u32>,
        difficulty: Option<Difficulty>,
        status: PackageStatus,
        created_at: DateTime<Utc>,
    ) -> Result<Self, PackageError> {
        let validated = PackageDraft {
            name: name.into(),
            description: description.into(),
            duration_minutes,
            difficulty,
            status,
        }
        .validate(created_at)?;
        Ok(validated.assign_id(id))
    }

    #[must_use]
    pub fn id(&self) -> PackageId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[must_use]
    pub fn status(&self) -> PackageStatus {
        self.status
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == PackageStatus::Active
    }

    /// Case-insensitive substring match over name and description.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDraft {
    pub name: String,
    pub description: String,
    pub duration_minutes: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub status: PackageStatus,
}

impl PackageDraft {
    /// Validate the add-package form.
    ///
    /// # Errors
    ///
    /// Returns `PackageError` for a blank name/description or a zero duration.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ValidatedPackage, PackageError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(PackageError::EmptyName);
        }
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(PackageError::EmptyDescription);
        }
        if self.duration_minutes == Some(0) {
            return Err(PackageError::InvalidDuration);
        }

        Ok(ValidatedPackage {
            name,
            description,
            duration_minutes: self.duration_minutes,
            difficulty: self.difficulty,
            status: self.status,
            created_at: now,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPackage {
    pub name: String,
    pub description: String,
    pub duration_minutes: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub status: PackageStatus,
    pub created_at: DateTime<Utc>,
}

impl ValidatedPackage {
    #[must_use]
    pub fn assign_id(self, id: PackageId) -> Package {
        Package {
            id,
            name: self.name,
            description: self.description,
            duration_minutes: self.duration_minutes,
            difficulty: self.difficulty,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
