use psikotes_core::model::{Difficulty, PackageDraft, PackageError, PackageStatus};
use services::PackageSummary;

use crate::vm::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageCardVm {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub duration_label: String,
    pub difficulty_label: &'static str,
    pub status_label: &'static str,
    pub is_active: bool,
    pub created_at_str: String,
    pub question_count: usize,
    pub question_count_label: String,
}

impl PackageCardVm {
    /// A package without questions cannot be started.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.question_count > 0
    }
}

impl From<&PackageSummary> for PackageCardVm {
    fn from(summary: &PackageSummary) -> Self {
        let package = &summary.package;
        Self {
            id: package.id().value(),
            name: package.name().to_string(),
            description: package.description().to_string(),
            duration_label: package
                .duration_minutes()
                .map_or_else(|| "-".to_string(), |m| format!("{m} menit")),
            difficulty_label: package.difficulty().map_or("-", Difficulty::label),
            status_label: package.status().label(),
            is_active: package.is_active(),
            created_at_str: format_date(package.created_at()),
            question_count: summary.question_count,
            question_count_label: format!("{} soal", summary.question_count),
        }
    }
}

#[must_use]
pub fn map_package_cards(items: &[PackageSummary]) -> Vec<PackageCardVm> {
    items.iter().map(PackageCardVm::from).collect()
}

/// Raw add-package form fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackageForm {
    pub name: String,
    pub description: String,
    pub duration: String,
    pub difficulty: String,
}

impl PackageForm {
    /// Turn text inputs into a draft. Blank duration and difficulty are allowed.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::InvalidDuration` for a non-numeric duration and
    /// `PackageError::UnknownDifficulty` for an unrecognised difficulty label.
    pub fn to_draft(&self) -> Result<PackageDraft, PackageError> {
        let duration = self.duration.trim();
        let duration_minutes = if duration.is_empty() {
            None
        } else {
            Some(
                duration
                    .parse::<u32>()
                    .map_err(|_| PackageError::InvalidDuration)?,
            )
        };
        let difficulty = if self.difficulty.trim().is_empty() {
            None
        } else {
            Some(self.difficulty.parse::<Difficulty>()?)
        };

        Ok(PackageDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            duration_minutes,
            difficulty,
            status: PackageStatus::Active,
        })
    }
}

#[must_use]
pub fn package_error_message(err: &PackageError) -> &'static str {
    match err {
        PackageError::EmptyName => "Nama paket harus diisi",
        PackageError::EmptyDescription => "Deskripsi paket harus diisi",
        PackageError::InvalidDuration => "Durasi harus berupa angka lebih dari 0",
        PackageError::UnknownDifficulty(_) => "Tingkat kesulitan tidak dikenal",
        _ => "Data paket tidak valid",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psikotes_core::model::{Package, PackageId};
    use psikotes_core::time::fixed_now;

    #[test]
    fn card_labels_optional_fields() {
        let package = Package::from_persisted(
            PackageId::new(3),
            "Paket C",
            "Minat bakat",
            None,
            None,
            PackageStatus::Draft,
            fixed_now(),
        )
        .unwrap();
        let card = PackageCardVm::from(&PackageSummary {
            package,
            question_count: 0,
        });
        assert_eq!(card.id, 3);
        assert_eq!(card.duration_label, "-");
        assert_eq!(card.difficulty_label, "-");
        assert_eq!(card.status_label, "Draft");
        assert!(!card.is_active);
        assert_eq!(card.question_count_label, "0 soal");
        assert!(!card.can_start());
    }

    #[test]
    fn card_counts_questions() {
        let package = Package::from_persisted(
            PackageId::new(1),
            "Paket A",
            "Kepribadian",
            Some(30),
            Some(Difficulty::Easy),
            PackageStatus::Active,
            fixed_now(),
        )
        .unwrap();
        let cards = map_package_cards(&[PackageSummary {
            package,
            question_count: 5,
        }]);
        assert_eq!(cards[0].question_count_label, "5 soal");
        assert_eq!(cards[0].duration_label, "30 menit");
        assert!(cards[0].can_start());
    }

    #[test]
    fn form_parses_duration_and_difficulty() {
        let form = PackageForm {
            name: "Paket".into(),
            description: "desc".into(),
            duration: " 45 ".into(),
            difficulty: "Sedang".into(),
        };
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.duration_minutes, Some(45));
        assert_eq!(draft.difficulty, Some(Difficulty::Medium));

        let bad = PackageForm {
            duration: "tiga puluh".into(),
            ..form
        };
        assert_eq!(bad.to_draft().unwrap_err(), PackageError::InvalidDuration);
    }
}
