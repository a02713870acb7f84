//! Demo accounts and sample packages used by the `seed` binary and on startup.

use chrono::{DateTime, Utc};
use psikotes_core::model::{
    Difficulty, Identity, OptionCode, PackageDraft, PackageStatus, QuestionDraft, Role, UserId,
};

use crate::repository::{Storage, StorageError};

pub const DEMO_ADMIN_EMAIL: &str = "admin@demo.com";
pub const DEMO_USER_EMAIL: &str = "user@demo.com";
/// Shown on the login page; any password of six or more characters is accepted.
pub const DEMO_PASSWORD: &str = "password123";

struct SamplePackage {
    name: &'static str,
    description: &'static str,
    duration_minutes: u32,
    difficulty: Difficulty,
    status: PackageStatus,
    questions: &'static [SampleQuestion],
}

struct SampleQuestion {
    prompt: &'static str,
    options: [&'static str; 4],
    correct: OptionCode,
}

const PERSONALITY_QUESTIONS: &[SampleQuestion] = &[
    SampleQuestion {
        prompt: "Manakah dari pernyataan berikut yang paling menggambarkan diri Anda?",
        options: [
            "Saya lebih suka bekerja dalam tim",
            "Saya lebih suka bekerja sendiri",
            "Saya fleksibel dalam kedua situasi",
            "Saya tidak memiliki preferensi khusus",
        ],
        correct: OptionCode::C,
    },
    SampleQuestion {
        prompt: "Ketika menghadapi masalah yang sulit, Anda cenderung:",
        options: [
            "Mencari bantuan dari orang lain",
            "Mencoba menyelesaikan sendiri terlebih dahulu",
            "Menganalisis masalah secara sistematis",
            "Menunda hingga menemukan solusi yang tepat",
        ],
        correct: OptionCode::C,
    },
    SampleQuestion {
        prompt: "Dalam situasi sosial, Anda biasanya:",
        options: [
            "Menjadi pusat perhatian",
            "Mendengarkan lebih banyak daripada berbicara",
            "Berpartisipasi aktif dalam diskusi",
            "Mengamati situasi terlebih dahulu",
        ],
        correct: OptionCode::B,
    },
    SampleQuestion {
        prompt: "Ketika membuat keputusan penting, Anda lebih mengandalkan:",
        options: [
            "Intuisi dan perasaan",
            "Fakta dan data",
            "Saran dari orang lain",
            "Pengalaman masa lalu",
        ],
        correct: OptionCode::B,
    },
    SampleQuestion {
        prompt: "Dalam mengelola waktu, Anda cenderung:",
        options: [
            "Membuat jadwal terperinci dan mengikutinya",
            "Fleksibel dan beradaptasi sesuai kebutuhan",
            "Fokus pada tenggat waktu",
            "Menyelesaikan tugas pada menit-menit terakhir",
        ],
        correct: OptionCode::A,
    },
];

const SAMPLE_PACKAGES: &[SamplePackage] = &[
    SamplePackage {
        name: "Paket A - Tes Kepribadian",
        description: "Tes untuk mengukur kepribadian dan karakter dasar",
        duration_minutes: 30,
        difficulty: Difficulty::Easy,
        status: PackageStatus::Active,
        questions: PERSONALITY_QUESTIONS,
    },
    SamplePackage {
        name: "Paket B - Tes Kecerdasan",
        description: "Tes IQ dan kemampuan logika berpikir",
        duration_minutes: 45,
        difficulty: Difficulty::Medium,
        status: PackageStatus::Active,
        questions: &[],
    },
    SamplePackage {
        name: "Paket C - Tes Minat Bakat",
        description: "Tes untuk mengetahui minat dan bakat terpendam",
        duration_minutes: 40,
        difficulty: Difficulty::Easy,
        status: PackageStatus::Draft,
        questions: &[],
    },
];

/// What `seed_demo_data` actually inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: u32,
    pub packages: u32,
    pub questions: u32,
}

/// Inserts demo accounts that are missing and, when no package exists yet,
/// the sample packages with their questions.
///
/// # Errors
///
/// Returns `StorageError` if any insert fails.
pub async fn seed_demo_data(
    storage: &Storage,
    now: DateTime<Utc>,
) -> Result<SeedReport, StorageError> {
    let mut report = SeedReport::default();

    for (email, name, role) in [
        (DEMO_ADMIN_EMAIL, "Admin Demo", Role::Admin),
        (DEMO_USER_EMAIL, "User Demo", Role::User),
    ] {
        if storage.users.find_by_email(email).await?.is_none() {
            let identity = Identity::new(UserId::generate(), email, name, role);
            storage.users.insert_user(&identity).await?;
            report.users += 1;
        }
    }

    if !storage.packages.list_packages().await?.is_empty() {
        tracing::debug!("packages already present, skipping sample packages");
        return Ok(report);
    }

    for sample in SAMPLE_PACKAGES {
        let draft = PackageDraft {
            name: sample.name.to_string(),
            description: sample.description.to_string(),
            duration_minutes: Some(sample.duration_minutes),
            difficulty: Some(sample.difficulty),
            status: sample.status,
        };
        let validated = draft.validate(now).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let package_id = storage.packages.insert_new_package(validated).await?;
        report.packages += 1;

        for question in sample.questions {
            let validated = QuestionDraft::new(question.prompt, question.options, Some(question.correct))
                .validate()
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            storage
                .questions
                .insert_new_question(package_id, validated)
                .await?;
            report.questions += 1;
        }
    }

    tracing::info!(
        users = report.users,
        packages = report.packages,
        questions = report.questions,
        "seeded demo data"
    );
    Ok(report)
}
