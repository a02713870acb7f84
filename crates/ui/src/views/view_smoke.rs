use std::sync::Arc;

use psikotes_core::model::{OptionCode, Package, PackageId, Role, ValidatedPackage};
use services::FlowStep;
use storage::repository::PackageRepository;
use storage::{Storage, StorageError};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_package_repo};

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_demo_credentials() {
    let mut harness = setup_view_harness(ViewKind::Login).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Sistem Psikotes Online"), "missing title in {html}");
    assert!(html.contains("admin@demo.com"), "missing demo admin in {html}");
    assert!(html.contains("Daftar"), "missing register link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_stats_and_table() {
    let mut harness = setup_view_harness(ViewKind::AdminDashboard).await;
    harness.login_as(Role::Admin).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Total Paket"), "missing stats in {html}");
    assert!(html.contains("Paket C - Tes Minat Bakat"), "missing draft package in {html}");
    assert!(html.contains("Draft"), "missing draft badge in {html}");
    assert!(html.contains("30 menit"), "missing duration in {html}");
    assert!(html.contains("Jumlah Soal"), "missing count column in {html}");
    assert!(html.contains("5 soal"), "missing package A count in {html}");
    assert!(html.contains("0 soal"), "missing empty package count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn packages_view_smoke_lists_only_active_packages() {
    let mut harness = setup_view_harness(ViewKind::Packages).await;
    harness.login_as(Role::User).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Pilih Paket Psikotes"), "missing title in {html}");
    assert!(html.contains("Paket A - Tes Kepribadian"), "missing package A in {html}");
    assert!(html.contains("Paket B - Tes Kecerdasan"), "missing package B in {html}");
    assert!(!html.contains("Paket C - Tes Minat Bakat"), "draft package leaked in {html}");
    assert!(html.contains("Mulai Tes"), "missing start button in {html}");
    assert!(html.contains("5 soal"), "missing package A count in {html}");
    assert!(html.contains("0 soal"), "missing package B count in {html}");
    assert_eq!(
        html.matches("disabled").count(),
        1,
        "only the empty package should block starting in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Test(1)).await;
    harness.login_as(Role::User).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Soal 1 dari 5"), "missing counter in {html}");
    assert!(html.contains("Waktu: 0:00"), "missing timer in {html}");
    assert!(
        html.contains("Saya lebih suka bekerja dalam tim"),
        "missing first option in {html}"
    );
    assert!(html.contains("Selanjutnya"), "missing next button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn test_view_smoke_reports_empty_and_unknown_packages() {
    let mut harness = setup_view_harness(ViewKind::Test(2)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Paket ini belum memiliki soal."), "missing empty notice in {html}");

    let mut harness = setup_view_harness(ViewKind::Test(99)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Paket soal tidak ditemukan."), "missing not-found notice in {html}");
    assert!(html.contains("Kembali ke Halaman Paket"), "missing back button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_without_result_falls_back_to_packages() {
    let mut harness = setup_view_harness(ViewKind::Results).await;
    harness.settle().await;
    for _ in 0..4 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert!(html.contains("navigated:/user/packages"), "no redirect in {html}");
    assert!(!html.contains("Tidak Ada Data Hasil"), "fallback kept after redirect in {html}");
    assert!(!html.contains("Skor Total"), "unexpected score in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_published_result() {
    let mut harness = setup_view_harness(ViewKind::Results).await;
    let flow = Arc::clone(&harness.test_flow);
    let mut session = flow.start(PackageId::new(1)).await.expect("start test");
    loop {
        flow.select(&mut session, Some(OptionCode::C));
        if let FlowStep::Completed(_) = flow.advance(&mut session).expect("advance") {
            break;
        }
    }

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Hasil Psikotes"), "missing title in {html}");
    assert!(html.contains("Skor Total"), "missing score label in {html}");
    assert!(html.contains("2/5"), "missing correct count in {html}");
    assert!(html.contains("Akurasi: 40%"), "missing accuracy in {html}");
    assert!(html.contains("Perlu Perbaikan"), "missing category in {html}");
    assert!(html.contains("Lihat Detail Jawaban"), "missing details toggle in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn guard_hides_admin_area_from_regular_users() {
    let mut harness = setup_view_harness(ViewKind::AdminOnly).await;
    harness.login_as(Role::User).await;
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("Mulai Tes"), "guarded content leaked in {html}");

    let mut harness = setup_view_harness(ViewKind::AdminOnly).await;
    harness.login_as(Role::Admin).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Mulai Tes"), "admin should see guarded content in {html}");
}

struct OfflinePackages;

#[async_trait::async_trait]
impl PackageRepository for OfflinePackages {
    async fn insert_new_package(
        &self,
        _package: ValidatedPackage,
    ) -> Result<PackageId, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }

    async fn get_package(&self, _id: PackageId) -> Result<Option<Package>, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }

    async fn list_packages(&self) -> Result<Vec<Package>, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }

    async fn delete_package(&self, _id: PackageId) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_package_repo(
        ViewKind::AdminDashboard,
        Storage::in_memory(),
        Arc::new(OfflinePackages),
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Terjadi kesalahan. Silakan coba lagi."),
        "missing error in {html}"
    );
    assert!(html.contains("Coba Lagi"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn manage_questions_view_smoke_lists_packages() {
    let mut harness = setup_view_harness(ViewKind::ManageQuestions).await;
    harness.login_as(Role::Admin).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Pilih Paket Soal"), "missing picker title in {html}");
    assert!(html.contains("Paket B - Tes Kecerdasan"), "missing package option in {html}");
    assert!(!html.contains("Tambah Soal Baru"), "form shown before a package is chosen in {html}");
}
