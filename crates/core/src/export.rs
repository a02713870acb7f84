//! Plain-text rendering of a result record for download.

use chrono::{DateTime, Utc};
use std::fmt::Write as _;

use crate::model::ResultRecord;

impl ResultRecord {
    /// Renders the downloadable summary with one detail block per question.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "HASIL PSIKOTES");
        let _ = writeln!(out, "==============");
        let _ = writeln!(out, "Paket: {}", self.package_name());
        let _ = writeln!(out, "Skor: {}", self.score());
        let _ = writeln!(
            out,
            "Jawaban Benar: {} dari {}",
            self.correct_answers(),
            self.total_questions()
        );
        let _ = writeln!(out, "Waktu Pengerjaan: {}", self.completion_time());
        let _ = writeln!(out, "Kategori: {}", self.category().label());
        let _ = writeln!(out);
        let _ = writeln!(out, "DETAIL JAWABAN:");

        let blocks: Vec<String> = self
            .reviews()
            .iter()
            .map(|row| {
                format!(
                    "{}. {}\n   Jawaban Anda: {}\n   Jawaban Benar: {}\n   {}\n",
                    row.number,
                    row.prompt,
                    row.user_answer_label(),
                    row.correct_answer,
                    if row.is_correct { "✓ Benar" } else { "✗ Salah" }
                )
            })
            .collect();
        out.push_str(&blocks.join("\n"));
        out
    }
}

/// `hasil-psikotes-<unix millis>.txt`
#[must_use]
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("hasil-psikotes-{}.txt", at.timestamp_millis())
}
