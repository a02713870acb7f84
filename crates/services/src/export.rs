use std::fs;
use std::path::{Path, PathBuf};

use psikotes_core::export::export_file_name;
use psikotes_core::model::ResultRecord;

use crate::Clock;
use crate::error::ExportError;

/// Writes plain-text result files into a directory.
#[derive(Debug, Clone)]
pub struct ResultExporter {
    clock: Clock,
    default_dir: PathBuf,
}

impl ResultExporter {
    #[must_use]
    pub fn new(clock: Clock, default_dir: impl Into<PathBuf>) -> Self {
        Self {
            clock,
            default_dir: default_dir.into(),
        }
    }

    /// Write `record` into the configured directory.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if the directory or file cannot be written.
    pub fn export(&self, record: &ResultRecord) -> Result<PathBuf, ExportError> {
        self.write(record, &self.default_dir)
    }

    /// Write `record` as `hasil-psikotes-<millis>.txt` under `dir`, creating the
    /// directory if needed. Returns the full path of the new file.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if the directory or file cannot be written.
    pub fn write(&self, record: &ResultRecord, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(export_file_name(self.clock.now()));
        fs::write(&path, record.to_plain_text()).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), package = record.package_name(), "result exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psikotes_core::model::{AnswerMap, AnswerOption, OptionCode, PackageId, Question, QuestionId};
    use psikotes_core::time::fixed_now;
    use psikotes_core::timer::CompletionDuration;

    fn record() -> ResultRecord {
        let question = Question::new(
            QuestionId::new(1),
            PackageId::new(1),
            "Warna langit?",
            vec![
                AnswerOption::new(OptionCode::A, "Biru"),
                AnswerOption::new(OptionCode::B, "Merah"),
            ],
            OptionCode::A,
        )
        .unwrap();
        let answers: AnswerMap = [(0, OptionCode::B)].into_iter().collect();
        ResultRecord::new("Paket Uji", vec![question], answers, CompletionDuration::from_secs(61), fixed_now())
    }

    #[test]
    fn writes_named_file_with_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ResultExporter::new(Clock::fixed(fixed_now()), dir.path());
        let record = record();

        let path = exporter.export(&record).unwrap();
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("hasil-psikotes-1700000000000.txt")
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), record.to_plain_text());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("2023");
        let exporter = ResultExporter::new(Clock::fixed(fixed_now()), dir.path());

        let path = exporter.write(&record(), &nested).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn unwritable_target_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let exporter = ResultExporter::new(Clock::fixed(fixed_now()), &blocker);

        let err = exporter.export(&record()).unwrap_err();
        let ExportError::Io { path, .. } = err;
        assert_eq!(path, blocker);
    }
}
