use psikotes_core::model::{
    AnswerOption, Difficulty, Identity, OptionCode, Package, PackageId, PackageStatus, Question,
    QuestionId, Role, UserId,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn package_id_from_i64(v: i64) -> Result<PackageId, StorageError> {
    Ok(PackageId::new(i64_to_u64("package_id", v)?))
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    Ok(QuestionId::new(i64_to_u64("question_id", v)?))
}

// ─── Enum encodings ────────────────────────────────────────────────────────────

pub(crate) fn difficulty_to_str(d: Difficulty) -> &'static str {
    match d {
        Difficulty::Easy => "easy",
        Difficulty::Medium => "medium",
        Difficulty::Hard => "hard",
    }
}

pub(crate) fn parse_difficulty(s: &str) -> Result<Difficulty, StorageError> {
    match s {
        "easy" => Ok(Difficulty::Easy),
        "medium" => Ok(Difficulty::Medium),
        "hard" => Ok(Difficulty::Hard),
        _ => Err(StorageError::Serialization(format!("invalid difficulty: {s}"))),
    }
}

pub(crate) fn status_to_str(s: PackageStatus) -> &'static str {
    match s {
        PackageStatus::Active => "active",
        PackageStatus::Draft => "draft",
    }
}

// ─── Row mappers ───────────────────────────────────────────────────────────────

pub(crate) fn map_user_row(row: &SqliteRow) -> Result<Identity, StorageError> {
    let id: uuid::Uuid = row.try_get("id").map_err(ser)?;
    let role: Role = row
        .try_get::<String, _>("role")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;
    Ok(Identity::new(
        UserId::from_uuid(id),
        row.try_get::<String, _>("email").map_err(ser)?,
        row.try_get::<String, _>("display_name").map_err(ser)?,
        role,
    ))
}

pub(crate) fn map_package_row(row: &SqliteRow) -> Result<Package, StorageError> {
    let duration = row
        .try_get::<Option<i64>, _>("duration_minutes")
        .map_err(ser)?
        .map(|v| {
            u32::try_from(v)
                .map_err(|_| StorageError::Serialization(format!("invalid duration: {v}")))
        })
        .transpose()?;
    let difficulty = row
        .try_get::<Option<String>, _>("difficulty")
        .map_err(ser)?
        .as_deref()
        .map(parse_difficulty)
        .transpose()?;
    let status: PackageStatus = row
        .try_get::<String, _>("status")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;

    Package::from_persisted(
        package_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get::<String, _>("description").map_err(ser)?,
        duration,
        difficulty,
        status,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) const OPTION_COLUMNS: [(OptionCode, &str); 4] = [
    (OptionCode::A, "option_a"),
    (OptionCode::B, "option_b"),
    (OptionCode::C, "option_c"),
    (OptionCode::D, "option_d"),
];

/// Spreads a question's options over the four nullable option columns.
pub(crate) fn option_columns(question_options: &[AnswerOption]) -> [Option<String>; 4] {
    let mut cols: [Option<String>; 4] = Default::default();
    for option in question_options {
        cols[option.code.index()] = Some(option.text.clone());
    }
    cols
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<Question, StorageError> {
    let mut options = Vec::with_capacity(OPTION_COLUMNS.len());
    for (code, column) in OPTION_COLUMNS {
        if let Some(text) = row.try_get::<Option<String>, _>(column).map_err(ser)? {
            options.push(AnswerOption::new(code, text));
        }
    }
    let correct: OptionCode = row
        .try_get::<String, _>("correct")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;

    Question::new(
        question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        package_id_from_i64(row.try_get::<i64, _>("package_id").map_err(ser)?)?,
        row.try_get::<String, _>("prompt").map_err(ser)?,
        options,
        correct,
    )
    .map_err(ser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_encoding_is_reversible() {
        for d in Difficulty::ALL {
            assert_eq!(parse_difficulty(difficulty_to_str(d)).unwrap(), d);
        }
    }

    #[test]
    fn option_columns_leave_missing_codes_null() {
        let cols = option_columns(&[
            AnswerOption::new(OptionCode::A, "ya"),
            AnswerOption::new(OptionCode::C, "mungkin"),
        ]);
        assert_eq!(cols[0].as_deref(), Some("ya"));
        assert_eq!(cols[1], None);
        assert_eq!(cols[2].as_deref(), Some("mungkin"));
    }
}
