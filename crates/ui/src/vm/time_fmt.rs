use chrono::{DateTime, Utc};

/// Calendar date as shown in package lists, e.g. `2024-01-15`.
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use psikotes_core::time::fixed_now;

    #[test]
    fn formats_calendar_date() {
        assert_eq!(format_date(fixed_now()), "2023-11-14");
    }
}
