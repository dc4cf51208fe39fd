//! Lenient timestamp handling.
//!
//! The v3 surface reports local wall-clock strings without an offset
//! (`2023-01-18T17:34:56`), the v4 surface reports RFC 3339. Both decode to
//! an [`OffsetDateTime`]; offset-less values are taken as UTC.

use serde::{Deserialize, Deserializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Parse either an RFC 3339 instant or a naive `YYYY-MM-DDTHH:MM:SS[.f]` value.
#[must_use]
pub fn parse(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    let naive =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
    PrimitiveDateTime::parse(&raw.replacen(' ', "T", 1), naive)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// Render an optional instant for table cells.
#[must_use]
pub fn display(value: Option<OffsetDateTime>) -> String {
    value
        .and_then(|v| v.format(&Rfc3339).ok())
        .unwrap_or_default()
}

/// Serde adapter for `Option<OffsetDateTime>` fields that tolerates both
/// surfaces, `null`, and unparsable strings (which decode to `None`).
pub mod lenient {
    use super::{Deserialize, Deserializer, OffsetDateTime, parse};

    /// # Errors
    ///
    /// Fails only when the field is neither a string nor `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_rfc3339() {
        assert_eq!(
            parse("2024-03-01T10:00:00+02:00"),
            Some(datetime!(2024-03-01 10:00:00 +02:00))
        );
    }

    #[test]
    fn naive_values_are_utc() {
        assert_eq!(
            parse("2023-01-18T17:34:56"),
            Some(datetime!(2023-01-18 17:34:56 UTC))
        );
        assert_eq!(
            parse("2023-01-18 17:34:56"),
            Some(datetime!(2023-01-18 17:34:56 UTC))
        );
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse("yesterday"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn display_is_rfc3339() {
        assert_eq!(
            display(Some(datetime!(2023-01-18 17:34:56 UTC))),
            "2023-01-18T17:34:56Z"
        );
        assert_eq!(display(None), "");
    }
}
