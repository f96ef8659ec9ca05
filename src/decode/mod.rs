//! Text-to-value decoding for typed accessors
//!
//! Every decoder takes the trimmed snapshot value and returns the parse failure
//! as a plain message; the loader attaches service and key.

use serde::de::DeserializeOwned;
use std::time::Duration;

pub mod crypto;

pub use crypto::{parse_certificate, parse_rsa_private_key, parse_rsa_public_key};

pub type DecodeResult<T> = std::result::Result<T, String>;

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(value: &str) -> DecodeResult<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(format!("invalid syntax: {other:?}")),
    }
}

pub fn parse_int(value: &str) -> DecodeResult<i64> {
    value.parse::<i64>().map_err(|err| format!("{err}: {value:?}"))
}

/// Units `humantime` accepts whose length depends on the calendar.
const CALENDAR_UNITS: &[&str] =
    &["d", "day", "days", "w", "week", "weeks", "M", "month", "months", "y", "year", "years"];

/// Parses duration strings such as `30s`, `1m`, `1h30m` or `1.5s`.
///
/// Units stop at hours: days, weeks, months and years are rejected so that
/// `1M` is an error rather than a month.
pub fn parse_duration(value: &str) -> DecodeResult<Duration> {
    let calendar_unit = value
        .split(|c: char| c.is_ascii_digit() || c == '.' || c.is_whitespace())
        .find(|unit| CALENDAR_UNITS.contains(unit));
    if let Some(unit) = calendar_unit {
        return Err(format!("unsupported unit {unit:?} in {value:?}"));
    }
    humantime::parse_duration(value).map_err(|err| err.to_string())
}

pub fn parse_object<T: DeserializeOwned>(value: &str) -> DecodeResult<T> {
    serde_json::from_str(value).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn bool_accepts_the_usual_spellings() {
        for truthy in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(truthy), Ok(true), "{truthy}");
        }
        for falsy in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(falsy), Ok(false), "{falsy}");
        }
    }

    #[test]
    fn bool_rejects_everything_else() {
        for bad in ["yes", "no", "tRuE", "", "2"] {
            assert!(parse_bool(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn int_parses_signed_values() {
        assert_eq!(parse_int("1234567890"), Ok(1_234_567_890));
        assert_eq!(parse_int("-42"), Ok(-42));
        assert_eq!(parse_int("+7"), Ok(7));
        assert!(parse_int("12abc").is_err());
        assert!(parse_int("1.5").is_err());
    }

    #[test]
    fn duration_parses_minutes_and_compound_values() {
        assert_eq!(parse_duration("1m"), Ok(Duration::from_secs(60)));
        assert_eq!(parse_duration("1h30m"), Ok(Duration::from_secs(5400)));
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn duration_rejects_calendar_units() {
        for bad in ["1M", "1y", "1d", "2w", "3days", "1h 1d"] {
            let err = parse_duration(bad).expect_err(bad);
            assert!(err.contains("unsupported unit"), "{bad}: {err}");
        }
        assert_eq!(parse_duration("1m"), Ok(Duration::from_secs(60)));
        assert_eq!(parse_duration("2min"), Ok(Duration::from_secs(120)));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Endpoint {
        host: String,
        port: u16,
    }

    #[test]
    fn object_decodes_into_target_type() {
        let endpoint: Endpoint =
            parse_object(r#"{"host":"db.internal","port":5432}"#).expect("object");
        assert_eq!(endpoint, Endpoint { host: "db.internal".into(), port: 5432 });

        assert!(parse_object::<Endpoint>("{\"host\":").is_err());
    }
}
