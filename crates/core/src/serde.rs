//! Serde helpers for query-string deserialization.
//!
//! Browsers and CLI tools often send empty parameters (`?q=&startDate=`);
//! these helpers treat blank values as `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating blank strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Deserialize an optional `YYYY-MM-DD` date, treating blank strings as None.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Params {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        text: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        day: Option<NaiveDate>,
    }

    #[test]
    fn test_optional_string_blank_is_none() {
        let result: Params = serde_json::from_str(r#"{"text": "   "}"#).unwrap();
        assert_eq!(result.text, None);
    }

    #[test]
    fn test_optional_string_is_trimmed() {
        let result: Params = serde_json::from_str(r#"{"text": " Margarita "}"#).unwrap();
        assert_eq!(result.text, Some("Margarita".to_string()));
    }

    #[test]
    fn test_optional_string_missing() {
        let result: Params = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(result.text, None);
    }

    #[test]
    fn test_optional_date_valid() {
        let result: Params = serde_json::from_str(r#"{"day": "2025-07-04"}"#).unwrap();
        assert_eq!(result.day, NaiveDate::from_ymd_opt(2025, 7, 4));
    }

    #[test]
    fn test_optional_date_empty() {
        let result: Params = serde_json::from_str(r#"{"day": ""}"#).unwrap();
        assert_eq!(result.day, None);
    }

    #[test]
    fn test_optional_date_invalid() {
        let result: Result<Params, _> = serde_json::from_str(r#"{"day": "04/07/2025"}"#);
        assert!(result.is_err());
    }
}
