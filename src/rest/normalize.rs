//! Response normalization: wire JSON to typed resources.
//!
//! The API is loose about representation: money and weight fields may arrive
//! as strings or numbers, and timestamps may arrive as ISO-8601 strings or as
//! epoch milliseconds. Normalization happens in two steps:
//!
//! 1. [`Normalize::coerce`] rewrites the raw JSON object in place, turning
//!    numeric-like values into JSON numbers and date-like values into
//!    canonical RFC 3339 strings. Only fields that are present are touched.
//! 2. `serde` deserializes the coerced object into the resource type, so
//!    absent optional fields stay `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Reasons a response body could not be normalized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The value where a resource was expected is not a JSON object.
    #[error("expected a JSON object but found {found}")]
    NotAnObject {
        /// The JSON kind that was found instead.
        found: &'static str,
    },

    /// A date field holds a value that is not a recognizable timestamp.
    #[error("field '{field}' is not a valid date: {value}")]
    InvalidDate {
        /// The offending field.
        field: String,
        /// The offending value, as JSON.
        value: String,
    },

    /// A numeric field holds a value that is not a number.
    #[error("field '{field}' is not a valid number: {value}")]
    InvalidNumber {
        /// The offending field.
        field: String,
        /// The offending value, as JSON.
        value: String,
    },

    /// The coerced object does not match the resource schema.
    #[error("{0}")]
    Schema(String),
}

/// A resource that can be built from a raw API response object.
///
/// Implementors list their coercions in [`coerce`](Normalize::coerce); the
/// provided [`normalize`](Normalize::normalize) runs them and deserializes.
///
/// # Example
///
/// ```rust
/// use channelape::rest::{coerce_dates, Normalize, NormalizeError};
/// use chrono::{DateTime, Utc};
/// use serde::Deserialize;
/// use serde_json::{json, Map, Value};
///
/// #[derive(Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct Stamp {
///     created_at: DateTime<Utc>,
/// }
///
/// impl Normalize for Stamp {
///     fn coerce(object: &mut Map<String, Value>) -> Result<(), NormalizeError> {
///         coerce_dates(object, &["createdAt"])
///     }
/// }
///
/// let stamp = Stamp::normalize(json!({"createdAt": 1525198078009_i64})).unwrap();
/// assert_eq!(stamp.created_at.to_rfc3339(), "2018-05-01T18:07:58.009+00:00");
/// ```
pub trait Normalize: DeserializeOwned {
    /// Rewrites wire representations in place before deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError`] if a present field cannot be coerced.
    fn coerce(_object: &mut Map<String, Value>) -> Result<(), NormalizeError> {
        Ok(())
    }

    /// Coerces and deserializes a raw resource.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError`] if `value` is not an object, a field cannot
    /// be coerced, or the result does not match the resource schema.
    fn normalize(value: Value) -> Result<Self, NormalizeError> {
        let mut value = value;
        match &mut value {
            Value::Object(object) => Self::coerce(object)?,
            other => {
                return Err(NormalizeError::NotAnObject {
                    found: json_kind(other),
                })
            }
        }
        serde_json::from_value(value).map_err(|e| NormalizeError::Schema(e.to_string()))
    }
}

/// Returns a short name for the kind of a JSON value.
#[must_use]
pub const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Coerces each present field in `fields` to a JSON number.
///
/// Strings are parsed as integers first, then as decimals. Numbers and
/// `null` are left untouched.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidNumber`] for any other value.
pub fn coerce_numbers(
    object: &mut Map<String, Value>,
    fields: &[&str],
) -> Result<(), NormalizeError> {
    for field in fields {
        let Some(value) = object.get_mut(*field) else {
            continue;
        };
        let coerced = match value {
            Value::Null | Value::Number(_) => continue,
            Value::String(text) => parse_number(text.trim()),
            _ => None,
        };
        match coerced {
            Some(number) => *value = Value::Number(number),
            None => {
                return Err(NormalizeError::InvalidNumber {
                    field: (*field).to_string(),
                    value: value.to_string(),
                })
            }
        }
    }
    Ok(())
}

/// Coerces each present field in `fields` to a JSON integer.
///
/// Accepts integers, and whole-valued decimals given as numbers or strings
/// (`"1.0"` becomes `1`). `null` is left untouched.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidNumber`] for fractional or non-numeric
/// values.
pub fn coerce_integers(
    object: &mut Map<String, Value>,
    fields: &[&str],
) -> Result<(), NormalizeError> {
    for field in fields {
        let Some(value) = object.get_mut(*field) else {
            continue;
        };
        let coerced = match value {
            Value::Null => continue,
            Value::Number(number) => whole_number(number),
            Value::String(text) => parse_number(text.trim()).as_ref().and_then(whole_number),
            _ => None,
        };
        match coerced {
            Some(integer) => *value = Value::Number(Number::from(integer)),
            None => {
                return Err(NormalizeError::InvalidNumber {
                    field: (*field).to_string(),
                    value: value.to_string(),
                })
            }
        }
    }
    Ok(())
}

/// Coerces each present field in `fields` to a canonical RFC 3339 string.
///
/// Accepted inputs are RFC 3339 strings, offset-less ISO-8601 date-times
/// (read as UTC), minute-precision date-times, calendar dates (midnight UTC)
/// and epoch milliseconds. `null` is left untouched.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidDate`] for any other value.
pub fn coerce_dates(object: &mut Map<String, Value>, fields: &[&str]) -> Result<(), NormalizeError> {
    for field in fields {
        let Some(value) = object.get_mut(*field) else {
            continue;
        };
        let parsed = match value {
            Value::Null => continue,
            Value::String(text) => parse_date(text.trim()),
            Value::Number(millis) => millis
                .as_i64()
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
            _ => None,
        };
        match parsed {
            Some(date) => {
                *value = Value::String(date.to_rfc3339_opts(SecondsFormat::AutoSi, true));
            }
            None => {
                return Err(NormalizeError::InvalidDate {
                    field: (*field).to_string(),
                    value: value.to_string(),
                })
            }
        }
    }
    Ok(())
}

/// Applies `coerce` to every object in the array stored under `field`.
///
/// An absent or `null` field is skipped. Every element is normalized on its
/// own, so the same entity appearing in two arrays is coerced twice.
///
/// # Errors
///
/// Returns [`NormalizeError::NotAnObject`] if an element is not an object, or
/// the first error returned by `coerce`.
pub fn coerce_each<F>(
    object: &mut Map<String, Value>,
    field: &str,
    coerce: F,
) -> Result<(), NormalizeError>
where
    F: Fn(&mut Map<String, Value>) -> Result<(), NormalizeError>,
{
    let Some(Value::Array(elements)) = object.get_mut(field) else {
        return Ok(());
    };
    for element in elements {
        match element {
            Value::Object(inner) => coerce(inner)?,
            other => {
                return Err(NormalizeError::NotAnObject {
                    found: json_kind(other),
                })
            }
        }
    }
    Ok(())
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(integer) = text.parse::<i64>() {
        return Some(Number::from(integer));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

fn whole_number(number: &Number) -> Option<i64> {
    if let Some(integer) = number.as_i64() {
        return Some(integer);
    }
    let float = number.as_f64()?;
    // Range check keeps the cast exact.
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    // Minute precision with an offset, e.g. `2018-05-01T18:07Z`.
    if let Ok(date) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M%#z") {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_numbers_from_strings_and_numbers() {
        let mut map = object(json!({"price": "15.99", "grams": "120", "quantity": 2, "tax": null}));
        coerce_numbers(&mut map, &["price", "grams", "quantity", "tax"]).unwrap();

        assert_eq!(map["price"], json!(15.99));
        assert_eq!(map["grams"], json!(120));
        assert_eq!(map["quantity"], json!(2));
        assert_eq!(map["tax"], json!(null));
    }

    #[test]
    fn test_absent_numbers_stay_absent() {
        let mut map = object(json!({"price": 1}));
        coerce_numbers(&mut map, &["price", "totalShippingTax"]).unwrap();
        assert!(!map.contains_key("totalShippingTax"));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let mut map = object(json!({"price": "free"}));
        let error = coerce_numbers(&mut map, &["price"]).unwrap_err();
        assert_eq!(
            error,
            NormalizeError::InvalidNumber {
                field: "price".to_string(),
                value: "\"free\"".to_string(),
            }
        );
    }

    #[test]
    fn test_dates_are_canonicalized() {
        let mut map = object(json!({
            "a": "2018-05-01T18:07:58.009Z",
            "b": "2018-05-01T14:07:58.009-04:00",
            "c": 1_525_198_078_009_i64,
            "d": "2018-05-01T18:07:58.009",
        }));
        coerce_dates(&mut map, &["a", "b", "c", "d"]).unwrap();

        for field in ["a", "b", "c", "d"] {
            assert_eq!(map[field], json!("2018-05-01T18:07:58.009Z"), "field {field}");
        }
    }

    #[test]
    fn test_short_iso_dates_are_canonicalized() {
        let mut map = object(json!({
            "dateOnly": "2018-05-01",
            "minutesZulu": "2018-05-01T18:07Z",
            "minutesOffset": "2018-05-01T14:07-04:00",
            "minutesNaive": "2018-05-01T18:07",
        }));
        coerce_dates(
            &mut map,
            &["dateOnly", "minutesZulu", "minutesOffset", "minutesNaive"],
        )
        .unwrap();

        assert_eq!(map["dateOnly"], json!("2018-05-01T00:00:00Z"));
        assert_eq!(map["minutesZulu"], json!("2018-05-01T18:07:00Z"));
        assert_eq!(map["minutesOffset"], json!("2018-05-01T18:07:00Z"));
        assert_eq!(map["minutesNaive"], json!("2018-05-01T18:07:00Z"));
    }

    #[test]
    fn test_integers_accept_whole_decimals() {
        let mut map = object(json!({
            "a": "1.0",
            "b": 2.0,
            "c": " 3 ",
            "d": 4,
            "e": null,
        }));
        coerce_integers(&mut map, &["a", "b", "c", "d", "e", "missing"]).unwrap();

        assert_eq!(map["a"], json!(1));
        assert!(map["a"].is_i64());
        assert_eq!(map["b"], json!(2));
        assert_eq!(map["c"], json!(3));
        assert_eq!(map["d"], json!(4));
        assert_eq!(map["e"], json!(null));
        assert!(!map.contains_key("missing"));
    }

    #[test]
    fn test_fractional_integer_is_rejected() {
        let mut map = object(json!({"quantity": "1.5"}));
        assert_eq!(
            coerce_integers(&mut map, &["quantity"]).unwrap_err(),
            NormalizeError::InvalidNumber {
                field: "quantity".to_string(),
                value: "\"1.5\"".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let mut map = object(json!({"createdAt": "yesterday"}));
        assert!(matches!(
            coerce_dates(&mut map, &["createdAt"]),
            Err(NormalizeError::InvalidDate { field, .. }) if field == "createdAt"
        ));
    }

    #[test]
    fn test_coerce_each_visits_every_element() {
        let mut map = object(json!({"lineItems": [{"price": "1.5"}, {"price": "2"}]}));
        coerce_each(&mut map, "lineItems", |item| coerce_numbers(item, &["price"])).unwrap();
        assert_eq!(map["lineItems"], json!([{"price": 1.5}, {"price": 2}]));
    }

    #[test]
    fn test_coerce_each_rejects_non_objects() {
        let mut map = object(json!({"lineItems": [1]}));
        assert!(matches!(
            coerce_each(&mut map, "lineItems", |_| Ok(())),
            Err(NormalizeError::NotAnObject { found: "a number" })
        ));
    }

    #[derive(Debug, Deserialize)]
    struct Plain {
        name: String,
    }

    impl Normalize for Plain {}

    #[test]
    fn test_normalize_rejects_non_objects_and_schema_mismatches() {
        assert!(matches!(
            Plain::normalize(json!([])),
            Err(NormalizeError::NotAnObject { found: "an array" })
        ));
        assert!(matches!(
            Plain::normalize(json!({"other": 1})),
            Err(NormalizeError::Schema(_))
        ));
        assert_eq!(Plain::normalize(json!({"name": "x"})).unwrap().name, "x");
    }
}
