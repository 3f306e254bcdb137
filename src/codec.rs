//! Packet codec for inbound EMG datagrams.
//!
//! Each UDP payload is a small JSON object:
//!
//! ```text
//! {"ts": 12.5, "aTA": 0.42, "aGAS": 0.77, "valid": true}
//! ```
//!
//! Senders are loose about types, so the codec is deliberately permissive:
//! numbers may arrive as strings, and the validity flag may be a bool, a
//! number, or a string. Decoding is a pure function; malformed input is
//! classified into a [`DecodeError`], never a panic.

use crate::types::Sample;
use serde_json::Value;

/// Classified decode failure for one packet.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Payload is not valid UTF-8
    #[error("Invalid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// Payload is not a JSON object
    #[error("Invalid JSON: {0}")]
    Syntax(String),

    /// A required field is absent
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A field value cannot be coerced to its expected type
    #[error("Field {field}: expected {expected}")]
    WrongType {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable expected type
        expected: &'static str,
    },

    /// A field value coerced to a float but is unusable (NaN activation,
    /// non-finite timestamp)
    #[error("Field {field}: value is not representable")]
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Clamp a value to the [0, 1] activation range.
///
/// ±infinity clamps to the nearest bound; NaN must be rejected by the
/// caller before clamping.
fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Coerce a JSON value to f64.
///
/// Accepts numbers directly and strings parseable as a number after
/// trimming surrounding whitespace.
fn coerce_f64(field: &'static str, value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or(DecodeError::WrongType {
            field,
            expected: "number",
        }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| DecodeError::WrongType {
            field,
            expected: "number",
        }),
        _ => Err(DecodeError::WrongType {
            field,
            expected: "number",
        }),
    }
}

/// Coerce a JSON value to bool.
///
/// Booleans pass through; numbers are truthy by nonzero check; strings are
/// trimmed, lowercased, and truthy only for {"1", "true", "yes", "y"}.
/// Everything else in a string (including "false" and "0") coerces to
/// false — this asymmetry matches the wire senders and is kept on purpose.
fn coerce_bool(field: &'static str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0) != 0.0),
        Value::String(s) => {
            let s = s.trim().to_ascii_lowercase();
            Ok(matches!(s.as_str(), "1" | "true" | "yes" | "y"))
        }
        _ => Err(DecodeError::WrongType {
            field,
            expected: "bool",
        }),
    }
}

/// Extract an activation field: numeric coercion, NaN rejection, clamping.
fn coerce_activation(field: &'static str, value: &Value) -> Result<f64> {
    let x = coerce_f64(field, value)?;
    if x.is_nan() {
        return Err(DecodeError::InvalidValue { field });
    }
    Ok(clamp01(x))
}

/// Extract the sender timestamp: numeric coercion, range left alone.
///
/// Non-finite timestamps are rejected because the snapshot artifact is
/// JSON, which cannot represent NaN or infinity.
fn coerce_timestamp(field: &'static str, value: &Value) -> Result<f64> {
    let x = coerce_f64(field, value)?;
    if !x.is_finite() {
        return Err(DecodeError::InvalidValue { field });
    }
    Ok(x)
}

/// Look up a required field in the packet object.
fn require<'a>(msg: &'a Value, field: &'static str) -> Result<&'a Value> {
    msg.get(field).ok_or(DecodeError::MissingField(field))
}

/// Decode and validate one raw UDP payload into a [`Sample`].
///
/// Pure function: no side effects, no partial state on failure. Unknown
/// extra fields are ignored.
pub fn decode(raw: &[u8]) -> Result<Sample> {
    let text = std::str::from_utf8(raw)?;
    let msg: Value =
        serde_json::from_str(text).map_err(|e| DecodeError::Syntax(e.to_string()))?;
    if !msg.is_object() {
        return Err(DecodeError::Syntax("payload is not a JSON object".into()));
    }

    Ok(Sample {
        ts: coerce_timestamp("ts", require(&msg, "ts")?)?,
        a_ta: coerce_activation("aTA", require(&msg, "aTA")?)?,
        a_gas: coerce_activation("aGAS", require(&msg, "aGAS")?)?,
        valid: coerce_bool("valid", require(&msg, "valid")?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_str(s: &str) -> Result<Sample> {
        decode(s.as_bytes())
    }

    #[test]
    fn test_decode_well_formed() {
        let sample =
            decode_str(r#"{"ts": 1.5, "aTA": 0.42, "aGAS": 0.77, "valid": true}"#).unwrap();
        assert_eq!(sample.ts, 1.5);
        assert_eq!(sample.a_ta, 0.42);
        assert_eq!(sample.a_gas, 0.77);
        assert!(sample.valid);
    }

    #[test]
    fn test_round_trip() {
        let original = Sample {
            ts: 1.5,
            a_ta: 0.42,
            a_gas: 0.77,
            valid: true,
        };
        let encoded = serde_json::to_vec(&original).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_clamping_is_total() {
        let sample =
            decode_str(r#"{"ts": 0, "aTA": -0.1, "aGAS": 1.7, "valid": 1}"#).unwrap();
        assert_eq!(sample.a_ta, 0.0);
        assert_eq!(sample.a_gas, 1.0);

        let sample =
            decode_str(r#"{"ts": 0, "aTA": -1e9, "aGAS": 1e9, "valid": 0}"#).unwrap();
        assert_eq!(sample.a_ta, 0.0);
        assert_eq!(sample.a_gas, 1.0);
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let sample =
            decode_str(r#"{"ts": " 3.25 ", "aTA": "0.5", "aGAS": "  0.25", "valid": true}"#)
                .unwrap();
        assert_eq!(sample.ts, 3.25);
        assert_eq!(sample.a_ta, 0.5);
        assert_eq!(sample.a_gas, 0.25);
    }

    #[test]
    fn test_valid_flag_coercions() {
        for (raw, expected) in [
            (r#""YES""#, true),
            (r#"" y ""#, true),
            (r#""TRUE""#, true),
            (r#""1""#, true),
            // Only the truthy set is tested; everything else is false.
            (r#""false""#, false),
            (r#""0""#, false),
            (r#""no""#, false),
            (r#""anything""#, false),
            ("1", true),
            ("0", false),
            ("2.5", true),
            ("true", true),
            ("false", false),
        ] {
            let packet = format!(r#"{{"ts": 0, "aTA": 0, "aGAS": 0, "valid": {}}}"#, raw);
            let sample = decode_str(&packet).unwrap();
            assert_eq!(sample.valid, expected, "valid={} should be {}", raw, expected);
        }
    }

    #[test]
    fn test_missing_field() {
        let err = decode_str(r#"{"ts": 0, "aTA": 0.1, "valid": true}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("aGAS")));
    }

    #[test]
    fn test_wrong_type() {
        let err =
            decode_str(r#"{"ts": 0, "aTA": [0.1], "aGAS": 0, "valid": true}"#).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::WrongType { field: "aTA", .. }
        ));

        let err =
            decode_str(r#"{"ts": 0, "aTA": 0, "aGAS": 0, "valid": null}"#).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::WrongType { field: "valid", .. }
        ));

        let err =
            decode_str(r#"{"ts": "abc", "aTA": 0, "aGAS": 0, "valid": true}"#).unwrap_err();
        assert!(matches!(err, DecodeError::WrongType { field: "ts", .. }));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = decode(&[0xff, 0xfe, 0x7b]).unwrap_err();
        assert!(matches!(err, DecodeError::Encoding(_)));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            decode_str("{not json").unwrap_err(),
            DecodeError::Syntax(_)
        ));
        assert!(matches!(
            decode_str("[1, 2, 3]").unwrap_err(),
            DecodeError::Syntax(_)
        ));
    }

    #[test]
    fn test_nan_activation_rejected() {
        // "nan" parses as f64::NAN via the string path
        let err =
            decode_str(r#"{"ts": 0, "aTA": "nan", "aGAS": 0, "valid": true}"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidValue { field: "aTA" }));
    }

    #[test]
    fn test_infinite_activation_clamps() {
        let sample =
            decode_str(r#"{"ts": 0, "aTA": "inf", "aGAS": "-inf", "valid": true}"#).unwrap();
        assert_eq!(sample.a_ta, 1.0);
        assert_eq!(sample.a_gas, 0.0);
    }

    #[test]
    fn test_non_finite_timestamp_rejected() {
        // ts range is unvalidated, but NaN/inf cannot appear in the JSON
        // snapshot artifact so they fail at decode time
        for raw in [r#""nan""#, r#""inf""#, r#""-inf""#] {
            let packet = format!(r#"{{"ts": {}, "aTA": 0.5, "aGAS": 0.5, "valid": true}}"#, raw);
            let err = decode_str(&packet).unwrap_err();
            assert!(matches!(err, DecodeError::InvalidValue { field: "ts" }));
        }

        // Negative and huge timestamps are still passed through untouched
        let sample =
            decode_str(r#"{"ts": -1e18, "aTA": 0.5, "aGAS": 0.5, "valid": true}"#).unwrap();
        assert_eq!(sample.ts, -1e18);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let sample = decode_str(
            r#"{"ts": 1, "aTA": 0.1, "aGAS": 0.2, "valid": true, "seq": 42, "debug": "x"}"#,
        )
        .unwrap();
        assert_eq!(sample.a_ta, 0.1);
    }
}
