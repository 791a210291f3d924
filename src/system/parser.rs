//! snmpget output decoder.
//! Converts one response line into a typed value according to the parameter kind.

use crate::ups::error::DecodeError;
use crate::ups::types::{DecodedValue, ParameterKind};

/// Decode one snmpget line.
/// Input:  ".1.3.6.1.4.1.318.1.1.1.2.2.1.0 = Gauge32: 87"
/// The second-to-last token is the type tag, the last one the literal.
pub fn decode(kind: ParameterKind, line: &str) -> Result<DecodedValue, DecodeError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let expected = kind.expected_tag();

    let (tag, literal) = match tokens.as_slice() {
        [.., tag, literal] => (*tag, *literal),
        _ => {
            return Err(DecodeError::UnexpectedTypeTag {
                expected,
                line: line.to_string(),
            })
        }
    };

    if tag != expected {
        return Err(DecodeError::UnexpectedTypeTag {
            expected,
            line: line.to_string(),
        });
    }

    let value: i64 = literal.parse().map_err(|_| DecodeError::MalformedNumber {
        line: line.to_string(),
    })?;

    if kind.is_boolean() {
        // Only exactly 1 is true; other integers are false, never an error
        Ok(DecodedValue::Boolean(value == 1))
    } else {
        Ok(DecodedValue::Integer(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OID: &str = ".1.3.6.1.4.1.318.1.1.1.2.2.4.0";

    #[test]
    fn test_boolean_one_is_true() {
        let v = decode(ParameterKind::ReadOnlyBoolean, &format!("{OID} INTEGER: 1")).unwrap();
        assert_eq!(v, DecodedValue::Boolean(true));
    }

    #[test]
    fn test_boolean_other_values_are_false() {
        for literal in ["0", "2", "7", "-1"] {
            let v = decode(ParameterKind::ReadOnlyBoolean, &format!("{OID} INTEGER: {literal}")).unwrap();
            assert_eq!(v, DecodedValue::Boolean(false), "literal {literal}");
        }
        let v = decode(ParameterKind::Boolean, &format!("{OID} INTEGER: 7")).unwrap();
        assert_eq!(v, DecodedValue::Boolean(false));
    }

    #[test]
    fn test_gauge_requires_gauge_tag() {
        let err = decode(ParameterKind::ReadOnlyGauge, &format!("{OID} INTEGER: 42")).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedTypeTag { expected: "Gauge32:", .. }));

        let v = decode(ParameterKind::ReadOnlyGauge, &format!("{OID} Gauge32: 42")).unwrap();
        assert_eq!(v, DecodedValue::Integer(42));
    }

    #[test]
    fn test_integer_rejects_gauge_tag() {
        let err = decode(ParameterKind::ReadOnlyInteger, &format!("{OID} Gauge32: 42")).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedTypeTag { expected: "INTEGER:", .. }));
    }

    #[test]
    fn test_integer_keeps_sign() {
        let v = decode(ParameterKind::Integer, &format!("{OID} INTEGER: -15")).unwrap();
        assert_eq!(v, DecodedValue::Integer(-15));
    }

    #[test]
    fn test_accepts_equals_separator() {
        let v = decode(ParameterKind::ReadOnlyInteger, &format!("{OID} = INTEGER: 2")).unwrap();
        assert_eq!(v, DecodedValue::Integer(2));
    }

    #[test]
    fn test_malformed_number() {
        let line = format!("{OID} INTEGER: onLine(2)");
        let err = decode(ParameterKind::ReadOnlyInteger, &line).unwrap_err();
        assert_eq!(err, DecodeError::MalformedNumber { line });
    }

    #[test]
    fn test_short_line_is_tag_error() {
        let err = decode(ParameterKind::ReadOnlyInteger, "2").unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedTypeTag { .. }));
        let err = decode(ParameterKind::ReadOnlyInteger, "").unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedTypeTag { .. }));
    }

    #[test]
    fn test_error_carries_line() {
        let line = format!("{OID} STRING: \"x\"");
        match decode(ParameterKind::ReadOnlyInteger, &line) {
            Err(DecodeError::UnexpectedTypeTag { line: l, .. }) => assert_eq!(l, line),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
