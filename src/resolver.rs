// License: MIT

use std::num::IntErrorKind;

use log::warn;

use crate::PropsError;
use crate::ast::{DoubleLit, IntLit, Scalar};

/// Resolve a raw numeric run into a typed scalar.
///
/// Integer forms are tried before float: decimal, then `0x` hex, then `0b`
/// binary. A value that does not fit `i64` is clamped to the nearest bound
/// and flagged, never a parse failure; the raw spelling is kept alongside
/// the value either way so lossy literals stay detectable.
pub fn resolve_number(raw: &str, line: usize, column: usize) -> Result<Scalar, PropsError> {
    let (negative, body) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    if let Some(digits) = strip_radix_prefix(body, 'x') {
        return resolve_radix(raw, digits, 16, negative, line, column);
    }
    if let Some(digits) = strip_radix_prefix(body, 'b') {
        return resolve_radix(raw, digits, 2, negative, line, column);
    }

    if body.contains(['.', 'e', 'E']) {
        return body
            .parse::<f64>()
            .map(|value| {
                Scalar::Double(DoubleLit {
                    value: if negative { -value } else { value },
                    raw: raw.to_string(),
                })
            })
            .map_err(|_| invalid_number(raw, line, column));
    }

    match raw.parse::<i64>() {
        Ok(value) => Ok(Scalar::Int(IntLit {
            value,
            raw: raw.to_string(),
            clamped: false,
        })),
        Err(e) if overflowed(e.kind()) => Ok(clamped_int(raw, negative)),
        Err(_) => Err(invalid_number(raw, line, column)),
    }
}

fn strip_radix_prefix(body: &str, marker: char) -> Option<&str> {
    let rest = body.strip_prefix('0')?;
    rest.strip_prefix(marker)
        .or_else(|| rest.strip_prefix(marker.to_ascii_uppercase()))
}

fn resolve_radix(
    raw: &str,
    digits: &str,
    radix: u32,
    negative: bool,
    line: usize,
    column: usize,
) -> Result<Scalar, PropsError> {
    match i64::from_str_radix(digits, radix) {
        Ok(magnitude) => Ok(Scalar::Int(IntLit {
            value: if negative { -magnitude } else { magnitude },
            raw: raw.to_string(),
            clamped: false,
        })),
        Err(e) if overflowed(e.kind()) => Ok(clamped_int(raw, negative)),
        Err(_) => Err(invalid_number(raw, line, column)),
    }
}

fn overflowed(kind: &IntErrorKind) -> bool {
    matches!(kind, IntErrorKind::PosOverflow | IntErrorKind::NegOverflow)
}

fn clamped_int(raw: &str, negative: bool) -> Scalar {
    let value = if negative { i64::MIN } else { i64::MAX };
    warn!("numeric literal '{}' does not fit i64, clamping to {}", raw, value);
    Scalar::Int(IntLit {
        value,
        raw: raw.to_string(),
        clamped: true,
    })
}

fn invalid_number(raw: &str, line: usize, column: usize) -> PropsError {
    PropsError::TypeError {
        message: format!("Invalid number '{}'", raw),
        line,
        column,
        hint: None,
        code: Some(102),
    }
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;

    fn int(raw: &str) -> IntLit {
        match resolve_number(raw, 1, 1).unwrap() {
            Scalar::Int(i) => i,
            other => panic!("expected int for '{}', got {:?}", raw, other),
        }
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(int("42").value, 42);
        assert_eq!(int("-17").value, -17);
        assert_eq!(int("+5").value, 5);
    }

    #[test]
    fn test_hex_and_binary() {
        let lit = int("0x1F");
        assert_eq!(lit.value, 31);
        assert_eq!(lit.raw, "0x1F");
        assert!(!lit.clamped);

        assert_eq!(int("0b101").value, 5);
        assert_eq!(int("-0x10").value, -16);
    }

    #[test]
    fn test_floats() {
        match resolve_number("1.5", 1, 1).unwrap() {
            Scalar::Double(d) => {
                assert_eq!(d.value, 1.5);
                assert_eq!(d.raw, "1.5");
            }
            other => panic!("expected double, got {:?}", other),
        }
        match resolve_number("-2.5e3", 1, 1).unwrap() {
            Scalar::Double(d) => assert_eq!(d.value, -2500.0),
            other => panic!("expected double, got {:?}", other),
        }
    }

    #[test]
    fn test_overflow_clamps_and_keeps_raw() {
        let lit = int("9223372036854775808");
        assert_eq!(lit.value, i64::MAX);
        assert!(lit.clamped);
        assert_eq!(lit.raw, "9223372036854775808");

        let lit = int("-9223372036854775809");
        assert_eq!(lit.value, i64::MIN);
        assert!(lit.clamped);

        let lit = int("0xFFFFFFFFFFFFFFFF");
        assert_eq!(lit.value, i64::MAX);
        assert!(lit.clamped);
    }

    #[test]
    fn test_invalid_digits_error() {
        assert!(matches!(
            resolve_number("0xZZ", 3, 7),
            Err(PropsError::TypeError { line: 3, column: 7, .. })
        ));
        assert!(matches!(resolve_number("0b12", 1, 1), Err(PropsError::TypeError { .. })));
    }
}
