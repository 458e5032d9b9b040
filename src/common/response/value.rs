// src/common/response/value.rs

//! Decoder for the 8-character value part of a data package field.
//!
//! Layout: 7 hexadecimal digits holding the value plus [`VALUE_OFFSET`],
//! followed by one SI prefix character. `"8000000 "` is zero,
//! `"8000001m"` is 1e-3.

use super::error::DecodeError;

/// Added to every value on the wire so that negative values stay positive.
pub const VALUE_OFFSET: i64 = 0x800_0000;

/// Width of the encoded value including the SI prefix.
pub const VALUE_FIELD_LEN: usize = 8;

/// Field sent for values that are not a number.
pub const NAN_SENTINEL: &str = "     nan";

const HEX_DIGITS: usize = VALUE_FIELD_LEN - 1;

/// Returns the scale factor for an SI prefix character.
///
/// `' '` and `'i'` (integer values) both scale by 1.
pub fn si_prefix_scale(prefix: char) -> Option<f64> {
    let scale = match prefix {
        'a' => 1e-18,
        'f' => 1e-15,
        'p' => 1e-12,
        'n' => 1e-9,
        'u' => 1e-6,
        'm' => 1e-3,
        ' ' | 'i' => 1.0,
        'k' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        'T' => 1e12,
        'P' => 1e15,
        'E' => 1e18,
        _ => return None,
    };
    Some(scale)
}

/// Decodes a value field, reporting every malformation.
///
/// Bytes after the first 8 are ignored, so the rest of a field (metadata)
/// may be passed along.
pub fn try_decode_value(field: &str) -> Result<f64, DecodeError> {
    decode_bytes(field.as_bytes())
}

/// Decodes a value field the way the instrument examples always have.
///
/// The NaN sentinel and malformed fields decode to NaN. An unknown SI
/// prefix scales the value by zero and so decodes to `0.0`; use
/// [`try_decode_value`] to detect that case.
pub fn decode_value(field: &str) -> f64 {
    match try_decode_value(field) {
        Ok(value) => value,
        Err(DecodeError::UnknownPrefix(_)) => 0.0,
        Err(_) => f64::NAN,
    }
}

pub(crate) fn decode_bytes(field: &[u8]) -> Result<f64, DecodeError> {
    if field.starts_with(NAN_SENTINEL.as_bytes()) {
        return Ok(f64::NAN);
    }
    let (digits, prefix) = match field.get(..VALUE_FIELD_LEN) {
        Some(value) => value.split_at(HEX_DIGITS),
        None => return Err(DecodeError::Truncated { len: field.len() }),
    };
    // Parsed separately from the prefix: 'a', 'f' and 'E' are hex digits too.
    let raw = digits
        .iter()
        .try_fold(0i64, |acc, &digit| {
            char::from(digit).to_digit(16).map(|nibble| acc * 16 + i64::from(nibble))
        })
        .ok_or(DecodeError::InvalidDigits)?;

    let prefix = prefix.first().map_or(' ', |&byte| char::from(byte));
    let scale = si_prefix_scale(prefix).ok_or(DecodeError::UnknownPrefix(prefix))?;
    Ok((raw - VALUE_OFFSET) as f64 * scale)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_offset_extremes() {
        assert_eq!(decode_value("0000000 "), -134_217_728.0);
        assert_eq!(decode_value("8000000 "), 0.0);
        assert_eq!(decode_value("FFFFFFF "), 134_217_727.0);
    }

    #[test]
    fn test_si_prefixes() {
        assert_eq!(decode_value("8000001m"), 1e-3);
        assert_eq!(decode_value("8000002k"), 2e3);
        assert_eq!(decode_value("800000Ai"), 10.0);
        assert_eq!(decode_value("7FFFFFFM"), -1e6);
        // 'a' prefix right after hex digits
        assert_eq!(decode_value("800000Aa"), 10.0 * 1e-18);
    }

    #[test]
    fn test_real_fields() {
        // Potential and current from an EmStat Pico LSV
        let potential = decode_value("7F85F3Fu");
        assert!((potential - (-499_905e-6)).abs() < 1e-12);
        let current = decode_value("48D503Dp");
        assert!((current - (-57_847_747e-12)).abs() < 1e-18);
    }

    #[test]
    fn test_nan_sentinel() {
        assert!(decode_value("     nan").is_nan());
        assert!(decode_value("     nan,10,288").is_nan());
        assert!(try_decode_value("     nan").unwrap().is_nan());
    }

    #[test]
    fn test_unknown_prefix_quirk() {
        assert_eq!(decode_value("8000005x"), 0.0);
        assert_eq!(try_decode_value("8000005x"), Err(DecodeError::UnknownPrefix('x')));
    }

    #[test]
    fn test_malformed_fields() {
        assert_eq!(try_decode_value("800000"), Err(DecodeError::Truncated { len: 6 }));
        assert_eq!(try_decode_value(""), Err(DecodeError::Truncated { len: 0 }));
        assert_eq!(try_decode_value("80G0000 "), Err(DecodeError::InvalidDigits));
        assert_eq!(try_decode_value("+800000 "), Err(DecodeError::InvalidDigits));
        assert!(decode_value("8000").is_nan());
        assert!(decode_value("zzzzzzzm").is_nan());
    }

    #[test]
    fn test_prefix_table() {
        assert_eq!(si_prefix_scale(' '), Some(1.0));
        assert_eq!(si_prefix_scale('i'), Some(1.0));
        assert_eq!(si_prefix_scale('E'), Some(1e18));
        assert_eq!(si_prefix_scale('a'), Some(1e-18));
        assert_eq!(si_prefix_scale('K'), None);
    }

    proptest! {
        #[test]
        fn prop_decodes_biased_hex(
            raw in 0u32..0x1000_0000,
            prefix in prop::sample::select(vec![' ', 'm', 'u', 'n', 'k', 'i']),
        ) {
            let field = format!("{:07X}{}", raw, prefix);
            let scale = si_prefix_scale(prefix).unwrap();
            let expected = (i64::from(raw) - VALUE_OFFSET) as f64 * scale;
            prop_assert_eq!(try_decode_value(&field), Ok(expected));
        }

        #[test]
        fn prop_nan_sentinel_ignores_trailing(rest in ".{0,16}") {
            let field = format!("{}{}", NAN_SENTINEL, rest);
            prop_assert!(decode_value(&field).is_nan());
        }

        #[test]
        fn prop_never_panics(field in ".{0,12}") {
            let _ = decode_value(&field);
        }
    }
}
