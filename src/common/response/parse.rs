// src/common/response/parse.rs

use log::{trace, warn};

use super::data::{Package, SubValue};
use super::error::DecodeError;
use super::tokenize::{next_token, tokens};
use super::value::decode_bytes;

use crate::common::types::{Metadata, VarType};

/// Separates the fields of a data package.
pub const FIELD_DELIMITERS: &[char] = &[';', '\n'];
/// Separates the metadata entries of a field.
pub const METADATA_DELIMITERS: &[char] = &[',', '\n'];

// Field layout: 2 variable type letters, 8 value characters, metadata.
const VALUE_START: usize = 2;
const METADATA_START: usize = 10;

const STATUS_TAG: u8 = b'1';
const RANGE_TAG: u8 = b'2';
const STATUS_MAX_DIGITS: usize = 7;
const RANGE_MAX_DIGITS: usize = 2;

/// What to do with a value whose SI prefix is not known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPrefixPolicy {
    /// Scale by zero, i.e. report `0.0`. Matches the instrument examples.
    #[default]
    Zero,
    /// Report NaN so the value cannot be mistaken for a measurement.
    Nan,
}

/// Options for [`parse_package_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    pub unknown_prefix: UnknownPrefixPolicy,
}

/// Parses a data package line (`P<field>;<field>...\n`) with the default options.
///
/// ```
/// use methodscript::common::{parse_package, Package, VarType};
///
/// let package: Package = parse_package("Pda7F85F3Fu;ba48D503Dp,10,288\n");
/// assert_eq!(package.len(), 2);
/// assert_eq!(package[1].variable_type, VarType::CURRENT);
/// assert_eq!(package[1].range(), Some(0x88));
/// ```
pub fn parse_package<const N: usize>(line: &str) -> Package<N> {
    parse_package_with(line, &ParserConfig::default())
}

/// Parses a data package line.
///
/// Never fails. Malformed fields decode to NaN and are kept so the column
/// order stays intact; fields beyond `N` are dropped and counted. A line
/// without the leading `P` gives an empty package.
pub fn parse_package_with<const N: usize>(line: &str, config: &ParserConfig) -> Package<N> {
    let mut package = Package::new();
    let Some(payload) = line.strip_prefix('P') else {
        warn!("Not a data package: {:?}", line);
        return package;
    };

    let mut cursor = Some(payload);
    while let Some(field) = next_token(&mut cursor, FIELD_DELIMITERS) {
        // Leading, trailing and doubled delimiters leave empty tokens.
        if field.is_empty() {
            continue;
        }
        package.push(parse_field(field, config));
    }

    if package.is_truncated() {
        warn!(
            "Too many sub-values in data package (> {}), {} ignored",
            N,
            package.dropped()
        );
    }
    trace!("Parsed data package with {} sub-values", package.len());
    package
}

fn parse_field(field: &str, config: &ParserConfig) -> SubValue {
    let bytes = field.as_bytes();
    let variable_type = match bytes {
        [ch1, ch2, ..] => VarType::from_chars(*ch1, *ch2),
        _ => None,
    }
    .unwrap_or_else(|| {
        warn!("Invalid variable type in field {:?}", field);
        VarType::UNKNOWN
    });

    let value_bytes = bytes.get(VALUE_START..).unwrap_or_default();
    let value = match decode_bytes(value_bytes) {
        Ok(value) => value,
        Err(DecodeError::UnknownPrefix(prefix)) => {
            warn!("Unknown SI prefix {:?} in field {:?}", prefix, field);
            match config.unknown_prefix {
                UnknownPrefixPolicy::Zero => 0.0,
                UnknownPrefixPolicy::Nan => f64::NAN,
            }
        }
        Err(err) => {
            warn!("Malformed field {:?}: {}", field, err);
            f64::NAN
        }
    };

    let metadata = field.get(METADATA_START..).map_or_else(Metadata::absent, parse_metadata);
    SubValue { variable_type, value, metadata }
}

fn parse_metadata(remainder: &str) -> Metadata {
    let mut metadata = Metadata::absent();
    for entry in tokens(remainder, METADATA_DELIMITERS) {
        // The tag is ASCII, so index 1 is a char boundary.
        match entry.as_bytes().first() {
            Some(&STATUS_TAG) => {
                if let Some(status) = parse_hex_prefix(&entry[1..], STATUS_MAX_DIGITS) {
                    metadata.status = status;
                }
            }
            Some(&RANGE_TAG) => {
                if let Some(range) = parse_hex_prefix(&entry[1..], RANGE_MAX_DIGITS) {
                    metadata.range = range;
                }
            }
            Some(_) => trace!("Ignoring unknown metadata entry {:?}", entry),
            None => {}
        }
    }
    metadata
}

/// Parses up to `max_digits` leading hex digits. `None` if there are none.
fn parse_hex_prefix(text: &str, max_digits: usize) -> Option<i32> {
    let mut value: i32 = 0;
    let mut digits = 0;
    for nibble in text.chars().take(max_digits).map_while(|ch| ch.to_digit(16)) {
        // At most 7 digits, so this stays below i32::MAX.
        value = value * 16 + nibble as i32;
        digits += 1;
    }
    (digits > 0).then_some(value)
}
