// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod device;
pub mod error;
pub mod hal_traits;
pub mod response;
pub mod tables;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From device.rs
pub use device::DeviceType;

// From error.rs
pub use error::ReadError;

// From hal_traits.rs
pub use hal_traits::{ByteSource, Clock, ClockInstant};

// From response/mod.rs (and its sub-modules via its own `pub use`)
pub use response::{
    classify, decode_value, next_token, parse_package, parse_package_with, tokens,
    try_decode_value, ClassifiedLine, DecodeError, Package, ParserConfig, RawLine, ReplyKind,
    SubValue, Tokens, UnknownPrefixPolicy,
};

// From tables.rs
pub use tables::{range_to_str, status_to_str, vartype_to_str, RangeTable};

// From types.rs
pub use types::{InvalidVarType, Metadata, Status, StatusFlag, VarType};
