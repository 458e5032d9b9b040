// src/common/types.rs

use core::fmt;

use super::tables;

// --- MethodSCRIPT Variable Type ---

/// Identifies the physical quantity of a sub-value.
///
/// On the wire this is a two-letter code: a category letter (`a` potential,
/// `b` current, `c` impedance, `d` applied, `e` other, ...) followed by a
/// subtype letter. The code is packed densely as `(c1 - 'a') * 26 + (c2 - 'a')`,
/// so `"aa"` is 0 and `"zz"` is 675.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub struct VarType(u16);

impl VarType {
    /// Number of distinct codes (`"aa"` through `"zz"`).
    pub const COUNT: u16 = 26 * 26;

    // undefined / not set
    pub const UNKNOWN: VarType = VarType::from_letters(b'a', b'a');
    // 'a' category: potential
    pub const POTENTIAL: VarType = VarType::from_letters(b'a', b'b'); // WE / SE vs RE
    pub const POTENTIAL_CE: VarType = VarType::from_letters(b'a', b'c'); // CE vs GND
    pub const POTENTIAL_SE: VarType = VarType::from_letters(b'a', b'd'); // SE vs GND
    pub const POTENTIAL_RE: VarType = VarType::from_letters(b'a', b'e'); // RE vs GND
    pub const POTENTIAL_WE: VarType = VarType::from_letters(b'a', b'f'); // WE vs GND
    pub const POTENTIAL_WE_VS_CE: VarType = VarType::from_letters(b'a', b'g'); // WE / SE vs CE
    pub const POTENTIAL_AIN0: VarType = VarType::from_letters(b'a', b's');
    pub const POTENTIAL_AIN1: VarType = VarType::from_letters(b'a', b't');
    pub const POTENTIAL_AIN2: VarType = VarType::from_letters(b'a', b'u');
    pub const POTENTIAL_AIN3: VarType = VarType::from_letters(b'a', b'v');
    pub const POTENTIAL_AIN4: VarType = VarType::from_letters(b'a', b'w');
    pub const POTENTIAL_AIN5: VarType = VarType::from_letters(b'a', b'x');
    pub const POTENTIAL_AIN6: VarType = VarType::from_letters(b'a', b'y');
    pub const POTENTIAL_AIN7: VarType = VarType::from_letters(b'a', b'z');
    // 'b' category: current
    pub const CURRENT: VarType = VarType::from_letters(b'b', b'a'); // WE current
    // 'c' category: impedance
    pub const PHASE: VarType = VarType::from_letters(b'c', b'a');
    pub const IMP: VarType = VarType::from_letters(b'c', b'b');
    pub const ZREAL: VarType = VarType::from_letters(b'c', b'c');
    pub const ZIMAG: VarType = VarType::from_letters(b'c', b'd');
    pub const EIS_TDD_E: VarType = VarType::from_letters(b'c', b'e');
    pub const EIS_TDD_I: VarType = VarType::from_letters(b'c', b'f');
    pub const EIS_FS: VarType = VarType::from_letters(b'c', b'g');
    pub const EIS_E_AC: VarType = VarType::from_letters(b'c', b'h');
    pub const EIS_E_DC: VarType = VarType::from_letters(b'c', b'i');
    pub const EIS_I_AC: VarType = VarType::from_letters(b'c', b'j');
    pub const EIS_I_DC: VarType = VarType::from_letters(b'c', b'k');
    // 'd' category: applied
    pub const CELL_SET_POTENTIAL: VarType = VarType::from_letters(b'd', b'a');
    pub const CELL_SET_CURRENT: VarType = VarType::from_letters(b'd', b'b');
    pub const CELL_SET_FREQUENCY: VarType = VarType::from_letters(b'd', b'c');
    pub const CELL_SET_AMPLITUDE: VarType = VarType::from_letters(b'd', b'd');
    // 'e' category: other
    pub const CHANNEL: VarType = VarType::from_letters(b'e', b'a');
    pub const TIME: VarType = VarType::from_letters(b'e', b'b');
    pub const PIN_MSK: VarType = VarType::from_letters(b'e', b'c');
    pub const TEMPERATURE: VarType = VarType::from_letters(b'e', b'd');
    // 'g' category: device specific diagnostics
    pub const DEV_ADC_OFFSET: VarType = VarType::from_letters(b'g', b'a');
    pub const DEV_HS_EX: VarType = VarType::from_letters(b'g', b'b');
    // Generic types (reserved but not implemented)
    pub const CURRENT_GENERIC1: VarType = VarType::from_letters(b'h', b'a');
    pub const CURRENT_GENERIC2: VarType = VarType::from_letters(b'h', b'b');
    pub const CURRENT_GENERIC3: VarType = VarType::from_letters(b'h', b'c');
    pub const CURRENT_GENERIC4: VarType = VarType::from_letters(b'h', b'd');
    pub const POTENTIAL_GENERIC1: VarType = VarType::from_letters(b'i', b'a');
    pub const POTENTIAL_GENERIC2: VarType = VarType::from_letters(b'i', b'b');
    pub const POTENTIAL_GENERIC3: VarType = VarType::from_letters(b'i', b'c');
    pub const POTENTIAL_GENERIC4: VarType = VarType::from_letters(b'i', b'd');
    pub const MISC_GENERIC1: VarType = VarType::from_letters(b'j', b'a');
    pub const MISC_GENERIC2: VarType = VarType::from_letters(b'j', b'b');
    pub const MISC_GENERIC3: VarType = VarType::from_letters(b'j', b'c');
    pub const MISC_GENERIC4: VarType = VarType::from_letters(b'j', b'd');

    // Only used for the constants above, where the letters are known to be valid.
    const fn from_letters(ch1: u8, ch2: u8) -> Self {
        VarType((ch1 - b'a') as u16 * 26 + (ch2 - b'a') as u16)
    }

    /// Creates a variable type from its two code letters.
    ///
    /// Returns `None` unless both bytes are lowercase ASCII letters.
    pub const fn from_chars(ch1: u8, ch2: u8) -> Option<Self> {
        if ch1.is_ascii_lowercase() && ch2.is_ascii_lowercase() {
            Some(Self::from_letters(ch1, ch2))
        } else {
            None
        }
    }

    /// Parses a two-letter code such as `"ba"`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.as_bytes() {
            [ch1, ch2] => Self::from_chars(*ch1, *ch2),
            _ => None,
        }
    }

    /// Creates a variable type from its packed numeric value (0..=675).
    pub const fn from_u16(value: u16) -> Option<Self> {
        if value < Self::COUNT {
            Some(VarType(value))
        } else {
            None
        }
    }

    /// Returns the packed numeric value.
    #[inline]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the two code letters, e.g. `[b'b', b'a']` for [`VarType::CURRENT`].
    pub const fn letters(&self) -> [u8; 2] {
        [b'a' + (self.0 / 26) as u8, b'a' + (self.0 % 26) as u8]
    }

    /// Returns the category letter (first code letter).
    #[inline]
    pub const fn category(&self) -> char {
        self.letters()[0] as char
    }

    /// Human-readable name, `"Undefined variable type"` for unmapped codes.
    pub fn name(&self) -> &'static str {
        tables::vartype_to_str(*self)
    }

    /// Unit of the decoded value, `"?"` if not known.
    pub fn unit(&self) -> &'static str {
        tables::vartype_unit(*self)
    }
}

/// A packed variable type value outside `0..=675`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Variable type value {0} out of range (0..=675)")]
pub struct InvalidVarType(pub u16);

impl TryFrom<u16> for VarType {
    type Error = InvalidVarType;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        VarType::from_u16(value).ok_or(InvalidVarType(value))
    }
}

impl From<VarType> for u16 {
    fn from(variable_type: VarType) -> u16 {
        variable_type.as_u16()
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [ch1, ch2] = self.letters();
        write!(f, "{}{}", ch1 as char, ch2 as char)
    }
}

// --- Measurement Status ---

/// One bit of the status metadata.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum StatusFlag {
    /// Loop timing not met
    TimingError = 0x1,
    /// Current overload
    Overload = 0x2,
    /// Current underload
    Underload = 0x4,
    /// Current overload warning
    OverloadWarning = 0x8,
}

impl StatusFlag {
    /// All flags, lowest bit first.
    pub const ALL: [StatusFlag; 4] = [
        StatusFlag::TimingError,
        StatusFlag::Overload,
        StatusFlag::Underload,
        StatusFlag::OverloadWarning,
    ];

    /// Tries to convert a single-bit value into a flag.
    pub fn from_bit(bit: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| *flag as u32 == bit)
    }

    #[inline]
    pub const fn bit(&self) -> u32 {
        *self as u32
    }

    pub fn name(&self) -> &'static str {
        tables::status_to_str(self.bit())
    }
}

/// Status metadata bitmask of a sub-value. Zero means OK.
///
/// All bits are kept as received; [`Status::first_flag`] and the
/// `Display` impl are only two ways of summarising them.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status(u32);

impl Status {
    pub const OK: Status = Status(0);

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Status(bits)
    }

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_ok(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(&self, flag: StatusFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Iterates over the known flags that are set, lowest bit first.
    pub fn flags(&self) -> impl Iterator<Item = StatusFlag> {
        let status = *self;
        StatusFlag::ALL.into_iter().filter(move |flag| status.contains(*flag))
    }

    /// The lowest set flag, or `None` when the status is OK.
    pub fn first_flag(&self) -> Option<StatusFlag> {
        self.flags().next()
    }
}

impl fmt::Display for Status {
    /// Writes `"OK"` or every set flag joined with `" + "`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return f.write_str(tables::status_to_str(0));
        }
        let mut first = true;
        for flag in self.flags() {
            if !first {
                f.write_str(" + ")?;
            }
            f.write_str(flag.name())?;
            first = false;
        }
        if first {
            // only unknown bits set
            f.write_str(tables::status_to_str(self.0))?;
        }
        Ok(())
    }
}

// --- Sub-value Metadata ---

/// Optional metadata attached to a sub-value.
///
/// Fields that were not present on the line hold [`Metadata::ABSENT`]. A
/// decoded value is never negative, so absence and a genuine zero stay
/// distinguishable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Status bitmask, or `ABSENT`.
    pub status: i32,
    /// Device- and variable-type-dependent range code, or `ABSENT`.
    pub range: i32,
}

impl Metadata {
    /// Sentinel for a metadata field that was not given.
    pub const ABSENT: i32 = -1;

    /// Metadata with every field absent.
    pub const fn absent() -> Self {
        Metadata { status: Self::ABSENT, range: Self::ABSENT }
    }

    pub fn status(&self) -> Option<Status> {
        u32::try_from(self.status).ok().map(Status::from_bits)
    }

    pub fn range(&self) -> Option<u32> {
        u32::try_from(self.range).ok()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.status < 0 && self.range < 0
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::absent()
    }
}
