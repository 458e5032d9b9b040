// src/common/tables.rs

//! Lookup tables for presenting parsed data.
//!
//! None of these are needed to parse a package correctly. Every lookup is a
//! total function with a fixed fallback string.

use super::device::DeviceType;
use super::types::VarType;

/// Fallback for variable types without a name.
pub const UNDEFINED_VARTYPE: &str = "Undefined variable type";
/// Fallback for status values that are not OK or a single known flag.
pub const UNDEFINED_STATUS: &str = "Undefined status";
/// Fallback for range codes that are not valid for the device/variable type.
pub const UNKNOWN_RANGE: &str = "Unknown/invalid range value";

/// Returns the human-readable name of a variable type.
pub fn vartype_to_str(vartype: VarType) -> &'static str {
    match vartype {
        VarType::UNKNOWN => "UNKNOWN VAR TYPE",
        VarType::POTENTIAL => "Potential",
        VarType::POTENTIAL_CE => "Potential_CE_vs_GND",
        VarType::POTENTIAL_SE => "Potential_SE_vs_GND",
        VarType::POTENTIAL_RE => "Potential_RE_vs_GND",
        VarType::POTENTIAL_WE => "Potential_WE_vs_GND",
        VarType::POTENTIAL_WE_VS_CE => "Potential_WE_vs_CE",
        VarType::POTENTIAL_AIN0 => "Potential_AIN0",
        VarType::POTENTIAL_AIN1 => "Potential_AIN1",
        VarType::POTENTIAL_AIN2 => "Potential_AIN2",
        VarType::POTENTIAL_AIN3 => "Potential_AIN3",
        VarType::POTENTIAL_AIN4 => "Potential_AIN4",
        VarType::POTENTIAL_AIN5 => "Potential_AIN5",
        VarType::POTENTIAL_AIN6 => "Potential_AIN6",
        VarType::POTENTIAL_AIN7 => "Potential_AIN7",
        VarType::CURRENT => "Current",
        VarType::PHASE => "Phase",
        VarType::IMP => "Imp",
        VarType::ZREAL => "Zreal",
        VarType::ZIMAG => "Zimag",
        VarType::EIS_TDD_E => "EIS_TDD_E",
        VarType::EIS_TDD_I => "EIS_TDD_I",
        VarType::EIS_FS => "EIS_FS",
        VarType::EIS_E_AC => "EIS_E_AC",
        VarType::EIS_E_DC => "EIS_E_DC",
        VarType::EIS_I_AC => "EIS_I_AC",
        VarType::EIS_I_DC => "EIS_I_DC",
        VarType::CELL_SET_POTENTIAL => "Cell_set_potential",
        VarType::CELL_SET_CURRENT => "Cell_set_current",
        VarType::CELL_SET_FREQUENCY => "Cell_set_frequency",
        VarType::CELL_SET_AMPLITUDE => "Cell_set_amplitude",
        VarType::CHANNEL => "Channel",
        VarType::TIME => "Time",
        VarType::PIN_MSK => "Pin_msk",
        VarType::TEMPERATURE => "Temperature",
        VarType::DEV_ADC_OFFSET => "Dev_ADC_offset",
        VarType::DEV_HS_EX => "Dev_HS_ex",
        VarType::CURRENT_GENERIC1 => "Current_generic1",
        VarType::CURRENT_GENERIC2 => "Current_generic2",
        VarType::CURRENT_GENERIC3 => "Current_generic3",
        VarType::CURRENT_GENERIC4 => "Current_generic4",
        VarType::POTENTIAL_GENERIC1 => "Potential_generic1",
        VarType::POTENTIAL_GENERIC2 => "Potential_generic2",
        VarType::POTENTIAL_GENERIC3 => "Potential_generic3",
        VarType::POTENTIAL_GENERIC4 => "Potential_generic4",
        VarType::MISC_GENERIC1 => "Misc_generic1",
        VarType::MISC_GENERIC2 => "Misc_generic2",
        VarType::MISC_GENERIC3 => "Misc_generic3",
        VarType::MISC_GENERIC4 => "Misc_generic4",
        _ => UNDEFINED_VARTYPE,
    }
}

/// Returns the unit of the decoded value of a variable type.
pub fn vartype_unit(vartype: VarType) -> &'static str {
    match vartype.category() {
        'a' => "V",
        'b' | 'h' => "A",
        'c' => match vartype {
            VarType::PHASE => "Degrees",
            VarType::IMP | VarType::ZREAL | VarType::ZIMAG => "Ohm",
            VarType::EIS_TDD_E | VarType::EIS_E_AC | VarType::EIS_E_DC => "V",
            VarType::EIS_TDD_I | VarType::EIS_I_AC | VarType::EIS_I_DC => "A",
            VarType::EIS_FS => "Hz",
            _ => "?",
        },
        'd' => match vartype {
            VarType::CELL_SET_POTENTIAL => "V",
            VarType::CELL_SET_CURRENT => "A",
            VarType::CELL_SET_FREQUENCY => "Hz",
            VarType::CELL_SET_AMPLITUDE => "Vrms",
            _ => "?",
        },
        'e' => match vartype {
            VarType::TIME => "s",
            VarType::TEMPERATURE => "°C",
            VarType::CHANNEL | VarType::PIN_MSK => " ",
            _ => "?",
        },
        'i' => "V",
        'j' => " ",
        _ => "?",
    }
}

/// Returns the meaning of a status value.
///
/// Expects `0` or exactly one flag bit. Callers holding a full bitmask
/// iterate it bit by bit, see [`crate::common::types::Status::flags`].
pub fn status_to_str(status: u32) -> &'static str {
    match status {
        0x0 => "OK",
        0x1 => "Timing not met!",
        0x2 => "Overload",
        0x4 => "Underload",
        0x8 => "Overload warning",
        _ => UNDEFINED_STATUS,
    }
}

// --- Range Tables ---

/// Translates range codes into human-readable ranges.
///
/// Implemented by [`DeviceType`] for the known instruments. Implement it
/// on your own type to decode ranges of other devices or firmware.
pub trait RangeTable {
    /// Returns the range string, or `None` when the code is not valid for
    /// this table and variable type.
    fn range_name(&self, variable_type: VarType, range: u32) -> Option<&'static str>;
}

impl RangeTable for DeviceType {
    fn range_name(&self, variable_type: VarType, range: u32) -> Option<&'static str> {
        match self {
            DeviceType::EmStatPico => pico_current_range(range),
            // For EmStat4 series instruments, the range is a potential range
            // for some variable types and a current range for all others.
            _ if self.is_emstat4() => match variable_type {
                VarType::POTENTIAL | VarType::ZIMAG => emstat4_potential_range(range),
                _ => emstat4_current_range(range),
            },
            _ => None,
        }
    }
}

/// Returns the range string, `"Unknown/invalid range value"` if the table
/// has no entry (including negative or absent codes).
pub fn range_to_str<T: RangeTable + ?Sized>(
    table: &T,
    variable_type: VarType,
    range: i32,
) -> &'static str {
    u32::try_from(range)
        .ok()
        .and_then(|range| table.range_name(variable_type, range))
        .unwrap_or(UNKNOWN_RANGE)
}

fn pico_current_range(range: u32) -> Option<&'static str> {
    let name = match range {
        0 => "100 nA",
        1 => "2 uA",
        2 => "4 uA",
        3 => "8 uA",
        4 => "16 uA",
        5 => "32 uA",
        6 => "63 uA",
        7 => "125 uA",
        8 => "250 uA",
        9 => "500 uA",
        10 => "1 mA",
        11 => "5 mA",
        128 => "100 nA (High speed)",
        129 => "1 uA (High speed)",
        130 => "6 uA (High speed)",
        131 => "13 uA (High speed)",
        132 => "25 uA (High speed)",
        133 => "50 uA (High speed)",
        134 => "100 uA (High speed)",
        135 => "200 uA (High speed)",
        136 => "1 mA (High speed)",
        137 => "5 mA (High speed)",
        _ => return None,
    };
    Some(name)
}

fn emstat4_potential_range(range: u32) -> Option<&'static str> {
    let name = match range {
        2 => "50 mV",
        3 => "100 mV",
        4 => "200 mV",
        5 => "500 mV",
        6 => "1 V",
        _ => return None,
    };
    Some(name)
}

fn emstat4_current_range(range: u32) -> Option<&'static str> {
    let name = match range {
        // (Multi)EmStat4 LR only
        3 => "1 nA",
        6 => "10 nA",
        // (Multi)EmStat4 LR/HR
        9 => "100 nA",
        12 => "1 uA",
        15 => "10 uA",
        18 => "100 uA",
        21 => "1 mA",
        24 => "10 mA",
        // (Multi)EmStat4 HR only
        27 => "100 mA",
        _ => return None,
    };
    Some(name)
}
