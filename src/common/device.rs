// src/common/device.rs

use core::fmt;

/// Instrument family, derived once from the firmware version reply.
///
/// Range codes in data packages only have a meaning relative to the device
/// type, see [`crate::common::tables::RangeTable`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceType {
    #[default]
    Unknown,
    EmStatPico,
    EmStat4LR,
    EmStat4HR,
    MultiEmStat4LR,
    MultiEmStat4HR,
}

impl DeviceType {
    /// Number of leading firmware version characters that identify the device.
    pub const PREFIX_LEN: usize = 6;

    /// Derives the device type from a firmware version string, e.g.
    /// `"espico1.2 ..."` or `"es4_lr1.0 ..."`.
    ///
    /// The string may still carry the leading `t` of the raw reply line.
    pub fn from_firmware_version(version: &str) -> Self {
        let version = version.strip_prefix('t').unwrap_or(version);
        match version.get(..Self::PREFIX_LEN) {
            Some("espico") => DeviceType::EmStatPico,
            Some("es4_lr") => DeviceType::EmStat4LR,
            Some("es4_hr") => DeviceType::EmStat4HR,
            Some("mes4lr") => DeviceType::MultiEmStat4LR,
            Some("mes4hr") => DeviceType::MultiEmStat4HR,
            _ => DeviceType::Unknown,
        }
    }

    /// Human-readable device name.
    pub const fn name(&self) -> &'static str {
        match self {
            DeviceType::Unknown => "Unknown device",
            DeviceType::EmStatPico => "EmStat Pico",
            DeviceType::EmStat4LR => "EmStat4 LR",
            DeviceType::EmStat4HR => "EmStat4 HR",
            DeviceType::MultiEmStat4LR => "MultiEmStat4 LR",
            DeviceType::MultiEmStat4HR => "MultiEmStat4 HR",
        }
    }

    /// Returns `true` for the (Multi)EmStat4 family, which shares one range table.
    #[inline]
    pub const fn is_emstat4(&self) -> bool {
        matches!(
            self,
            DeviceType::EmStat4LR
                | DeviceType::EmStat4HR
                | DeviceType::MultiEmStat4LR
                | DeviceType::MultiEmStat4HR
        )
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_firmware_version() {
        assert_eq!(DeviceType::from_firmware_version("espico1.2 ..."), DeviceType::EmStatPico);
        assert_eq!(DeviceType::from_firmware_version("es4_lr1.1"), DeviceType::EmStat4LR);
        assert_eq!(DeviceType::from_firmware_version("es4_hr1.1"), DeviceType::EmStat4HR);
        assert_eq!(DeviceType::from_firmware_version("mes4lr1.0"), DeviceType::MultiEmStat4LR);
        assert_eq!(DeviceType::from_firmware_version("mes4hr1.0"), DeviceType::MultiEmStat4HR);
        // Raw reply line with the leading 't'
        assert_eq!(DeviceType::from_firmware_version("tespico1.2\n"), DeviceType::EmStatPico);
    }

    #[test]
    fn test_unknown_firmware_version() {
        assert_eq!(DeviceType::from_firmware_version(""), DeviceType::Unknown);
        assert_eq!(DeviceType::from_firmware_version("espic"), DeviceType::Unknown);
        assert_eq!(DeviceType::from_firmware_version("emstat3"), DeviceType::Unknown);
        // Multi-byte characters must not panic on the prefix slice
        assert_eq!(DeviceType::from_firmware_version("esp€co"), DeviceType::Unknown);
    }

    #[test]
    fn test_names() {
        assert_eq!(DeviceType::default().name(), "Unknown device");
        assert_eq!(DeviceType::MultiEmStat4HR.to_string(), "MultiEmStat4 HR");
        assert!(DeviceType::EmStat4HR.is_emstat4());
        assert!(!DeviceType::EmStatPico.is_emstat4());
    }
}
