// src/common/response/classify.rs

use super::ReplyKind;

/// Determines the kind of a complete reply line (including its `\n`).
///
/// Total: every input maps to exactly one kind, with
/// [`ReplyKind::Unrecognized`] as the catch-all.
pub fn classify(line: &[u8]) -> ReplyKind {
    // Arm order is the precedence order.
    match line {
        [b't', ..] => ReplyKind::FirmwareVersion,
        [b'M', ..] => ReplyKind::MeasurementLoopStart,
        [b'C', ..] => ReplyKind::ScanStart,
        b"e\n" => ReplyKind::ScriptExecuteAck,
        b"*\n" => ReplyKind::MeasurementLoopEnd,
        b"-\n" => ReplyKind::ScanEnd,
        b"\n" => ReplyKind::EndOfScript,
        [b'P', ..] => ReplyKind::DataPackage,
        [b'T', ..] => ReplyKind::TextMessage,
        [b'!', ..] => ReplyKind::ErrorMessage,
        [b'L', ..] => ReplyKind::LoopStart,
        [b'+', ..] => ReplyKind::LoopEnd,
        _ => ReplyKind::Unrecognized,
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_lines() {
        assert_eq!(classify(b"e\n"), ReplyKind::ScriptExecuteAck);
        assert_eq!(classify(b"*\n"), ReplyKind::MeasurementLoopEnd);
        assert_eq!(classify(b"-\n"), ReplyKind::ScanEnd);
        assert_eq!(classify(b"\n"), ReplyKind::EndOfScript);
        assert_eq!(classify(b"M0000\n"), ReplyKind::MeasurementLoopStart);
        assert_eq!(classify(b"C0000\n"), ReplyKind::ScanStart);
        assert_eq!(classify(b"L\n"), ReplyKind::LoopStart);
        assert_eq!(classify(b"+\n"), ReplyKind::LoopEnd);
    }

    #[test]
    fn test_content_lines() {
        assert_eq!(classify(b"tespico1.2\n"), ReplyKind::FirmwareVersion);
        assert_eq!(classify(b"Pda7F85F3Fu;ba48D503Dp,10,288\n"), ReplyKind::DataPackage);
        assert_eq!(classify(b"THello\n"), ReplyKind::TextMessage);
        assert_eq!(classify(b"!0004: Line 3: Invalid command\n"), ReplyKind::ErrorMessage);
    }

    #[test]
    fn test_unrecognized_lines() {
        assert_eq!(classify(b"Xyz\n"), ReplyKind::Unrecognized);
        assert_eq!(classify(b""), ReplyKind::Unrecognized);
        // Exact matches only: extra bytes or a missing terminator do not count
        assert_eq!(classify(b"e"), ReplyKind::Unrecognized);
        assert_eq!(classify(b"ee\n"), ReplyKind::Unrecognized);
        assert_eq!(classify(b"**\n"), ReplyKind::Unrecognized);
        assert_eq!(classify(b"\r\n"), ReplyKind::Unrecognized);
        // Case sensitive
        assert_eq!(classify(b"pab\n"), ReplyKind::Unrecognized);
    }

    #[test]
    fn test_precedence() {
        // A 't' line is a firmware version even if it looks like something else
        assert_eq!(classify(b"t*\n"), ReplyKind::FirmwareVersion);
        // The firmware version trailer is not a loop end
        assert_eq!(classify(b"R1.2*\n"), ReplyKind::Unrecognized);
    }
}
