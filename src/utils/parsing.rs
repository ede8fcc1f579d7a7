//! Parsing of command-line offset values.

use crate::error::{NvImeiError, Result};

/// Parses a byte offset from its command-line form.
///
/// # Supported Formats
/// - Hexadecimal with prefix: `"0xEC80"`, `"0XEC80"`
/// - Decimal: `"60544"`
///
/// Offsets are unsigned; an explicit sign is rejected rather than wrapped,
/// and so is anything that overflows `u64`.
pub fn parse_offset(s: &str) -> Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NvImeiError::Usage("empty offset".to_string()));
    }

    if s.starts_with('-') || s.starts_with('+') {
        return Err(NvImeiError::Usage(format!(
            "offset '{}' has a sign, but offsets are unsigned",
            s
        )));
    }

    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
            .map_err(|e| NvImeiError::Usage(format!("invalid hexadecimal offset '{}': {}", s, e)))
    } else {
        s.parse::<u64>()
            .map_err(|e| NvImeiError::Usage(format!("invalid decimal offset '{}': {}", s, e)))
    }
}
