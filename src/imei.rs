//! IMEI value and its on-disk encoding.
//!
//! The nv_data field is swapped-nibble BCD: the first byte carries the first
//! digit in its high nibble and a 0xA type marker in its low nibble, then
//! each following byte packs two digits with the earlier digit in the low
//! nibble. 15 digits therefore occupy (15 + 1) / 2 = 8 bytes.

use std::fmt;
use std::str::FromStr;

use crate::error::{NvImeiError, Result};

/// Number of decimal digits in an IMEI. No checksum digit is involved here.
pub const IMEI_LENGTH: usize = 15;

/// Size in bytes of the encoded IMEI field inside the image.
pub const IMEI_FIELD_SIZE: usize = (IMEI_LENGTH + 1) / 2;

/// Low nibble of the first encoded byte.
const TYPE_MARKER: u8 = 0xA;

/// A validated 15-digit IMEI.
///
/// Construction goes through [`FromStr`], which rejects anything that is not
/// exactly 15 ASCII decimal digits, so a value of this type can always be
/// encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Imei {
    digits: [u8; IMEI_LENGTH],
}

impl Imei {
    /// Encodes the IMEI into its fixed-size on-disk field.
    pub fn encode(&self) -> [u8; IMEI_FIELD_SIZE] {
        let mut field = [0u8; IMEI_FIELD_SIZE];

        field[0] = (self.digits[0] << 4) | TYPE_MARKER;
        for k in 1..IMEI_FIELD_SIZE {
            let low = self.digits[2 * k - 1];
            let high = self.digits[2 * k];
            field[k] = (high << 4) | low;
        }

        field
    }

    /// Decodes an encoded field back into an IMEI.
    ///
    /// The marker nibble of the first byte is not checked; a nibble in any
    /// digit position that is not 0-9 means the bytes at this offset are not
    /// an IMEI field (wrong offset, or corruption) and fails with
    /// [`NvImeiError::Encoding`].
    pub fn decode(field: &[u8; IMEI_FIELD_SIZE]) -> Result<Self> {
        let mut digits = [0u8; IMEI_LENGTH];

        digits[0] = digit_nibble(field[0] >> 4, 0)?;
        for k in 1..IMEI_FIELD_SIZE {
            digits[2 * k - 1] = digit_nibble(field[k] & 0x0F, 2 * k - 1)?;
            digits[2 * k] = digit_nibble(field[k] >> 4, 2 * k)?;
        }

        Ok(Self { digits })
    }
}

fn digit_nibble(nibble: u8, position: usize) -> Result<u8> {
    if nibble > 9 {
        return Err(NvImeiError::Encoding(format!(
            "digit {} decodes to {:#x}, expected 0-9",
            position + 1,
            nibble
        )));
    }
    Ok(nibble)
}

impl FromStr for Imei {
    type Err = NvImeiError;

    fn from_str(s: &str) -> Result<Self> {
        let is_digits = s.bytes().all(|b| b.is_ascii_digit());

        if !is_digits && s.len() != IMEI_LENGTH {
            return Err(NvImeiError::Validation(format!(
                "'{}' does not only contain digits, and has {} characters instead of {}",
                s,
                s.len(),
                IMEI_LENGTH
            )));
        } else if !is_digits {
            return Err(NvImeiError::Validation(format!(
                "'{}' does not only contain digits",
                s
            )));
        } else if s.len() != IMEI_LENGTH {
            return Err(NvImeiError::Validation(format!(
                "'{}' has {} digits instead of {}",
                s,
                s.len(),
                IMEI_LENGTH
            )));
        }

        let mut digits = [0u8; IMEI_LENGTH];
        for (digit, byte) in digits.iter_mut().zip(s.bytes()) {
            *digit = byte - b'0';
        }

        Ok(Self { digits })
    }
}

impl fmt::Display for Imei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}
