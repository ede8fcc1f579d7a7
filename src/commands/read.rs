use crate::device;
use crate::error::{NvImeiError, Result};
use crate::imei::{Imei, IMEI_FIELD_SIZE};
use crate::NvImage;

/// Reads and decodes the IMEI field at `offset`.
///
/// Fails with an encoding error when the bytes at `offset` are not
/// swapped-nibble BCD, which usually means the offset is wrong for this
/// image. The image is not modified.
pub fn read_imei(image: &mut NvImage, offset: u64) -> Result<Imei> {
    device::ensure_supported(image)?;

    let bytes = image.read_at(offset, IMEI_FIELD_SIZE)?;
    let field: [u8; IMEI_FIELD_SIZE] = bytes.try_into().map_err(|_| {
        NvImeiError::Range(format!("short read at {:#x}", offset))
    })?;

    Imei::decode(&field)
}
