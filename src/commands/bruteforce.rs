use memchr::memmem;

use crate::device;
use crate::error::{NvImeiError, Result};
use crate::imei::Imei;
use crate::NvImage;

/// Finds the byte offset of `imei` inside the image.
///
/// The IMEI is encoded once, then the whole extent is scanned offset by
/// offset in ascending order for an exact match against the encoded field,
/// marker nibble included. The lowest matching offset wins. There is no
/// skipping of "known" header regions: the layout is treated as opaque, so
/// the scan is exhaustive by design of the file format, not by accident.
pub fn bruteforce_imei(image: &mut NvImage, imei: &Imei) -> Result<u64> {
    device::ensure_supported(image)?;

    let needle = imei.encode();
    let haystack = image.read_at(0, image.size() as usize)?;

    memmem::Finder::new(&needle)
        .find(&haystack)
        .map(|offset| offset as u64)
        .ok_or(NvImeiError::ImeiNotFound)
}
