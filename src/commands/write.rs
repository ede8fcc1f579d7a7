use crate::checksum;
use crate::device;
use crate::error::Result;
use crate::imei::Imei;
use crate::NvImage;

/// Encodes `imei` and writes it over the field at `offset`.
///
/// Exactly the field's 8 bytes change; every other byte of the image is left
/// as it was. The modem checks nv_data.bin against an MD5 sidecar, so the
/// `<image>.md5` file is regenerated from the new contents afterwards.
pub fn write_imei(image: &mut NvImage, offset: u64, imei: &Imei) -> Result<()> {
    let profile = device::ensure_supported(image)?;

    image.write_at(offset, &imei.encode())?;

    checksum::update_md5_sidecar(image.path(), profile.nv_data_secret)?;

    Ok(())
}
