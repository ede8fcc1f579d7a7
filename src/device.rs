//! Static registry of supported device families.
//!
//! Sizes, offsets and secrets come from the device support headers of the
//! modem firmware images these tools were written against. The registry is
//! compile-time data; nothing mutates it at runtime.

use crate::error::{NvImeiError, Result};
use crate::NvImage;

/// Descriptor of one supported device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Marketing name plus model code.
    pub name: &'static str,
    /// Modem (baseband) family.
    pub modem: &'static str,
    /// Exact nv_data.bin size for this family.
    pub nv_data_size: u64,
    /// IMEI field offset observed on this family. Other offsets are known to
    /// exist (0xE880 has been seen in the wild), hence the bruteforce command.
    pub default_imei_offset: u64,
    /// Secret appended to the image bytes when computing the .md5 sidecar.
    pub nv_data_secret: &'static str,
}

pub static SUPPORTED_DEVICES: &[DeviceProfile] = &[
    DeviceProfile {
        name: "Nexus S (GT-I902x)",
        modem: "XMM616",
        nv_data_size: 0x200000,
        default_imei_offset: 0xEC80,
        nv_data_secret: "Samsung_Android_RIL",
    },
    DeviceProfile {
        name: "Galaxy S (GT-I9000)",
        modem: "XMM616",
        nv_data_size: 0x200000,
        default_imei_offset: 0xEC80,
        nv_data_secret: "Samsung_Android_RIL",
    },
];

/// Looks up the first profile whose nv_data size matches `size`.
pub fn profile_for_size(size: u64) -> Option<&'static DeviceProfile> {
    SUPPORTED_DEVICES
        .iter()
        .find(|profile| profile.nv_data_size == size)
}

/// Rejects images whose length is not a known nv_data size.
///
/// Field access into a blob of the wrong size would silently read garbage,
/// so every image-consuming command runs this first.
pub fn ensure_supported(image: &NvImage) -> Result<&'static DeviceProfile> {
    profile_for_size(image.size()).ok_or_else(|| NvImeiError::UnsupportedImage(image.size()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_populated() {
        assert!(!SUPPORTED_DEVICES.is_empty());
        for profile in SUPPORTED_DEVICES {
            assert!(profile.nv_data_size > 0);
            assert!(profile.default_imei_offset < profile.nv_data_size);
        }
    }

    #[test]
    fn test_profile_for_size() {
        let profile = profile_for_size(0x200000).unwrap();
        assert_eq!(profile.modem, "XMM616");
        assert_eq!(profile.default_imei_offset, 0xEC80);

        assert!(profile_for_size(0x200001).is_none());
        assert!(profile_for_size(0).is_none());
    }
}
