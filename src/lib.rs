pub mod checksum;
pub mod commands;
pub mod device;
pub mod error;
pub mod imei;
pub mod utils;

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub use commands::{bruteforce_imei, read_imei, write_imei};
pub use device::{profile_for_size, DeviceProfile, SUPPORTED_DEVICES};
pub use error::{NvImeiError, Result};
pub use imei::{Imei, IMEI_FIELD_SIZE, IMEI_LENGTH};

/// How an [`NvImage`] handle is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    ReadOnly,
    ReadWrite,
}

/// A modem nv_data image opened on disk.
///
/// The image is a flat binary blob of fixed, device-specific size with no
/// header or internal index; this type only provides bounded byte-range
/// access over its extent. Every read and write goes straight to the backing
/// file, so external inspection of the file is consistent as soon as a call
/// returns.
///
/// `write_at` either persists every requested byte or fails. If the failure
/// happens mid-write the file may hold a partial field; nothing here detects
/// or repairs that, which is why a backup of nv_data.bin is always advised.
pub struct NvImage {
    file: File,
    path: PathBuf,
    size: u64,
}

impl NvImage {
    /// Opens the image at `path` and captures its extent.
    ///
    /// Filesystem-level failures (missing file, permission denied) surface as
    /// [`NvImeiError::Access`], which maps to exit status 66 at the CLI.
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .read(true)
            .write(mode == OpenMode::ReadWrite)
            .open(&path)
            .map_err(|source| NvImeiError::Access {
                path: path.clone(),
                source,
            })?;

        let size = file
            .metadata()
            .map_err(|source| NvImeiError::Access {
                path: path.clone(),
                source,
            })?
            .len();

        Ok(Self { file, path, size })
    }

    /// Total byte extent of the image.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Path the image was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads exactly `len` bytes starting at `offset`.
    pub fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>> {
        self.check_range(offset, len)?;

        self.file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; len];
        self.file.read_exact(&mut buf)?;

        Ok(buf)
    }

    /// Writes all of `bytes` starting at `offset`.
    ///
    /// The handle must have been opened [`OpenMode::ReadWrite`]; a read-only
    /// handle fails with an access error from the OS.
    pub fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        self.check_range(offset, bytes.len())?;

        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(bytes)?;
        self.file.flush()?;

        Ok(())
    }

    fn check_range(&self, offset: u64, len: usize) -> Result<()> {
        let end = offset.checked_add(len as u64);
        match end {
            Some(end) if end <= self.size => Ok(()),
            _ => Err(NvImeiError::Range(format!(
                "range {:#x}..{:#x} exceeds image extent {:#x}",
                offset,
                offset.wrapping_add(len as u64),
                self.size
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn image_fixture(len: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&vec![0u8; len]).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_open_missing_file_is_access_error() {
        let result = NvImage::open("/nonexistent/nv_data.bin", OpenMode::ReadOnly);
        match result {
            Err(NvImeiError::Access { source, .. }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected Access error"),
        }
    }

    #[test]
    fn test_size_matches_file_extent() {
        let file = image_fixture(4096);
        let image = NvImage::open(file.path(), OpenMode::ReadOnly).unwrap();
        assert_eq!(image.size(), 4096);
    }

    #[test]
    fn test_read_write_roundtrip() {
        let file = image_fixture(4096);
        let mut image = NvImage::open(file.path(), OpenMode::ReadWrite).unwrap();

        image.write_at(0x100, &[0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
        assert_eq!(image.read_at(0x100, 4).unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);

        // Neighbouring bytes stay untouched.
        assert_eq!(image.read_at(0xFF, 1).unwrap(), vec![0]);
        assert_eq!(image.read_at(0x104, 1).unwrap(), vec![0]);
    }

    #[test]
    fn test_writes_hit_the_backing_file() {
        let file = image_fixture(64);
        let mut image = NvImage::open(file.path(), OpenMode::ReadWrite).unwrap();
        image.write_at(10, &[0xAA, 0xBB]).unwrap();

        let on_disk = std::fs::read(file.path()).unwrap();
        assert_eq!(&on_disk[10..12], &[0xAA, 0xBB]);
    }

    #[test]
    fn test_read_past_extent_is_range_error() {
        let file = image_fixture(64);
        let mut image = NvImage::open(file.path(), OpenMode::ReadOnly).unwrap();

        assert!(matches!(
            image.read_at(60, 8),
            Err(NvImeiError::Range(_))
        ));
        assert!(matches!(
            image.read_at(64, 1),
            Err(NvImeiError::Range(_))
        ));
        // Reading the very last byte is still in range.
        assert!(image.read_at(63, 1).is_ok());
    }

    #[test]
    fn test_write_past_extent_is_range_error() {
        let file = image_fixture(64);
        let mut image = NvImage::open(file.path(), OpenMode::ReadWrite).unwrap();

        assert!(matches!(
            image.write_at(60, &[0u8; 8]),
            Err(NvImeiError::Range(_))
        ));
        // Offset arithmetic must not wrap.
        assert!(matches!(
            image.write_at(u64::MAX, &[0u8; 8]),
            Err(NvImeiError::Range(_))
        ));
    }
}
