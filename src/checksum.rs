//! MD5 sidecar digests for nv_data images.
//!
//! The modem firmware validates nv_data.bin against an `<image>.md5` file
//! containing the lowercase hex MD5 of the image bytes followed by a
//! per-family secret string. MD5 is what the firmware expects; this is an
//! integrity tag, not a security boundary.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use md5::{Digest, Md5};

use crate::error::{NvImeiError, Result};

/// Computes the salted digest of the whole image: MD5(data || secret),
/// rendered as 32 lowercase hex characters.
pub fn nv_data_md5<P: AsRef<Path>>(path: P, secret: &str) -> Result<String> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| NvImeiError::Access {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Md5::new();
    hasher.update(&data);
    hasher.update(secret.as_bytes());

    Ok(hex::encode(hasher.finalize()))
}

/// Recomputes the image digest and replaces the `<image>.md5` sidecar.
pub fn update_md5_sidecar(path: &Path, secret: &str) -> Result<PathBuf> {
    let digest = nv_data_md5(path, secret)?;

    let mut sidecar = OsString::from(path.as_os_str());
    sidecar.push(".md5");
    let sidecar = PathBuf::from(sidecar);

    fs::write(&sidecar, &digest)?;

    Ok(sidecar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_empty_file_empty_secret() {
        // MD5 of empty input is a fixed, well-known value.
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(
            nv_data_md5(file.path(), "").unwrap(),
            "d41d8cd98f00b904e9800998ecf8427e"
        );
    }

    #[test]
    fn test_secret_changes_digest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 128]).unwrap();
        file.flush().unwrap();

        let salted = nv_data_md5(file.path(), "Samsung_Android_RIL").unwrap();
        let unsalted = nv_data_md5(file.path(), "").unwrap();
        assert_ne!(salted, unsalted);
        assert_eq!(salted.len(), 32);
        assert!(salted.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    }

    #[test]
    fn test_missing_image_is_access_error() {
        assert!(matches!(
            nv_data_md5("/nonexistent/nv_data.bin", ""),
            Err(NvImeiError::Access { .. })
        ));
    }

    #[test]
    fn test_sidecar_is_written_next_to_image() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xAB; 64]).unwrap();
        file.flush().unwrap();

        let sidecar = update_md5_sidecar(file.path(), "secret").unwrap();
        assert_eq!(sidecar, PathBuf::from(format!("{}.md5", file.path().display())));

        let contents = fs::read_to_string(&sidecar).unwrap();
        assert_eq!(contents, nv_data_md5(file.path(), "secret").unwrap());

        fs::remove_file(sidecar).unwrap();
    }
}
