//! Companion tool: print the MD5 sidecar digest of an nv_data image.
//!
//! Prints the digest exactly as it would be stored in `<image>.md5`, with no
//! trailing newline, so the output can be redirected into the sidecar
//! directly.

use std::path::PathBuf;
use std::process::ExitCode;

use nvimei::checksum::nv_data_md5;
use nvimei::device::profile_for_size;
use nvimei::error::{NvImeiError, Result};

fn usage() {
    eprintln!("Usage: nvimei-md5 [nv_data.bin]");
}

fn run(path: &PathBuf) -> Result<String> {
    let size = std::fs::metadata(path)
        .map_err(|source| NvImeiError::Access {
            path: path.clone(),
            source,
        })?
        .len();

    let profile =
        profile_for_size(size).ok_or(NvImeiError::UnsupportedImage(size))?;

    nv_data_md5(path, profile.nv_data_secret)
}

fn main() -> ExitCode {
    let mut args = std::env::args_os().skip(1);
    let path = match (args.next(), args.next()) {
        (Some(path), None) => PathBuf::from(path),
        _ => {
            usage();
            return ExitCode::from(1);
        }
    };

    match run(&path) {
        Ok(digest) => {
            print!("{}", digest);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("nvimei-md5: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
