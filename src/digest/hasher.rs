//! Streaming SHA-2 hashing of asset files

use crate::algorithm::Algorithm;
use crate::error::{Result, SriError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read buffer size (256 KiB)
pub const READ_BUFFER_SIZE: usize = 1 << 18;

/// Feed a reader through hasher `D` in fixed-size chunks
fn stream<D: Digest, R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut hasher = D::new();
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_vec())
}

/// Compute the raw digest of everything `reader` yields
pub fn digest_reader<R: Read>(reader: &mut R, algorithm: Algorithm) -> io::Result<Vec<u8>> {
    match algorithm {
        Algorithm::Sha256 => stream::<Sha256, R>(reader),
        Algorithm::Sha384 => stream::<Sha384, R>(reader),
        Algorithm::Sha512 => stream::<Sha512, R>(reader),
    }
}

/// Compute the base64-encoded digest of the file at `path`
///
/// The file is opened read-only and never modified. Only its byte content
/// contributes to the result.
///
/// # Errors
/// `SriError::FileAccess` if the path is missing, is a directory, or
/// cannot be read.
pub fn compute_digest(path: &Path, algorithm: Algorithm) -> Result<String> {
    let access_error = |reason: String| SriError::FileAccess {
        path: path.display().to_string(),
        reason,
    };

    let mut file = File::open(path).map_err(|e| access_error(e.to_string()))?;
    let metadata = file.metadata().map_err(|e| access_error(e.to_string()))?;
    if metadata.is_dir() {
        return Err(access_error("is a directory".to_string()));
    }

    let raw = digest_reader(&mut file, algorithm).map_err(|e| access_error(e.to_string()))?;
    Ok(STANDARD.encode(raw))
}
