//! Streaming SHA-256 checksums for package artifacts.
//!
//! Artifact integrity is tracked end to end: the publisher records a checksum
//! in the index entry when an artifact is built, and the installer verifies
//! the artifact against that entry before extracting anything.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

/// Read buffer size for hashing (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Calculate the SHA-256 checksum of a file.
///
/// Returns the lowercase hexadecimal digest of the file contents. The file is
/// read in chunks so large artifacts are never held in memory whole.
///
/// Callers map the `io::Error` into their own subsystem error with the path
/// attached.
pub fn file_sha256(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
