//! Archive extraction for package installation.
//!
//! Extracts tar.gz artifacts into a staging directory. Extraction is
//! path-safe: entries that would land outside the destination directory
//! are skipped rather than written.

use std::fs::{self, File};
use std::path::Path;

use flate2::read::GzDecoder;

use super::error::{ManagerError, ManagerResult};

/// Tar.gz artifact extractor.
#[derive(Debug, Default)]
pub struct ArchiveExtractor;

impl ArchiveExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract an artifact to a destination directory.
    ///
    /// # Returns
    ///
    /// The number of regular files extracted.
    pub fn extract(&self, archive: &Path, dest_dir: &Path) -> ManagerResult<usize> {
        fs::create_dir_all(dest_dir).map_err(|e| ManagerError::CreateDirFailed {
            path: dest_dir.to_path_buf(),
            source: e,
        })?;

        let file = File::open(archive).map_err(|e| ManagerError::ReadFailed {
            path: archive.to_path_buf(),
            source: e,
        })?;

        let decoder = GzDecoder::new(file);
        let mut tar = tar::Archive::new(decoder);

        let entries = tar.entries().map_err(|e| ManagerError::ExtractionFailed {
            path: archive.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut count = 0;
        for entry in entries {
            let mut entry = entry.map_err(|e| ManagerError::ExtractionFailed {
                path: archive.to_path_buf(),
                reason: e.to_string(),
            })?;

            let is_file = entry.header().entry_type().is_file();

            // unpack_in refuses paths that escape the destination
            let unpacked =
                entry
                    .unpack_in(dest_dir)
                    .map_err(|e| ManagerError::ExtractionFailed {
                        path: archive.to_path_buf(),
                        reason: e.to_string(),
                    })?;

            if unpacked && is_file {
                count += 1;
            }
        }

        Ok(count)
    }
}
