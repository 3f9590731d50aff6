//! Package index management for the publisher.
//!
//! Provides utilities for managing the package index file in a publisher
//! repository. The index is append-only for releases: recording a name and
//! version that is already present is an error, never a replacement. A new
//! version supersedes the old one in `latest` resolution, but the old entry
//! stays published and installable.

use std::fs;
use std::path::Path;

use crate::checksum::file_sha256;
use crate::descriptor::{
    parse_index, serialize_index, IndexEntry, PackageIndex, PackageVersion,
};

use super::{PublishError, PublishResult};

/// Package index filename.
pub const INDEX_FILENAME: &str = "index.toml";

/// Default publisher name for indexes created outside `Repository::init`.
pub const DEFAULT_PUBLISHER: &str = "local";

/// Manager for the package index.
pub struct IndexManager {
    /// Path to the index file.
    index_path: std::path::PathBuf,

    /// The index data.
    index: PackageIndex,
}

impl IndexManager {
    /// Open an existing package index or create a new one.
    pub fn open_or_create(repo_root: &Path) -> PublishResult<Self> {
        let index_path = repo_root.join(INDEX_FILENAME);

        let index = if index_path.exists() {
            Self::read_index(&index_path)?
        } else {
            PackageIndex::new(DEFAULT_PUBLISHER)
        };

        Ok(Self { index_path, index })
    }

    /// Open an existing package index.
    pub fn open(repo_root: &Path) -> PublishResult<Self> {
        let index_path = repo_root.join(INDEX_FILENAME);

        if !index_path.exists() {
            return Err(PublishError::ReadFailed {
                path: index_path,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "index file not found"),
            });
        }

        let index = Self::read_index(&index_path)?;

        Ok(Self { index_path, index })
    }

    /// Read the index from a file.
    fn read_index(path: &Path) -> PublishResult<PackageIndex> {
        let content = fs::read_to_string(path).map_err(|e| PublishError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(parse_index(&content)?)
    }

    /// Get a reference to the index.
    pub fn index(&self) -> &PackageIndex {
        &self.index
    }

    /// Get the current sequence number.
    pub fn sequence(&self) -> u64 {
        self.index.sequence
    }

    /// Get all entries.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.index.entries
    }

    /// Find a specific release.
    pub fn find_release(&self, name: &str, version: &PackageVersion) -> Option<&IndexEntry> {
        self.index.find_release(name, version)
    }

    /// The highest published version of a package.
    pub fn latest(&self, name: &str) -> Option<&IndexEntry> {
        self.index.latest(name)
    }

    /// Check if an exact release is already published.
    pub fn contains(&self, name: &str, version: &PackageVersion) -> bool {
        self.index.contains(name, version)
    }

    /// Record a new release in the index.
    ///
    /// Published releases are immutable. If the same name and version is
    /// already present the call fails and the index is left untouched; the
    /// only way to ship a change is to bump the version, which adds a new
    /// entry alongside the old one.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::DuplicateRelease`] when the exact release is
    /// already published.
    pub fn record_release(&mut self, entry: IndexEntry) -> PublishResult<()> {
        if self.contains(&entry.name, &entry.version) {
            return Err(PublishError::DuplicateRelease {
                name: entry.name,
                version: entry.version.to_string(),
            });
        }

        self.index.entries.push(entry);
        Ok(())
    }

    /// Save the index to disk.
    ///
    /// This increments the sequence number and updates the timestamp.
    pub fn save(&mut self) -> PublishResult<()> {
        // Increment sequence and update timestamp
        self.index.sequence += 1;
        self.index.published_at = chrono::Utc::now();

        // Sort entries by name, then by version
        self.index
            .entries
            .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.version.cmp(&b.version)));

        let content = serialize_index(&self.index)?;

        fs::write(&self.index_path, content).map_err(|e| PublishError::WriteFailed {
            path: self.index_path.clone(),
            source: e,
        })?;

        Ok(())
    }

    /// Get the path to the index file.
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Calculate the SHA-256 checksum of the index file.
    pub fn checksum(&self) -> PublishResult<String> {
        file_sha256(&self.index_path).map_err(|e| PublishError::ReadFailed {
            path: self.index_path.clone(),
            source: e,
        })
    }
}
