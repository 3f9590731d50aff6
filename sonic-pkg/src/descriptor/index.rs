//! Package index data model.
//!
//! The index is the authoritative catalog of a repository: one entry per
//! published release, recorded with its artifact filename and checksum.
//! Entries are append-only at the model level. Publishing a newer version
//! adds an entry; it never rewrites or removes the entries already there,
//! so a release that was once published stays resolvable.
//!
//! The serialized form is a TOML document with header fields followed by an
//! `[[entries]]` array of tables. [`crate::publisher::IndexManager`] owns
//! reading and writing the file inside a repository.

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::version::PackageVersion;

/// Errors from decoding or encoding an index document.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The document is not a valid index.
    #[error("invalid package index: {0}")]
    Parse(#[from] toml::de::Error),

    /// The index could not be serialized.
    #[error("failed to serialize package index: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// A single published release in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Package name.
    pub name: String,

    /// Released version.
    pub version: PackageVersion,

    /// Artifact filename under the repository's `dist/` directory.
    pub artifact: String,

    /// SHA-256 checksum of the artifact, lowercase hex.
    pub checksum: String,

    /// When this release entered the index.
    pub published_at: DateTime<Utc>,
}

impl IndexEntry {
    /// Create an entry stamped with the current time.
    pub fn new(
        name: impl Into<String>,
        version: PackageVersion,
        artifact: impl Into<String>,
        checksum: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            artifact: artifact.into(),
            checksum: checksum.into(),
            published_at: Utc::now(),
        }
    }
}

/// The package index of a repository.
///
/// # Example
///
/// ```
/// use sonic_pkg::descriptor::{IndexEntry, PackageIndex, PackageVersion};
///
/// let mut index = PackageIndex::new("sonic-platform");
/// index.entries.push(IndexEntry::new(
///     "sonic-chassisd",
///     PackageVersion::parse("1.0").unwrap(),
///     "sonic-chassisd-1.0.tar.gz",
///     "0000000000000000000000000000000000000000000000000000000000000000",
/// ));
///
/// assert!(index.contains("sonic-chassisd", &PackageVersion::parse("1.0").unwrap()));
/// assert!(index.latest("sonic-chassisd").is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageIndex {
    /// Version of the index file format itself.
    pub spec_version: Version,

    /// Name of the publishing repository.
    pub publisher: String,

    /// Monotonic save counter, bumped on every write.
    pub sequence: u64,

    /// Timestamp of the last save.
    pub published_at: DateTime<Utc>,

    /// Published releases. Kept last so the TOML array of tables follows
    /// the header fields.
    #[serde(default)]
    pub entries: Vec<IndexEntry>,
}

impl PackageIndex {
    /// Create an empty index for a publisher.
    pub fn new(publisher: impl Into<String>) -> Self {
        Self {
            spec_version: Version::new(1, 0, 0),
            publisher: publisher.into(),
            sequence: 0,
            published_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    /// All releases of a package, in index order.
    pub fn releases(&self, name: &str) -> Vec<&IndexEntry> {
        self.entries.iter().filter(|e| e.name == name).collect()
    }

    /// Find a specific release.
    pub fn find_release(&self, name: &str, version: &PackageVersion) -> Option<&IndexEntry> {
        self.entries
            .iter()
            .find(|e| e.name == name && e.version == *version)
    }

    /// Whether a specific release is already published.
    pub fn contains(&self, name: &str, version: &PackageVersion) -> bool {
        self.find_release(name, version).is_some()
    }

    /// The highest published version of a package.
    pub fn latest(&self, name: &str) -> Option<&IndexEntry> {
        self.entries
            .iter()
            .filter(|e| e.name == name)
            .max_by(|a, b| a.version.cmp(&b.version))
    }

    /// All published versions of a package, ascending.
    pub fn versions(&self, name: &str) -> Vec<&PackageVersion> {
        let mut versions: Vec<&PackageVersion> = self
            .entries
            .iter()
            .filter(|e| e.name == name)
            .map(|e| &e.version)
            .collect();
        versions.sort();
        versions
    }

    /// The distinct package names in the index, sorted.
    pub fn package_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.iter().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// Parse an index document.
///
/// # Errors
///
/// Returns [`IndexError::Parse`] when the document is not a valid index.
pub fn parse_index(document: &str) -> Result<PackageIndex, IndexError> {
    Ok(toml::from_str(document)?)
}

/// Serialize an index to its document form.
///
/// # Errors
///
/// Returns [`IndexError::Serialize`] when encoding fails.
pub fn serialize_index(index: &PackageIndex) -> Result<String, IndexError> {
    Ok(toml::to_string_pretty(index)?)
}
