//! Installed package bookkeeping.
//!
//! The manager records every installed package in a TOML database kept
//! under the state directory, outside the executable search path. The
//! records remember which scripts a package placed in the bin directory
//! so uninstall removes exactly those files and nothing else.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::descriptor::PackageVersion;

use super::error::{ManagerError, ManagerResult};

/// A single installed package record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallRecord {
    /// Package name.
    pub name: String,
    /// Installed version.
    pub version: PackageVersion,
    /// Names of the executables placed in the bin directory.
    pub scripts: Vec<String>,
    /// Artifact filename the package was installed from.
    pub artifact: String,
    /// SHA-256 checksum of the artifact.
    pub checksum: String,
    /// When the package was installed.
    pub installed_at: DateTime<Utc>,
}

impl InstallRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        name: impl Into<String>,
        version: PackageVersion,
        scripts: Vec<String>,
        artifact: impl Into<String>,
        checksum: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            scripts,
            artifact: artifact.into(),
            checksum: checksum.into(),
            installed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct InstalledDb {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    packages: Vec<InstallRecord>,
}

/// Database of installed packages.
#[derive(Debug)]
pub struct InstalledStore {
    path: PathBuf,
    db: InstalledDb,
}

impl InstalledStore {
    /// Load the database, returning an empty store when the file does
    /// not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> ManagerResult<Self> {
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                db: InstalledDb::default(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ManagerError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        let db: InstalledDb = toml::from_str(&content)
            .map_err(|e| ManagerError::InvalidConfig(format!("installed database: {e}")))?;

        Ok(Self {
            path: path.to_path_buf(),
            db,
        })
    }

    /// Write the database to disk, creating parent directories as needed.
    pub fn save(&self) -> ManagerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ManagerError::CreateDirFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(&self.db)
            .map_err(|e| ManagerError::InvalidConfig(format!("installed database: {e}")))?;

        fs::write(&self.path, content).map_err(|e| ManagerError::WriteFailed {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Look up a package by name.
    pub fn get(&self, name: &str) -> Option<&InstallRecord> {
        self.db.packages.iter().find(|r| r.name == name)
    }

    /// Check whether a package is installed.
    pub fn is_installed(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Add a record, replacing any existing record with the same name.
    pub fn add(&mut self, record: InstallRecord) {
        self.db.packages.retain(|r| r.name != record.name);
        self.db.packages.push(record);
        self.db.packages.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Remove a record by name, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<InstallRecord> {
        let index = self.db.packages.iter().position(|r| r.name == name)?;
        Some(self.db.packages.remove(index))
    }

    /// All installed records, sorted by name.
    pub fn records(&self) -> &[InstallRecord] {
        &self.db.packages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(name: &str, version: &str) -> InstallRecord {
        InstallRecord::new(
            name,
            version.parse().unwrap(),
            vec![name.to_string()],
            format!("{name}-{version}.tar.gz"),
            "a".repeat(64),
        )
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = InstalledStore::load(&temp.path().join("installed.toml")).unwrap();
        assert!(store.records().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lib/sonic-pkg/installed.toml");

        let mut store = InstalledStore::load(&path).unwrap();
        store.add(record("sonic-chassisd", "1.0"));
        store.save().unwrap();

        let reloaded = InstalledStore::load(&path).unwrap();
        assert_eq!(reloaded.records().len(), 1);
        let rec = reloaded.get("sonic-chassisd").unwrap();
        assert_eq!(rec.version.to_string(), "1.0");
        assert_eq!(rec.scripts, vec!["sonic-chassisd"]);
        assert_eq!(rec.artifact, "sonic-chassisd-1.0.tar.gz");
    }

    #[test]
    fn test_add_replaces_same_name() {
        let temp = TempDir::new().unwrap();
        let mut store = InstalledStore::load(&temp.path().join("installed.toml")).unwrap();

        store.add(record("sonic-chassisd", "1.0"));
        store.add(record("sonic-chassisd", "1.1"));

        assert_eq!(store.records().len(), 1);
        assert_eq!(store.get("sonic-chassisd").unwrap().version.to_string(), "1.1");
    }

    #[test]
    fn test_records_sorted_by_name() {
        let temp = TempDir::new().unwrap();
        let mut store = InstalledStore::load(&temp.path().join("installed.toml")).unwrap();

        store.add(record("sonic-psud", "1.0"));
        store.add(record("sonic-chassisd", "1.0"));

        let names: Vec<&str> = store.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["sonic-chassisd", "sonic-psud"]);
    }

    #[test]
    fn test_remove() {
        let temp = TempDir::new().unwrap();
        let mut store = InstalledStore::load(&temp.path().join("installed.toml")).unwrap();

        store.add(record("sonic-chassisd", "1.0"));
        let removed = store.remove("sonic-chassisd").unwrap();
        assert_eq!(removed.name, "sonic-chassisd");
        assert!(store.remove("sonic-chassisd").is_none());
        assert!(!store.is_installed("sonic-chassisd"));
    }

    #[test]
    fn test_malformed_database() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("installed.toml");
        fs::write(&path, "not toml [[[").unwrap();

        let result = InstalledStore::load(&path);
        assert!(matches!(result, Err(ManagerError::InvalidConfig(_))));
    }
}
