//! Repository management for the package publisher.
//!
//! A repository is a local directory structure containing packages being
//! prepared for distribution. It includes the package index, per-package
//! source directories, and built artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use semver::Version;

use super::{PublishError, PublishResult};
use crate::descriptor::{serialize_index, PackageIndex, MANIFEST_FILENAME};

/// Repository marker filename.
const REPO_MARKER: &str = ".sonic-pkg-repo";

/// Repository marker header.
const REPO_HEADER: &str = "SONIC-PKG PACKAGE REPOSITORY";

/// Current repository format version.
const REPO_VERSION: &str = "1.0.0";

/// Subdirectory for package source directories.
const PACKAGES_DIR: &str = "packages";

/// Subdirectory for built artifacts.
const DIST_DIR: &str = "dist";

/// Subdirectory for work in progress.
const STAGING_DIR: &str = "staging";

/// Package index filename.
const INDEX_FILE: &str = "index.toml";

/// A package publisher repository.
///
/// Manages the structure and state of a local package repository used to
/// build and publish SONiC platform daemon packages.
#[derive(Debug, Clone)]
pub struct Repository {
    /// Root path of the repository.
    root: PathBuf,

    /// Repository format version.
    version: Version,

    /// When the repository was created.
    created_at: DateTime<Utc>,
}

impl Repository {
    /// Initialize a new repository at the given path.
    ///
    /// Creates the repository structure:
    /// - `.sonic-pkg-repo` marker file
    /// - `packages/` directory for package sources
    /// - `dist/` directory for built artifacts
    /// - `staging/` directory for work in progress
    /// - Empty `index.toml` owned by `publisher`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A repository already exists at the path
    /// - Directory creation fails
    /// - File writing fails
    pub fn init(path: impl AsRef<Path>, publisher: &str) -> PublishResult<Self> {
        let root = path.as_ref().to_path_buf();

        // Check if repository already exists
        let marker_path = root.join(REPO_MARKER);
        if marker_path.exists() {
            return Err(PublishError::RepositoryExists(root));
        }

        // Create root directory if it doesn't exist
        if !root.exists() {
            fs::create_dir_all(&root).map_err(|e| PublishError::CreateDirectoryFailed {
                path: root.clone(),
                source: e,
            })?;
        }

        // Create subdirectories
        for dir in [PACKAGES_DIR, DIST_DIR, STAGING_DIR] {
            let dir_path = root.join(dir);
            fs::create_dir_all(&dir_path).map_err(|e| PublishError::CreateDirectoryFailed {
                path: dir_path,
                source: e,
            })?;
        }

        let now = Utc::now();
        let version = Version::parse(REPO_VERSION).expect("valid version constant");

        // Write repository marker
        let marker_content = format!(
            "{}\n{}\n{}\n",
            REPO_HEADER,
            REPO_VERSION,
            now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        );
        fs::write(&marker_path, marker_content).map_err(|e| PublishError::WriteFailed {
            path: marker_path,
            source: e,
        })?;

        // Write empty package index
        let index_path = root.join(INDEX_FILE);
        let index_content = serialize_index(&PackageIndex::new(publisher))?;
        fs::write(&index_path, index_content).map_err(|e| PublishError::WriteFailed {
            path: index_path,
            source: e,
        })?;

        Ok(Self {
            root,
            version,
            created_at: now,
        })
    }

    /// Open an existing repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No repository exists at the path
    /// - The repository marker is invalid
    pub fn open(path: impl AsRef<Path>) -> PublishResult<Self> {
        let root = path.as_ref().to_path_buf();
        let marker_path = root.join(REPO_MARKER);

        if !marker_path.exists() {
            return Err(PublishError::RepositoryNotFound(root));
        }

        let content = fs::read_to_string(&marker_path).map_err(|e| PublishError::ReadFailed {
            path: marker_path.clone(),
            source: e,
        })?;

        let lines: Vec<&str> = content.lines().collect();
        if lines.len() < 3 {
            return Err(PublishError::InvalidRepository(
                "marker file has insufficient lines".to_string(),
            ));
        }

        // Validate header
        if lines[0].trim() != REPO_HEADER {
            return Err(PublishError::InvalidRepository(format!(
                "invalid header: expected '{}', got '{}'",
                REPO_HEADER,
                lines[0].trim()
            )));
        }

        // Parse version
        let version = Version::parse(lines[1].trim())
            .map_err(|e| PublishError::InvalidRepository(format!("invalid version: {}", e)))?;

        // Parse creation timestamp
        let created_at = DateTime::parse_from_rfc3339(lines[2].trim())
            .map_err(|e| PublishError::InvalidRepository(format!("invalid timestamp: {}", e)))?
            .with_timezone(&Utc);

        Ok(Self {
            root,
            version,
            created_at,
        })
    }

    /// Check if a repository exists at the given path.
    pub fn exists(path: impl AsRef<Path>) -> bool {
        path.as_ref().join(REPO_MARKER).exists()
    }

    /// Get the root path of the repository.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the repository format version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Get when the repository was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the path to the packages directory.
    pub fn packages_dir(&self) -> PathBuf {
        self.root.join(PACKAGES_DIR)
    }

    /// Get the path to the dist directory.
    pub fn dist_dir(&self) -> PathBuf {
        self.root.join(DIST_DIR)
    }

    /// Get the path to the staging directory.
    pub fn staging_dir(&self) -> PathBuf {
        self.root.join(STAGING_DIR)
    }

    /// Get the path to the package index file.
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    /// Get the source directory for a package.
    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.packages_dir().join(name)
    }

    /// Check if a package source directory exists in the repository.
    ///
    /// A directory counts as a package only when it carries a manifest.
    pub fn package_exists(&self, name: &str) -> bool {
        self.package_dir(name).join(MANIFEST_FILENAME).is_file()
    }

    /// List the packages in the repository, sorted by name.
    ///
    /// Only directories containing a manifest are reported.
    pub fn list_packages(&self) -> PublishResult<Vec<String>> {
        let packages_dir = self.packages_dir();
        if !packages_dir.exists() {
            return Ok(Vec::new());
        }

        let mut packages = Vec::new();

        let entries = fs::read_dir(&packages_dir).map_err(|e| PublishError::ReadFailed {
            path: packages_dir.clone(),
            source: e,
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| PublishError::ReadFailed {
                path: packages_dir.clone(),
                source: e,
            })?;

            let path = entry.path();
            if !path.is_dir() || !path.join(MANIFEST_FILENAME).is_file() {
                continue;
            }

            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                packages.push(name.to_string());
            }
        }

        packages.sort();

        Ok(packages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_repo() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "sonic-platform").unwrap();
        (temp, repo)
    }

    fn add_package(repo: &Repository, name: &str) {
        let dir = repo.package_dir(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(MANIFEST_FILENAME),
            format!("[package]\nname = \"{}\"\nversion = \"1.0\"\n", name),
        )
        .unwrap();
    }

    #[test]
    fn test_init_creates_marker() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path(), "sonic-platform").unwrap();
        assert!(temp.path().join(REPO_MARKER).exists());
    }

    #[test]
    fn test_init_creates_directories() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path(), "sonic-platform").unwrap();

        assert!(temp.path().join(PACKAGES_DIR).exists());
        assert!(temp.path().join(DIST_DIR).exists());
        assert!(temp.path().join(STAGING_DIR).exists());
    }

    #[test]
    fn test_init_creates_index() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path(), "sonic-platform").unwrap();
        assert!(temp.path().join(INDEX_FILE).exists());
    }

    #[test]
    fn test_init_fails_if_exists() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path(), "sonic-platform").unwrap();

        let result = Repository::init(temp.path(), "sonic-platform");
        assert!(matches!(result, Err(PublishError::RepositoryExists(_))));
    }

    #[test]
    fn test_init_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("deeply/nested/repo");

        Repository::init(&nested, "sonic-platform").unwrap();
        assert!(nested.join(REPO_MARKER).exists());
    }

    #[test]
    fn test_open_existing() {
        let (temp, _) = temp_repo();
        let repo = Repository::open(temp.path()).unwrap();

        assert_eq!(repo.root(), temp.path());
        assert_eq!(repo.version().to_string(), REPO_VERSION);
    }

    #[test]
    fn test_open_not_found() {
        let temp = TempDir::new().unwrap();
        let result = Repository::open(temp.path());
        assert!(matches!(result, Err(PublishError::RepositoryNotFound(_))));
    }

    #[test]
    fn test_open_rejects_bad_header() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(REPO_MARKER),
            "SOMETHING ELSE\n1.0.0\n2024-01-01T00:00:00Z\n",
        )
        .unwrap();

        let result = Repository::open(temp.path());
        assert!(matches!(result, Err(PublishError::InvalidRepository(_))));
    }

    #[test]
    fn test_open_rejects_truncated_marker() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(REPO_MARKER), "SONIC-PKG PACKAGE REPOSITORY\n").unwrap();

        let result = Repository::open(temp.path());
        assert!(matches!(result, Err(PublishError::InvalidRepository(_))));
    }

    #[test]
    fn test_exists() {
        let temp = TempDir::new().unwrap();
        assert!(!Repository::exists(temp.path()));

        Repository::init(temp.path(), "sonic-platform").unwrap();
        assert!(Repository::exists(temp.path()));
    }

    #[test]
    fn test_directory_accessors() {
        let (temp, repo) = temp_repo();

        assert_eq!(repo.packages_dir(), temp.path().join(PACKAGES_DIR));
        assert_eq!(repo.dist_dir(), temp.path().join(DIST_DIR));
        assert_eq!(repo.staging_dir(), temp.path().join(STAGING_DIR));
        assert_eq!(repo.index_path(), temp.path().join(INDEX_FILE));
    }

    #[test]
    fn test_package_dir() {
        let (_temp, repo) = temp_repo();
        let dir = repo.package_dir("sonic-chassisd");
        assert!(dir.ends_with("packages/sonic-chassisd"));
    }

    #[test]
    fn test_package_exists_requires_manifest() {
        let (_temp, repo) = temp_repo();
        assert!(!repo.package_exists("sonic-chassisd"));

        // Bare directory is not a package
        fs::create_dir_all(repo.package_dir("sonic-chassisd")).unwrap();
        assert!(!repo.package_exists("sonic-chassisd"));

        add_package(&repo, "sonic-chassisd");
        assert!(repo.package_exists("sonic-chassisd"));
    }

    #[test]
    fn test_list_packages_empty() {
        let (_temp, repo) = temp_repo();
        let packages = repo.list_packages().unwrap();
        assert!(packages.is_empty());
    }

    #[test]
    fn test_list_packages_sorted() {
        let (_temp, repo) = temp_repo();

        add_package(&repo, "sonic-pcied");
        add_package(&repo, "sonic-chassisd");
        add_package(&repo, "sonic-psud");

        let packages = repo.list_packages().unwrap();
        assert_eq!(packages, vec!["sonic-chassisd", "sonic-pcied", "sonic-psud"]);
    }

    #[test]
    fn test_list_packages_skips_non_packages() {
        let (_temp, repo) = temp_repo();

        add_package(&repo, "sonic-chassisd");
        fs::create_dir_all(repo.packages_dir().join("scratch")).unwrap();
        fs::write(repo.packages_dir().join("notes.txt"), "not a package").unwrap();

        let packages = repo.list_packages().unwrap();
        assert_eq!(packages, vec!["sonic-chassisd"]);
    }

    #[test]
    fn test_marker_content_format() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path(), "sonic-platform").unwrap();

        let content = fs::read_to_string(temp.path().join(REPO_MARKER)).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], REPO_HEADER);
        assert_eq!(lines[1], REPO_VERSION);
        // Line 3 is the timestamp, just verify it parses
        assert!(DateTime::parse_from_rfc3339(lines[2]).is_ok());
    }

    #[test]
    fn test_initial_index_is_empty() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path(), "sonic-platform").unwrap();

        let content = fs::read_to_string(temp.path().join(INDEX_FILE)).unwrap();
        let index = crate::descriptor::parse_index(&content).unwrap();

        assert_eq!(index.publisher, "sonic-platform");
        assert_eq!(index.sequence, 0);
        assert!(index.entries.is_empty());
    }

    #[test]
    fn test_repo_clone() {
        let (_temp, repo) = temp_repo();
        let cloned = repo.clone();
        assert_eq!(cloned.root(), repo.root());
    }
}
