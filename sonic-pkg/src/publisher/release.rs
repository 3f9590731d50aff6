//! Release workflow orchestration for package publishing.
//!
//! Coordinates the two-phase release workflow:
//! 1. Build - Read the manifest and create the distributable artifact
//! 2. Publish - Record the release in the package index
//!
//! Publishing is where immutability is enforced: a name and version pair
//! that is already in the index cannot be published again, with any
//! content. Shipping a fix means bumping the version.

use tracing::{debug, info};

use crate::descriptor::{read_manifest_file, IndexEntry, PackageVersion, MANIFEST_FILENAME};

use super::archive::{build_artifact, ArtifactBuildResult};
use super::index::IndexManager;
use super::{PublishError, PublishResult, Repository};

/// Status of a package in the release workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseStatus {
    /// Package source exists but the current version has no artifact yet.
    NotBuilt,

    /// Artifact built, not yet recorded in the index.
    Built {
        /// Artifact filename in `dist/`.
        artifact_name: String,
    },

    /// Release recorded in the package index.
    Published,
}

/// Result of the build phase.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Package name.
    pub name: String,

    /// Package version.
    pub version: PackageVersion,

    /// Artifact build information.
    pub artifact: ArtifactBuildResult,
}

/// Result of the publish phase.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Package name.
    pub name: String,

    /// Published version.
    pub version: PackageVersion,

    /// Artifact filename recorded in the index.
    pub artifact_name: String,

    /// Artifact checksum recorded in the index.
    pub checksum: String,

    /// New index sequence number.
    pub sequence: u64,
}

/// Build the distributable artifact for a package.
///
/// This is the first phase of the release workflow. It:
/// 1. Reads and validates the package manifest
/// 2. Checks the declared scripts exist in the source directory
/// 3. Assembles `{name}-{version}.tar.gz` in `staging/` and moves it
///    into the repository's `dist/`
///
/// Building is repeatable; it does not touch the index.
///
/// # Errors
///
/// Returns an error if the package or its manifest is missing, the manifest
/// name does not match the source directory, or the artifact cannot be
/// built.
pub fn build_package(repo: &Repository, name: &str) -> PublishResult<BuildResult> {
    let package_dir = repo.package_dir(name);

    if !repo.package_exists(name) {
        return Err(PublishError::PackageNotFound(name.to_string()));
    }

    let descriptor = read_manifest_file(&package_dir.join(MANIFEST_FILENAME))?;

    if descriptor.name != name {
        return Err(PublishError::NameMismatch {
            directory: name.to_string(),
            manifest: descriptor.name,
        });
    }

    debug!(
        package_dir = %package_dir.display(),
        "Building package artifact"
    );

    let artifact = build_artifact(
        &package_dir,
        &repo.staging_dir(),
        &repo.dist_dir(),
        &descriptor,
    )?;

    info!(
        name = %descriptor.name,
        version = %descriptor.version,
        artifact = %artifact.artifact_name,
        "Built package artifact"
    );

    Ok(BuildResult {
        name: descriptor.name,
        version: descriptor.version,
        artifact,
    })
}

/// Build and publish a package release.
///
/// This is the complete release workflow. It:
/// 1. Refuses if the manifest's name and version is already in the index
/// 2. Builds the artifact
/// 3. Records the release and saves the index
///
/// The duplicate check runs before the build so a doomed publish does not
/// overwrite an artifact that the index already references.
///
/// # Errors
///
/// Returns [`PublishError::DuplicateRelease`] for an already-published
/// version, plus any error from [`build_package`].
pub fn publish_package(repo: &Repository, name: &str) -> PublishResult<PublishOutcome> {
    let package_dir = repo.package_dir(name);

    if !repo.package_exists(name) {
        return Err(PublishError::PackageNotFound(name.to_string()));
    }

    let descriptor = read_manifest_file(&package_dir.join(MANIFEST_FILENAME))?;

    let mut index = IndexManager::open_or_create(repo.root())?;
    if index.contains(&descriptor.name, &descriptor.version) {
        return Err(PublishError::DuplicateRelease {
            name: descriptor.name,
            version: descriptor.version.to_string(),
        });
    }

    let build = build_package(repo, name)?;

    index.record_release(IndexEntry::new(
        build.name.clone(),
        build.version.clone(),
        build.artifact.artifact_name.clone(),
        build.artifact.checksum.clone(),
    ))?;
    index.save()?;

    info!(
        name = %build.name,
        version = %build.version,
        sequence = index.sequence(),
        "Published release"
    );

    Ok(PublishOutcome {
        name: build.name,
        version: build.version,
        artifact_name: build.artifact.artifact_name,
        checksum: build.artifact.checksum,
        sequence: index.sequence(),
    })
}

/// Get the release status of a package's current manifest version.
pub fn get_release_status(repo: &Repository, name: &str) -> ReleaseStatus {
    let package_dir = repo.package_dir(name);

    let descriptor = match read_manifest_file(&package_dir.join(MANIFEST_FILENAME)) {
        Ok(d) => d,
        Err(_) => return ReleaseStatus::NotBuilt,
    };

    // Index entry wins over a stray artifact
    if let Ok(index) = IndexManager::open_or_create(repo.root()) {
        if index.contains(&descriptor.name, &descriptor.version) {
            return ReleaseStatus::Published;
        }
    }

    let artifact_name = descriptor.artifact_filename();
    if repo.dist_dir().join(&artifact_name).exists() {
        return ReleaseStatus::Built { artifact_name };
    }

    ReleaseStatus::NotBuilt
}

/// Validate a repository is ready for releases.
///
/// Checks that all required files and directories exist.
pub fn validate_repository(repo: &Repository) -> PublishResult<()> {
    let packages_dir = repo.packages_dir();
    if !packages_dir.exists() {
        return Err(PublishError::InvalidRepository(
            "packages directory missing".to_string(),
        ));
    }

    let dist_dir = repo.dist_dir();
    if !dist_dir.exists() {
        return Err(PublishError::InvalidRepository(
            "dist directory missing".to_string(),
        ));
    }

    if !repo.index_path().exists() {
        return Err(PublishError::InvalidRepository(
            "index file missing".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_repo() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "sonic-platform").unwrap();
        (temp, repo)
    }

    fn setup_test_package(repo: &Repository, name: &str, version: &str) {
        let package_dir = repo.package_dir(name);
        fs::create_dir_all(package_dir.join("scripts")).unwrap();
        fs::write(
            package_dir.join(MANIFEST_FILENAME),
            format!(
                "[package]\nname = \"{}\"\nversion = \"{}\"\nscripts = [\"scripts/chassisd\"]\n",
                name, version
            ),
        )
        .unwrap();
        fs::write(
            package_dir.join("scripts/chassisd"),
            "#!/bin/sh\necho chassisd\n",
        )
        .unwrap();
    }

    #[test]
    fn test_build_package() {
        let (_temp, repo) = setup_test_repo();
        setup_test_package(&repo, "sonic-chassisd", "1.0");

        let result = build_package(&repo, "sonic-chassisd").unwrap();

        assert_eq!(result.name, "sonic-chassisd");
        assert_eq!(result.version.to_string(), "1.0");
        assert!(repo.dist_dir().join("sonic-chassisd-1.0.tar.gz").exists());
    }

    #[test]
    fn test_build_package_not_found() {
        let (_temp, repo) = setup_test_repo();

        let result = build_package(&repo, "sonic-chassisd");
        assert!(matches!(result, Err(PublishError::PackageNotFound(_))));
    }

    #[test]
    fn test_build_package_name_mismatch() {
        let (_temp, repo) = setup_test_repo();
        let package_dir = repo.package_dir("wrong-dir");
        fs::create_dir_all(&package_dir).unwrap();
        fs::write(
            package_dir.join(MANIFEST_FILENAME),
            "[package]\nname = \"sonic-chassisd\"\nversion = \"1.0\"\n",
        )
        .unwrap();

        let result = build_package(&repo, "wrong-dir");
        assert!(matches!(result, Err(PublishError::NameMismatch { .. })));
    }

    #[test]
    fn test_build_is_repeatable() {
        let (_temp, repo) = setup_test_repo();
        setup_test_package(&repo, "sonic-chassisd", "1.0");

        build_package(&repo, "sonic-chassisd").unwrap();
        build_package(&repo, "sonic-chassisd").unwrap();
    }

    #[test]
    fn test_publish_package() {
        let (_temp, repo) = setup_test_repo();
        setup_test_package(&repo, "sonic-chassisd", "1.0");

        let outcome = publish_package(&repo, "sonic-chassisd").unwrap();

        assert_eq!(outcome.name, "sonic-chassisd");
        assert_eq!(outcome.version.to_string(), "1.0");
        assert_eq!(outcome.artifact_name, "sonic-chassisd-1.0.tar.gz");
        assert_eq!(outcome.sequence, 1);

        let index = IndexManager::open(repo.root()).unwrap();
        assert!(index.contains("sonic-chassisd", &outcome.version));
    }

    #[test]
    fn test_publish_rejects_duplicate_release() {
        let (_temp, repo) = setup_test_repo();
        setup_test_package(&repo, "sonic-chassisd", "1.0");

        publish_package(&repo, "sonic-chassisd").unwrap();
        let result = publish_package(&repo, "sonic-chassisd");

        assert!(matches!(result, Err(PublishError::DuplicateRelease { .. })));

        // The index still has exactly one entry
        let index = IndexManager::open(repo.root()).unwrap();
        assert_eq!(index.entries().len(), 1);
    }

    #[test]
    fn test_publish_new_version_keeps_old_release() {
        let (_temp, repo) = setup_test_repo();
        setup_test_package(&repo, "sonic-chassisd", "1.0");
        publish_package(&repo, "sonic-chassisd").unwrap();

        // Bump the manifest version and publish again
        setup_test_package(&repo, "sonic-chassisd", "1.1");
        let outcome = publish_package(&repo, "sonic-chassisd").unwrap();
        assert_eq!(outcome.version.to_string(), "1.1");

        let index = IndexManager::open(repo.root()).unwrap();
        assert_eq!(index.entries().len(), 2);
        assert!(index.contains("sonic-chassisd", &PackageVersion::parse("1.0").unwrap()));
        assert_eq!(
            index.latest("sonic-chassisd").unwrap().version.to_string(),
            "1.1"
        );

        // Both artifacts remain in dist/
        assert!(repo.dist_dir().join("sonic-chassisd-1.0.tar.gz").exists());
        assert!(repo.dist_dir().join("sonic-chassisd-1.1.tar.gz").exists());
    }

    #[test]
    fn test_release_status_transitions() {
        let (_temp, repo) = setup_test_repo();
        setup_test_package(&repo, "sonic-chassisd", "1.0");

        assert_eq!(
            get_release_status(&repo, "sonic-chassisd"),
            ReleaseStatus::NotBuilt
        );

        build_package(&repo, "sonic-chassisd").unwrap();
        assert_eq!(
            get_release_status(&repo, "sonic-chassisd"),
            ReleaseStatus::Built {
                artifact_name: "sonic-chassisd-1.0.tar.gz".to_string()
            }
        );

        publish_package(&repo, "sonic-chassisd").unwrap();
        assert_eq!(
            get_release_status(&repo, "sonic-chassisd"),
            ReleaseStatus::Published
        );
    }

    #[test]
    fn test_release_status_missing_package() {
        let (_temp, repo) = setup_test_repo();
        assert_eq!(
            get_release_status(&repo, "sonic-chassisd"),
            ReleaseStatus::NotBuilt
        );
    }

    #[test]
    fn test_validate_repository() {
        let (_temp, repo) = setup_test_repo();
        assert!(validate_repository(&repo).is_ok());

        fs::remove_dir_all(repo.dist_dir()).unwrap();
        assert!(validate_repository(&repo).is_err());
    }
}
