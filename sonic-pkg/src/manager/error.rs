//! Error types for the package manager.

use std::io;
use std::path::PathBuf;

use crate::descriptor::ManifestError;
use crate::publisher::PublishError;

/// Result type for manager operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Errors that can occur during package management operations.
#[derive(Debug)]
pub enum ManagerError {
    /// Failed to read a file or directory.
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write a file or directory.
    WriteFailed { path: PathBuf, source: io::Error },

    /// Failed to create a directory.
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// The source repository or its index could not be used.
    Repository(PublishError),

    /// Package not found in the repository index.
    PackageNotFound(String),

    /// The requested version of a package is not published.
    VersionNotFound { name: String, version: String },

    /// The index references an artifact that is not in the repository.
    ArtifactMissing { artifact: String, path: PathBuf },

    /// Checksum verification failed.
    ChecksumMismatch {
        filename: String,
        expected: String,
        actual: String,
    },

    /// Archive extraction failed.
    ExtractionFailed { path: PathBuf, reason: String },

    /// The manifest embedded in the artifact is invalid.
    Manifest(ManifestError),

    /// The embedded manifest identifies a different release than the index
    /// entry that was installed from.
    ManifestMismatch { expected: String, found: String },

    /// A script the manifest declares is not present in the extracted
    /// artifact.
    ScriptMissingFromArchive { script: String },

    /// The exact package version is already installed.
    AlreadyInstalled { name: String, version: String },

    /// Package is not installed.
    NotInstalled(String),

    /// An entry-point target exists and is not owned by the package.
    ScriptConflict { script: String, path: PathBuf },

    /// Invalid configuration.
    InvalidConfig(String),
}

impl std::fmt::Display for ManagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadFailed { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::WriteFailed { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            Self::CreateDirFailed { path, source } => {
                write!(
                    f,
                    "failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::Repository(err) => write!(f, "{}", err),
            Self::PackageNotFound(name) => {
                write!(f, "package not found in index: {}", name)
            }
            Self::VersionNotFound { name, version } => {
                write!(f, "version {} of {} is not published", version, name)
            }
            Self::ArtifactMissing { artifact, path } => {
                write!(
                    f,
                    "artifact {} missing from repository at {}",
                    artifact,
                    path.display()
                )
            }
            Self::ChecksumMismatch {
                filename,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "checksum mismatch for {}: expected {}, got {}",
                    filename, expected, actual
                )
            }
            Self::ExtractionFailed { path, reason } => {
                write!(f, "failed to extract {}: {}", path.display(), reason)
            }
            Self::Manifest(err) => write!(f, "{}", err),
            Self::ManifestMismatch { expected, found } => {
                write!(
                    f,
                    "artifact manifest identifies {}, expected {}",
                    found, expected
                )
            }
            Self::ScriptMissingFromArchive { script } => {
                write!(f, "declared script {} is missing from the artifact", script)
            }
            Self::AlreadyInstalled { name, version } => {
                write!(f, "package {} {} is already installed", name, version)
            }
            Self::NotInstalled(name) => {
                write!(f, "package {} is not installed", name)
            }
            Self::ScriptConflict { script, path } => {
                write!(
                    f,
                    "refusing to overwrite {}: {} is not owned by this package",
                    script,
                    path.display()
                )
            }
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ManagerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFailed { source, .. } => Some(source),
            Self::WriteFailed { source, .. } => Some(source),
            Self::CreateDirFailed { source, .. } => Some(source),
            Self::Repository(err) => Some(err),
            Self::Manifest(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PublishError> for ManagerError {
    fn from(err: PublishError) -> Self {
        Self::Repository(err)
    }
}

impl From<ManifestError> for ManagerError {
    fn from(err: ManifestError) -> Self {
        Self::Manifest(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ManagerError::PackageNotFound("sonic-chassisd".to_string());
        assert_eq!(err.to_string(), "package not found in index: sonic-chassisd");
    }

    #[test]
    fn test_checksum_mismatch_display() {
        let err = ManagerError::ChecksumMismatch {
            filename: "sonic-chassisd-1.0.tar.gz".to_string(),
            expected: "abc123".to_string(),
            actual: "def456".to_string(),
        };
        assert!(err.to_string().contains("checksum mismatch"));
        assert!(err.to_string().contains("abc123"));
        assert!(err.to_string().contains("def456"));
    }

    #[test]
    fn test_script_conflict_display() {
        let err = ManagerError::ScriptConflict {
            script: "chassisd".to_string(),
            path: PathBuf::from("/usr/local/bin/chassisd"),
        };
        assert!(err.to_string().contains("refusing to overwrite"));
        assert!(err.to_string().contains("/usr/local/bin/chassisd"));
    }
}
