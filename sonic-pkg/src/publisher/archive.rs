//! Artifact building for package distribution.
//!
//! Creates tar.gz artifacts from package source directories. An artifact
//! contains exactly the canonical manifest at `package.toml` plus the
//! declared entry-point scripts at their source-relative paths. Nothing
//! else from the source directory is picked up; what the descriptor does
//! not declare does not ship.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use super::{PublishError, PublishResult};
use crate::checksum::file_sha256;
use crate::descriptor::{serialize_manifest, PackageDescriptor, MANIFEST_FILENAME};

// Re-export for convenience
pub use crate::descriptor::artifact_filename;

/// Result of building an artifact.
#[derive(Debug, Clone)]
pub struct ArtifactBuildResult {
    /// The artifact filename (e.g., "sonic-chassisd-1.0.tar.gz").
    pub artifact_name: String,

    /// Full path to the built artifact.
    pub path: PathBuf,

    /// SHA-256 checksum of the artifact.
    pub checksum: String,

    /// Size of the artifact in bytes.
    pub size: u64,
}

/// Build a distributable artifact for a package.
///
/// The artifact is written under `staging_dir` and only moved into
/// `dist_dir` once complete, so `dist/` never holds a partial archive.
///
/// # Arguments
///
/// * `package_dir` - Package source directory the script paths resolve
///   against
/// * `staging_dir` - Directory the artifact is assembled in
/// * `dist_dir` - Directory the finished artifact lands in
/// * `descriptor` - The package descriptor to embed
///
/// # Errors
///
/// Returns an error if the package declares no scripts, a declared script
/// is missing or not a regular file, or writing the artifact fails.
pub fn build_artifact(
    package_dir: &Path,
    staging_dir: &Path,
    dist_dir: &Path,
    descriptor: &PackageDescriptor,
) -> PublishResult<ArtifactBuildResult> {
    if descriptor.scripts.is_empty() {
        return Err(PublishError::NoScripts(descriptor.name.clone()));
    }

    // Resolve and check every declared script before writing anything
    let mut script_paths = Vec::with_capacity(descriptor.scripts.len());
    for script in &descriptor.scripts {
        let path = package_dir.join(script);
        if !path.exists() {
            return Err(PublishError::MissingScript {
                script: script.clone(),
                path,
            });
        }
        if !path.is_file() {
            return Err(PublishError::ScriptNotFile {
                script: script.clone(),
                path,
            });
        }
        script_paths.push(path);
    }

    for dir in [staging_dir, dist_dir] {
        std::fs::create_dir_all(dir).map_err(|e| PublishError::CreateDirectoryFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }

    let artifact_name = descriptor.artifact_filename();
    let staged_path = staging_dir.join(&artifact_name);
    let artifact_path = dist_dir.join(&artifact_name);

    if let Err(e) = write_artifact(&staged_path, descriptor, &script_paths) {
        std::fs::remove_file(&staged_path).ok(); // Best effort cleanup
        return Err(PublishError::ArchiveFailed {
            path: staged_path,
            source: e,
        });
    }

    std::fs::rename(&staged_path, &artifact_path).map_err(|e| PublishError::WriteFailed {
        path: artifact_path.clone(),
        source: e,
    })?;

    let checksum = file_sha256(&artifact_path).map_err(|e| PublishError::ReadFailed {
        path: artifact_path.clone(),
        source: e,
    })?;

    let size = std::fs::metadata(&artifact_path)
        .map_err(|e| PublishError::ReadFailed {
            path: artifact_path.clone(),
            source: e,
        })?
        .len();

    Ok(ArtifactBuildResult {
        artifact_name,
        path: artifact_path,
        checksum,
        size,
    })
}

/// Write the tar.gz artifact: canonical manifest first, then the scripts.
fn write_artifact(
    artifact_path: &Path,
    descriptor: &PackageDescriptor,
    script_paths: &[PathBuf],
) -> io::Result<()> {
    let file = File::create(artifact_path)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    // The embedded manifest is re-serialized from the descriptor so the
    // artifact always carries the canonical form.
    let manifest = serialize_manifest(descriptor)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    let data = manifest.as_bytes();

    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(chrono::Utc::now().timestamp() as u64);
    header.set_cksum();
    builder.append_data(&mut header, MANIFEST_FILENAME, data)?;

    for (script, path) in descriptor.scripts.iter().zip(script_paths) {
        builder.append_path_with_name(path, script)?;
    }

    let encoder = builder.into_inner()?;
    encoder.finish()?;

    Ok(())
}
