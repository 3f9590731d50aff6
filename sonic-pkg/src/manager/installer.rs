//! Package installer for resolving and installing published releases.
//!
//! This module orchestrates the full installation workflow:
//! 1. Resolve the requested release in the repository index
//! 2. Verify the artifact checksum
//! 3. Extract the artifact into a staging directory
//! 4. Place declared scripts in the bin directory
//! 5. Record the installation in the installed database
//! 6. Clean up staging files

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::checksum::file_sha256;
use crate::descriptor::{read_manifest_file, script_install_name, PackageVersion, MANIFEST_FILENAME};
use crate::publisher::{IndexManager, Repository};

use super::config::ManagerConfig;
use super::error::{ManagerError, ManagerResult};
use super::extractor::ArchiveExtractor;
use super::store::{InstallRecord, InstalledStore};

/// Progress callback for installation operations.
///
/// # Arguments
///
/// * `stage` - Current installation stage
/// * `progress` - Progress within the stage (0.0 - 1.0)
/// * `message` - Human-readable message
pub type InstallProgressCallback = Box<dyn Fn(InstallStage, f64, &str) + Send + Sync>;

/// Installation stages for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStage {
    /// Resolving the release in the repository index.
    Resolving,
    /// Verifying the artifact checksum.
    Verifying,
    /// Extracting artifact contents.
    Extracting,
    /// Placing scripts in the bin directory.
    Installing,
    /// Recording the installation.
    Recording,
    /// Cleaning up staging files.
    Cleanup,
    /// Installation complete.
    Complete,
}

impl InstallStage {
    /// Get a human-readable name for the stage.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resolving => "Resolving",
            Self::Verifying => "Verifying",
            Self::Extracting => "Extracting",
            Self::Installing => "Installing",
            Self::Recording => "Recording",
            Self::Cleanup => "Cleaning up",
            Self::Complete => "Complete",
        }
    }
}

/// Result of a package installation.
#[derive(Debug, Clone)]
pub struct InstallResult {
    /// Name of the installed package.
    pub name: String,
    /// Version of the installed package.
    pub version: PackageVersion,
    /// Executable names placed in the bin directory.
    pub scripts: Vec<String>,
    /// The bin directory the scripts were installed into.
    pub install_path: PathBuf,
    /// Number of files extracted from the artifact.
    pub files_extracted: usize,
    /// The previously installed version when this was an upgrade.
    pub upgraded_from: Option<PackageVersion>,
}

/// Result of a package removal.
#[derive(Debug, Clone)]
pub struct UninstallResult {
    /// Name of the removed package.
    pub name: String,
    /// Version that was installed.
    pub version: PackageVersion,
    /// Executable names removed from the bin directory.
    pub removed_scripts: Vec<String>,
}

/// Package installer.
///
/// Handles the complete installation workflow including resolution,
/// verification, extraction and bookkeeping. Only the scripts a package
/// declares in its manifest land on the search path; everything else the
/// manager touches stays under the state directory.
pub struct PackageInstaller {
    /// Manager configuration.
    config: ManagerConfig,
}

impl PackageInstaller {
    /// Create a new package installer.
    pub fn new(config: ManagerConfig) -> Self {
        Self { config }
    }

    /// Get the manager configuration.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Install a package from a publisher repository.
    ///
    /// Resolves `version` in the repository index, or the highest published
    /// version when `version` is `None`. Installing a different version of
    /// an already-installed package upgrades it in place.
    ///
    /// # Arguments
    ///
    /// * `repo` - The publisher repository to install from
    /// * `name` - Package name
    /// * `version` - Exact version to install, or `None` for the latest
    /// * `on_progress` - Optional progress callback
    ///
    /// # Returns
    ///
    /// Information about the installed package.
    pub fn install(
        &self,
        repo: &Repository,
        name: &str,
        version: Option<&PackageVersion>,
        on_progress: Option<InstallProgressCallback>,
    ) -> ManagerResult<InstallResult> {
        // Report progress helper
        let report = |stage: InstallStage, progress: f64, message: &str| {
            if let Some(ref cb) = on_progress {
                cb(stage, progress, message);
            }
        };

        // Stage 1: Resolve the release
        report(InstallStage::Resolving, 0.0, "Resolving release...");
        let index = IndexManager::open(repo.root())?;
        let entry = match version {
            Some(v) => index
                .find_release(name, v)
                .ok_or_else(|| ManagerError::VersionNotFound {
                    name: name.to_string(),
                    version: v.to_string(),
                })?,
            None => index
                .latest(name)
                .ok_or_else(|| ManagerError::PackageNotFound(name.to_string()))?,
        }
        .clone();
        debug!(
            name = %entry.name,
            version = %entry.version,
            artifact = %entry.artifact,
            "Resolved release"
        );
        report(
            InstallStage::Resolving,
            1.0,
            &format!("Resolved {} {}", entry.name, entry.version),
        );

        let artifact_path = repo.dist_dir().join(&entry.artifact);
        if !artifact_path.exists() {
            return Err(ManagerError::ArtifactMissing {
                artifact: entry.artifact,
                path: artifact_path,
            });
        }

        // Check the installed database before touching the filesystem
        let mut store = InstalledStore::load(&self.config.installed_db_path())?;
        let previous = store.get(name).cloned();
        if let Some(ref existing) = previous {
            if existing.version == entry.version {
                return Err(ManagerError::AlreadyInstalled {
                    name: name.to_string(),
                    version: entry.version.to_string(),
                });
            }
        }

        // Stage 2: Verify checksum
        if self.config.verify_checksums {
            report(InstallStage::Verifying, 0.0, "Verifying artifact checksum...");
            let actual = file_sha256(&artifact_path).map_err(|e| ManagerError::ReadFailed {
                path: artifact_path.clone(),
                source: e,
            })?;
            if actual != entry.checksum {
                return Err(ManagerError::ChecksumMismatch {
                    filename: entry.artifact,
                    expected: entry.checksum,
                    actual,
                });
            }
            report(InstallStage::Verifying, 1.0, "Checksum verified");
        } else {
            report(InstallStage::Verifying, 1.0, "Checksum verification disabled");
        }

        // Stage 3: Extract to staging
        report(InstallStage::Extracting, 0.0, "Extracting artifact...");
        let staging = self
            .config
            .staging_dir
            .join(format!("install_{}_{}", entry.name, entry.version));
        if staging.exists() {
            fs::remove_dir_all(&staging).ok();
        }

        let extractor = ArchiveExtractor::new();
        let files_extracted = extractor.extract(&artifact_path, &staging)?;
        report(
            InstallStage::Extracting,
            1.0,
            &format!("Extracted {} files", files_extracted),
        );

        // The embedded manifest must describe the release we resolved
        let descriptor = read_manifest_file(&staging.join(MANIFEST_FILENAME))?;
        if descriptor.name != entry.name || descriptor.version != entry.version {
            fs::remove_dir_all(&staging).ok();
            return Err(ManagerError::ManifestMismatch {
                expected: format!("{} {}", entry.name, entry.version),
                found: format!("{} {}", descriptor.name, descriptor.version),
            });
        }

        // Stage 4: Install scripts to the bin directory
        report(InstallStage::Installing, 0.0, "Installing scripts...");
        let bin_dir = self.config.bin_dir();
        fs::create_dir_all(&bin_dir).map_err(|e| ManagerError::CreateDirFailed {
            path: bin_dir.clone(),
            source: e,
        })?;

        // Scripts owned by the previous version may be overwritten in place
        let owned: Vec<&str> = previous
            .as_ref()
            .map(|r| r.scripts.iter().map(String::as_str).collect())
            .unwrap_or_default();

        // Refuse incomplete artifacts and conflicts before writing anything
        for script in &descriptor.scripts {
            if !staging.join(script).is_file() {
                fs::remove_dir_all(&staging).ok();
                return Err(ManagerError::ScriptMissingFromArchive {
                    script: script.clone(),
                });
            }

            let install_name = script_install_name(script);
            let target = self.config.script_path(install_name);
            if target.exists() && !owned.contains(&install_name) {
                fs::remove_dir_all(&staging).ok();
                return Err(ManagerError::ScriptConflict {
                    script: install_name.to_string(),
                    path: target,
                });
            }
        }

        let mut installed = Vec::new();
        for script in &descriptor.scripts {
            let source = staging.join(script);
            let install_name = script_install_name(script);
            let target = self.config.script_path(install_name);

            fs::copy(&source, &target).map_err(|e| ManagerError::WriteFailed {
                path: target.clone(),
                source: e,
            })?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&target, fs::Permissions::from_mode(0o755)).map_err(|e| {
                    ManagerError::WriteFailed {
                        path: target.clone(),
                        source: e,
                    }
                })?;
            }

            installed.push(install_name.to_string());
        }

        // Drop scripts the previous version shipped that this one no longer does
        if let Some(ref old) = previous {
            for script in &old.scripts {
                if !installed.contains(script) {
                    fs::remove_file(self.config.script_path(script)).ok();
                }
            }
        }
        report(
            InstallStage::Installing,
            1.0,
            &format!("Installed {} scripts", installed.len()),
        );

        // Stage 5: Record the installation
        report(InstallStage::Recording, 0.0, "Recording installation...");
        let record = InstallRecord::new(
            entry.name.clone(),
            entry.version.clone(),
            installed.clone(),
            entry.artifact.clone(),
            entry.checksum.clone(),
        );
        store.add(record);
        store.save()?;
        report(InstallStage::Recording, 1.0, "Installation recorded");

        // Stage 6: Cleanup
        report(InstallStage::Cleanup, 0.0, "Cleaning up staging files...");
        fs::remove_dir_all(&staging).ok(); // Best effort cleanup
        report(InstallStage::Cleanup, 1.0, "Cleanup complete");

        report(InstallStage::Complete, 1.0, "Installation complete");

        info!(
            name = %entry.name,
            version = %entry.version,
            prefix = %self.config.prefix.display(),
            "Installed package"
        );

        Ok(InstallResult {
            name: entry.name,
            version: entry.version,
            scripts: installed,
            install_path: bin_dir,
            files_extracted,
            upgraded_from: previous.map(|r| r.version),
        })
    }

    /// Remove an installed package.
    ///
    /// Removes exactly the executables the installation recorded, then
    /// drops the package from the installed database.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::NotInstalled`] when the package is not in
    /// the installed database.
    pub fn uninstall(&self, name: &str) -> ManagerResult<UninstallResult> {
        let mut store = InstalledStore::load(&self.config.installed_db_path())?;

        let record = store
            .remove(name)
            .ok_or_else(|| ManagerError::NotInstalled(name.to_string()))?;

        let mut removed = Vec::new();
        for script in &record.scripts {
            let path = self.config.script_path(script);
            // Never delete outside the managed bin directory
            if !self.config.owns_path(&path) {
                continue;
            }
            if path.exists() {
                fs::remove_file(&path).map_err(|e| ManagerError::WriteFailed {
                    path: path.clone(),
                    source: e,
                })?;
                removed.push(script.clone());
            }
        }

        store.save()?;

        info!(
            name = %record.name,
            version = %record.version,
            "Removed package"
        );

        Ok(UninstallResult {
            name: record.name,
            version: record.version,
            removed_scripts: removed,
        })
    }

    /// List all installed packages.
    pub fn list_installed(&self) -> ManagerResult<Vec<InstallRecord>> {
        let store = InstalledStore::load(&self.config.installed_db_path())?;
        Ok(store.records().to_vec())
    }

    /// Check whether a package is installed.
    pub fn is_installed(&self, name: &str) -> ManagerResult<bool> {
        let store = InstalledStore::load(&self.config.installed_db_path())?;
        Ok(store.is_installed(name))
    }

    /// Return the installed version of a package, if any.
    pub fn installed_version(&self, name: &str) -> ManagerResult<Option<PackageVersion>> {
        let store = InstalledStore::load(&self.config.installed_db_path())?;
        Ok(store.get(name).map(|r| r.version.clone()))
    }
}
