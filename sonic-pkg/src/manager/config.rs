//! Configuration for the package manager.

use std::path::{Path, PathBuf};

/// Installed-state directory name under `<prefix>/lib`.
const STATE_DIR_NAME: &str = "sonic-pkg";

/// Installed-package database filename.
const INSTALLED_DB_FILENAME: &str = "installed.toml";

/// Configuration for the package manager.
///
/// The manager installs entry-point scripts into `<prefix>/bin` and keeps
/// its bookkeeping under `<prefix>/lib/sonic-pkg`, outside the search path.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Installation prefix.
    pub prefix: PathBuf,

    /// Directory for temporary extraction during installation.
    pub staging_dir: PathBuf,

    /// Whether to verify artifact checksums against the index before
    /// installing.
    pub verify_checksums: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            prefix: PathBuf::from("/usr/local"),
            staging_dir: std::env::temp_dir().join("sonic-pkg-staging"),
            verify_checksums: true,
        }
    }
}

impl ManagerConfig {
    /// Create a new configuration with the given install prefix.
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    /// Set the staging directory.
    pub fn with_staging_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.staging_dir = path.into();
        self
    }

    /// Enable or disable checksum verification.
    pub fn with_verify_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    /// The directory entry-point scripts are installed into.
    pub fn bin_dir(&self) -> PathBuf {
        self.prefix.join("bin")
    }

    /// The manager's state directory.
    pub fn state_dir(&self) -> PathBuf {
        self.prefix.join("lib").join(STATE_DIR_NAME)
    }

    /// Path of the installed-package database.
    pub fn installed_db_path(&self) -> PathBuf {
        self.state_dir().join(INSTALLED_DB_FILENAME)
    }

    /// The installed path of an entry-point script.
    pub fn script_path(&self, install_name: &str) -> PathBuf {
        self.bin_dir().join(install_name)
    }

    /// Check whether a path lies on the managed search path.
    pub fn owns_path(&self, path: &Path) -> bool {
        path.starts_with(self.bin_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ManagerConfig::default();
        assert_eq!(config.prefix, PathBuf::from("/usr/local"));
        assert!(config.verify_checksums);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ManagerConfig::new("/opt/sonic")
            .with_staging_dir("/var/tmp/sonic-staging")
            .with_verify_checksums(false);

        assert_eq!(config.prefix, PathBuf::from("/opt/sonic"));
        assert_eq!(config.staging_dir, PathBuf::from("/var/tmp/sonic-staging"));
        assert!(!config.verify_checksums);
    }

    #[test]
    fn test_derived_paths() {
        let config = ManagerConfig::new("/opt/sonic");

        assert_eq!(config.bin_dir(), PathBuf::from("/opt/sonic/bin"));
        assert_eq!(config.state_dir(), PathBuf::from("/opt/sonic/lib/sonic-pkg"));
        assert_eq!(
            config.installed_db_path(),
            PathBuf::from("/opt/sonic/lib/sonic-pkg/installed.toml")
        );
        assert_eq!(
            config.script_path("chassisd"),
            PathBuf::from("/opt/sonic/bin/chassisd")
        );
    }

    #[test]
    fn test_bookkeeping_is_outside_bin() {
        // The installed database must never land on the search path.
        let config = ManagerConfig::new("/opt/sonic");
        assert!(!config.installed_db_path().starts_with(config.bin_dir()));
    }

    #[test]
    fn test_owns_path() {
        let config = ManagerConfig::new("/opt/sonic");
        assert!(config.owns_path(Path::new("/opt/sonic/bin/chassisd")));
        assert!(!config.owns_path(Path::new("/usr/bin/chassisd")));
    }
}
