//! Persistent tool configuration.
//!
//! Settings live in an INI file under the platform configuration directory
//! (`~/.config/sonic-pkg/config.ini` on Linux). The file carries the default
//! publisher repository location and the install prefix so they do not have
//! to be repeated on every command line.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use crate::manager::ManagerConfig;

/// Configuration directory name under the platform config root.
const CONFIG_DIR_NAME: &str = "sonic-pkg";

/// Configuration filename.
const CONFIG_FILENAME: &str = "config.ini";

/// Errors that can occur loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or parsed.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ini::Error),

    /// The configuration file could not be written.
    #[error("failed to write configuration {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A value does not parse for its key.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    /// The key is not a recognized configuration setting.
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Get the path of the configuration file.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILENAME)
}

/// Repository settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepositoryConfig {
    /// Path of the default publisher repository.
    pub path: Option<PathBuf>,
}

/// Installation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    /// Installation prefix.
    pub prefix: PathBuf,

    /// Staging directory override for extraction.
    pub staging_dir: Option<PathBuf>,

    /// Whether to verify artifact checksums before installing.
    pub verify_checksums: bool,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            prefix: PathBuf::from("/usr/local"),
            staging_dir: None,
            verify_checksums: true,
        }
    }
}

/// Loaded configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFile {
    /// Repository settings.
    pub repository: RepositoryConfig,

    /// Installation settings.
    pub install: InstallConfig,
}

impl ConfigFile {
    /// Load the configuration from the default location.
    ///
    /// A missing file is not an error; defaults are returned.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load the configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        Ok(Self::from_ini(&ini))
    }

    /// Save the configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save the configuration to a specific path, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        self.to_ini()
            .write_to_file(path)
            .map_err(|e| ConfigError::Write {
                path: path.to_path_buf(),
                source: e,
            })
    }

    /// Build a manager configuration from the install settings.
    pub fn manager_config(&self) -> ManagerConfig {
        let mut config = ManagerConfig::new(&self.install.prefix)
            .with_verify_checksums(self.install.verify_checksums);
        if let Some(ref staging) = self.install.staging_dir {
            config = config.with_staging_dir(staging);
        }
        config
    }

    fn from_ini(ini: &Ini) -> Self {
        let mut config = Self::default();

        if let Some(path) = ini.get_from(Some("repository"), "path") {
            config.repository.path = Some(PathBuf::from(path));
        }

        if let Some(prefix) = ini.get_from(Some("install"), "prefix") {
            config.install.prefix = PathBuf::from(prefix);
        }
        if let Some(staging) = ini.get_from(Some("install"), "staging_dir") {
            config.install.staging_dir = Some(PathBuf::from(staging));
        }
        if let Some(verify) = ini.get_from(Some("install"), "verify_checksums") {
            config.install.verify_checksums = verify != "false";
        }

        config
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();

        if let Some(ref path) = self.repository.path {
            ini.with_section(Some("repository"))
                .set("path", path.display().to_string());
        }

        let mut install = ini.with_section(Some("install"));
        install.set("prefix", self.install.prefix.display().to_string());
        if let Some(ref staging) = self.install.staging_dir {
            install.set("staging_dir", staging.display().to_string());
        }
        install.set(
            "verify_checksums",
            self.install.verify_checksums.to_string(),
        );

        ini
    }
}

/// A recognized configuration setting.
///
/// Keys are written `section.key`, matching the INI layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `repository.path` - default publisher repository.
    RepositoryPath,
    /// `install.prefix` - installation prefix.
    InstallPrefix,
    /// `install.staging_dir` - staging directory override.
    InstallStagingDir,
    /// `install.verify_checksums` - checksum verification toggle.
    InstallVerifyChecksums,
}

impl ConfigKey {
    /// All recognized keys, in display order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::RepositoryPath,
            ConfigKey::InstallPrefix,
            ConfigKey::InstallStagingDir,
            ConfigKey::InstallVerifyChecksums,
        ]
    }

    /// The full `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RepositoryPath => "repository.path",
            Self::InstallPrefix => "install.prefix",
            Self::InstallStagingDir => "install.staging_dir",
            Self::InstallVerifyChecksums => "install.verify_checksums",
        }
    }

    /// The INI section the key lives in.
    pub fn section(&self) -> &'static str {
        match self {
            Self::RepositoryPath => "repository",
            Self::InstallPrefix | Self::InstallStagingDir | Self::InstallVerifyChecksums => {
                "install"
            }
        }
    }

    /// The key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            Self::RepositoryPath => "path",
            Self::InstallPrefix => "prefix",
            Self::InstallStagingDir => "staging_dir",
            Self::InstallVerifyChecksums => "verify_checksums",
        }
    }

    /// Read the current value from a configuration, empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            Self::RepositoryPath => config
                .repository
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            Self::InstallPrefix => config.install.prefix.display().to_string(),
            Self::InstallStagingDir => config
                .install
                .staging_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            Self::InstallVerifyChecksums => config.install.verify_checksums.to_string(),
        }
    }

    /// Write a value into a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the value does not parse
    /// for the key.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        match self {
            Self::RepositoryPath => {
                config.repository.path = Some(PathBuf::from(value));
            }
            Self::InstallPrefix => {
                config.install.prefix = PathBuf::from(value);
            }
            Self::InstallStagingDir => {
                config.install.staging_dir = Some(PathBuf::from(value));
            }
            Self::InstallVerifyChecksums => {
                config.install.verify_checksums =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: self.name().to_string(),
                        value: value.to_string(),
                    })?;
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .find(|k| k.name() == s)
            .copied()
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.repository.path.is_none());
        assert_eq!(config.install.prefix, PathBuf::from("/usr/local"));
        assert!(config.install.verify_checksums);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp.path().join("config.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sonic-pkg/config.ini");

        let mut config = ConfigFile::default();
        config.repository.path = Some(PathBuf::from("/var/lib/sonic-repo"));
        config.install.prefix = PathBuf::from("/opt/sonic");
        config.install.verify_checksums = false;
        config.save_to(&path).unwrap();

        let reloaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(&path, "[repository]\npath = /srv/repo\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.repository.path, Some(PathBuf::from("/srv/repo")));
        // Unset sections keep their defaults
        assert_eq!(config.install.prefix, PathBuf::from("/usr/local"));
    }

    #[test]
    fn test_config_key_parse() {
        let key: ConfigKey = "repository.path".parse().unwrap();
        assert_eq!(key, ConfigKey::RepositoryPath);

        let result: Result<ConfigKey, _> = "bogus.key".parse();
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn test_config_key_round_trip() {
        let mut config = ConfigFile::default();

        for key in ConfigKey::all() {
            assert_eq!(format!("{}.{}", key.section(), key.key_name()), key.name());
        }

        ConfigKey::RepositoryPath
            .set(&mut config, "/srv/repo")
            .unwrap();
        assert_eq!(ConfigKey::RepositoryPath.get(&config), "/srv/repo");

        ConfigKey::InstallVerifyChecksums
            .set(&mut config, "false")
            .unwrap();
        assert!(!config.install.verify_checksums);
    }

    #[test]
    fn test_config_key_invalid_bool() {
        let mut config = ConfigFile::default();
        let result = ConfigKey::InstallVerifyChecksums.set(&mut config, "sometimes");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_manager_config() {
        let mut config = ConfigFile::default();
        config.install.prefix = PathBuf::from("/opt/sonic");
        config.install.staging_dir = Some(PathBuf::from("/var/tmp/staging"));
        config.install.verify_checksums = false;

        let manager = config.manager_config();
        assert_eq!(manager.prefix, PathBuf::from("/opt/sonic"));
        assert_eq!(manager.staging_dir, PathBuf::from("/var/tmp/staging"));
        assert!(!manager.verify_checksums);
    }
}
