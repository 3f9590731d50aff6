//! Package manager for installing published daemon packages.
//!
//! This module installs packages from a publisher repository onto a host.
//! Installation resolves a release in the package index, verifies the
//! artifact, and places the package's declared entry-point scripts in
//! `<prefix>/bin`, the managed search path.
//!
//! # Overview
//!
//! The manager keeps two promises about the filesystem:
//!
//! - Only scripts a package declares in its manifest land in the bin
//!   directory, named by their basename.
//! - Bookkeeping lives under `<prefix>/lib/sonic-pkg`, never on the
//!   search path.
//!
//! Uninstalling removes exactly the executables the installation recorded.
//!
//! # Example
//!
//! ```ignore
//! use sonic_pkg::manager::{ManagerConfig, PackageInstaller};
//! use sonic_pkg::publisher::Repository;
//!
//! let repo = Repository::open("/path/to/repo")?;
//! let installer = PackageInstaller::new(ManagerConfig::default());
//!
//! let result = installer.install(&repo, "sonic-chassisd", None, None)?;
//! println!("installed {} {}", result.name, result.version);
//! ```

mod config;
mod error;
mod extractor;
mod installer;
mod store;

pub use config::ManagerConfig;
pub use error::{ManagerError, ManagerResult};
pub use extractor::ArchiveExtractor;
pub use installer::{
    InstallProgressCallback, InstallResult, InstallStage, PackageInstaller, UninstallResult,
};
pub use store::{InstallRecord, InstalledStore};
