//! sonic-pkg - Packaging for SONiC platform daemons
//!
//! This library builds, publishes and installs distributable packages for
//! SONiC platform monitoring daemons such as `sonic-chassisd`. A package
//! is described by a `package.toml` manifest carrying its identity, its
//! descriptive metadata and the entry-point scripts it ships; the tooling
//! turns that description into a tar.gz artifact, catalogs it in a package
//! index and installs its scripts onto a host's search path.
//!
//! # Overview
//!
//! The crate is organized around the package lifecycle:
//!
//! - [`descriptor`] - The package manifest, version and classifier types,
//!   and the package index format
//! - [`publisher`] - Local repositories where packages are authored, built
//!   into artifacts and published to the index
//! - [`manager`] - Installation of published releases onto a host
//! - [`config`] - Persistent tool configuration
//! - [`checksum`] - SHA-256 hashing used for artifact integrity
//!
//! # Example
//!
//! ```ignore
//! use sonic_pkg::manager::{ManagerConfig, PackageInstaller};
//! use sonic_pkg::publisher::{publish_package, Repository};
//!
//! // Publish a package from an authored source directory
//! let repo = Repository::open("/var/lib/sonic-repo")?;
//! publish_package(&repo, "sonic-chassisd")?;
//!
//! // Install it; exactly the declared scripts land in <prefix>/bin
//! let installer = PackageInstaller::new(ManagerConfig::default());
//! let result = installer.install(&repo, "sonic-chassisd", None, None)?;
//! assert_eq!(result.scripts, vec!["chassisd"]);
//! ```

pub mod checksum;
pub mod config;
pub mod descriptor;
pub mod manager;
pub mod publisher;
