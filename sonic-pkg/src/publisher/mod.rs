//! Package publisher for building and releasing daemon packages.
//!
//! This module provides tools for maintaining a local package repository:
//! per-package source directories, built artifacts and the package index
//! that catalogs every published release.
//!
//! # Overview
//!
//! The publisher workflow:
//! 1. Initialize a repository (`init`)
//! 2. Author a package source with a `package.toml` manifest
//! 3. Build the distributable artifact (`build`)
//! 4. Publish to the package index (`publish`)
//!
//! Published releases are immutable. The index refuses a second publish of
//! the same name and version; newer versions supersede older ones without
//! removing them.
//!
//! # Example
//!
//! ```ignore
//! use sonic_pkg::publisher::{publish_package, Repository};
//!
//! let repo = Repository::init("/path/to/repo", "sonic-platform")?;
//!
//! // Author packages/sonic-chassisd/package.toml and its scripts, then:
//! let outcome = publish_package(&repo, "sonic-chassisd")?;
//!
//! println!("published {} {}", outcome.name, outcome.version);
//! ```

mod archive;
mod error;
mod index;
mod release;
mod repository;

pub use archive::{artifact_filename, build_artifact, ArtifactBuildResult};
pub use error::{PublishError, PublishResult};
pub use index::{IndexManager, DEFAULT_PUBLISHER, INDEX_FILENAME};
pub use release::{
    build_package, get_release_status, publish_package, validate_repository, BuildResult,
    PublishOutcome, ReleaseStatus,
};
pub use repository::Repository;
