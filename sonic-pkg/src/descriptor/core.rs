//! Core package descriptor type.
//!
//! The [`PackageDescriptor`] struct is the complete declared identity of a
//! platform daemon package, shared across all contexts: publisher, package
//! manager, and the on-disk manifest format.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::classifiers::Classifier;
use super::naming::artifact_filename;
use super::version::PackageVersion;

/// Complete package descriptor.
///
/// This is the base type representing a daemon package. It carries the
/// identifying pair (`name`, `version`) plus the descriptive metadata and
/// the declared entry-point scripts, and is used across all contexts:
/// - **Publisher**: building and releasing artifacts
/// - **Package Manager**: installing and tracking entry points
/// - **Package Index**: listing available releases
///
/// Only `name` and `version` are mandatory. Everything else is descriptive
/// and optional, mirroring how sparse real descriptors are allowed to be.
///
/// # Example
///
/// ```
/// use sonic_pkg::descriptor::{PackageDescriptor, PackageVersion};
///
/// let descriptor = PackageDescriptor::new(
///     "sonic-chassisd",
///     PackageVersion::parse("1.0").unwrap(),
/// )
/// .with_description("Chassis daemon for SONiC")
/// .with_script("scripts/chassisd");
///
/// assert_eq!(descriptor.name, "sonic-chassisd");
/// assert_eq!(descriptor.artifact_filename(), "sonic-chassisd-1.0.tar.gz");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageDescriptor {
    /// Package name, unique within a repository (e.g., "sonic-chassisd").
    pub name: String,

    /// Package release version.
    pub version: PackageVersion,

    /// One-line human-readable summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// License identifier as declared by the author (free-form).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Original author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Contact address for the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,

    /// Current maintainer, when different from the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainer: Option<String>,

    /// Contact address for the maintainer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainer_email: Option<String>,

    /// Project homepage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Source-relative paths of the executable entry points.
    ///
    /// These are the only files the installer places on the search path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,

    /// Classifiers from the controlled vocabulary.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classifiers: Vec<Classifier>,

    /// Whitespace-separated search keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

impl PackageDescriptor {
    /// Create a minimal descriptor with just the mandatory identity fields.
    pub fn new(name: impl Into<String>, version: PackageVersion) -> Self {
        Self {
            name: name.into(),
            version,
            description: None,
            license: None,
            author: None,
            author_email: None,
            maintainer: None,
            maintainer_email: None,
            url: None,
            scripts: Vec::new(),
            classifiers: Vec::new(),
            keywords: None,
        }
    }

    /// Set the summary description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the license identifier.
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Set the author and author contact address.
    pub fn with_author(mut self, author: impl Into<String>, email: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self.author_email = Some(email.into());
        self
    }

    /// Set the maintainer and maintainer contact address.
    pub fn with_maintainer(mut self, maintainer: impl Into<String>, email: impl Into<String>) -> Self {
        self.maintainer = Some(maintainer.into());
        self.maintainer_email = Some(email.into());
        self
    }

    /// Set the project homepage.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Declare an executable entry-point script.
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.scripts.push(script.into());
        self
    }

    /// Add a classifier.
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifiers.push(classifier);
        self
    }

    /// Set the keyword string.
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// The individual keywords, split on whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// use sonic_pkg::descriptor::{PackageDescriptor, PackageVersion};
    ///
    /// let descriptor = PackageDescriptor::new(
    ///     "sonic-chassisd",
    ///     PackageVersion::parse("1.0").unwrap(),
    /// )
    /// .with_keywords("sonic SONiC chassis Chassis daemon chassisd");
    ///
    /// assert_eq!(descriptor.keyword_list().len(), 6);
    /// assert_eq!(descriptor.keyword_list()[0], "sonic");
    /// ```
    pub fn keyword_list(&self) -> Vec<&str> {
        self.keywords
            .as_deref()
            .map(|k| k.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// The canonical artifact filename for this release.
    ///
    /// Format: `{name}-{version}.tar.gz`
    pub fn artifact_filename(&self) -> String {
        artifact_filename(&self.name, &self.version)
    }
}

impl fmt::Display for PackageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}
