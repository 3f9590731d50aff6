//! Controlled classifier vocabulary.
//!
//! Descriptors carry a list of classifiers describing maturity, environment,
//! audience, license and topic. The strings follow the trove convention of
//! `Group :: Value` paths and only entries from the built-in vocabulary are
//! accepted; free-form strings would make the field useless for filtering
//! and would let typos pass review silently.
//!
//! Matching is exact, including spacing around the `::` separators, so the
//! canonical spelling is the only spelling.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Group/value separator inside a classifier path.
const SEPARATOR: &str = " :: ";

/// Every classifier this crate accepts.
///
/// The set covers the groups daemon packages actually use. It intentionally
/// stays small; growing it is a code change, which keeps the vocabulary
/// reviewed rather than open-ended.
const ACCEPTED: &[&str] = &[
    "Development Status :: 1 - Planning",
    "Development Status :: 2 - Pre-Alpha",
    "Development Status :: 3 - Alpha",
    "Development Status :: 4 - Beta",
    "Development Status :: 5 - Production/Stable",
    "Development Status :: 6 - Mature",
    "Development Status :: 7 - Inactive",
    "Environment :: Console",
    "Environment :: No Input/Output (Daemon)",
    "Environment :: Other Environment",
    "Environment :: Web Environment",
    "Intended Audience :: Developers",
    "Intended Audience :: End Users/Desktop",
    "Intended Audience :: Information Technology",
    "Intended Audience :: Science/Research",
    "Intended Audience :: System Administrators",
    "Intended Audience :: Telecommunications Industry",
    "License :: OSI Approved :: Apache Software License",
    "License :: OSI Approved :: BSD License",
    "License :: OSI Approved :: GNU General Public License v2 (GPLv2)",
    "License :: OSI Approved :: GNU General Public License v3 (GPLv3)",
    "License :: OSI Approved :: MIT License",
    "Natural Language :: English",
    "Operating System :: OS Independent",
    "Operating System :: POSIX",
    "Operating System :: POSIX :: Linux",
    "Operating System :: Unix",
    "Programming Language :: C",
    "Programming Language :: C++",
    "Programming Language :: Python",
    "Programming Language :: Python :: 2.7",
    "Programming Language :: Python :: 3",
    "Programming Language :: Rust",
    "Topic :: Software Development :: Libraries",
    "Topic :: Software Development :: Libraries :: Python Modules",
    "Topic :: System",
    "Topic :: System :: Hardware",
    "Topic :: System :: Monitoring",
    "Topic :: System :: Networking",
    "Topic :: System :: Operating System",
    "Topic :: Utilities",
];

/// Error returned when a classifier string is not in the vocabulary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown classifier '{value}'")]
pub struct ClassifierError {
    value: String,
}

impl ClassifierError {
    /// The rejected classifier string.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A validated classifier from the built-in vocabulary.
///
/// # Example
///
/// ```
/// use sonic_pkg::descriptor::Classifier;
///
/// let classifier = Classifier::parse("Environment :: No Input/Output (Daemon)").unwrap();
/// assert_eq!(classifier.group(), "Environment");
///
/// assert!(Classifier::parse("Environment :: Cloud").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Classifier(#[serde(skip)] &'static str);

impl Classifier {
    /// Look up a classifier string in the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] when the string is not an exact match for
    /// an accepted entry.
    pub fn parse(input: &str) -> Result<Self, ClassifierError> {
        ACCEPTED
            .iter()
            .find(|&&entry| entry == input)
            .map(|&entry| Self(entry))
            .ok_or_else(|| ClassifierError {
                value: input.to_string(),
            })
    }

    /// The canonical classifier string.
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// The top-level group, e.g. `Development Status` or `Topic`.
    pub fn group(&self) -> &'static str {
        match self.0.find(SEPARATOR) {
            Some(at) => &self.0[..at],
            None => self.0,
        }
    }

    /// The full accepted vocabulary, in display order.
    pub fn accepted() -> &'static [&'static str] {
        ACCEPTED
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl TryFrom<String> for Classifier {
    type Error = ClassifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Classifier> for String {
    fn from(classifier: Classifier) -> Self {
        classifier.0.to_string()
    }
}
