//! Package release versions.
//!
//! Daemon package versions are plain dotted release numbers (`1`, `1.0`,
//! `1.0.3`) inherited from the source packaging format. They are close to
//! semver but not semver: two-segment versions like `1.0` are legal and must
//! survive a manifest round trip byte for byte, so [`PackageVersion`] keeps
//! its own parser instead of reusing `semver::Version`.
//!
//! `semver` is still the right tool for this crate's *file format* versions
//! (repository marker, index spec version); those are fixed three-segment
//! constants under our control.
//!
//! Parsing is strict so that parse/display is bijective: empty segments,
//! non-digits and leading zeros are rejected. That makes the displayed form
//! canonical and lets the index treat the version string as an identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing a package version string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The version string was empty.
    #[error("version string is empty")]
    Empty,

    /// A segment was empty or contained non-digit characters.
    #[error("invalid version segment '{0}': segments are decimal integers")]
    InvalidSegment(String),

    /// A multi-digit segment started with zero (`01` is not canonical).
    #[error("version segment '{0}' has a leading zero")]
    LeadingZero(String),

    /// A segment did not fit in 64 bits.
    #[error("version segment '{0}' is too large")]
    Overflow(String),
}

/// A dotted numeric package release version.
///
/// # Ordering
///
/// Versions compare segment-wise with missing segments treated as zero, so
/// `1.0 < 1.0.1 < 1.1`. When all padded segments are equal the shorter
/// version orders first (`1 < 1.0`), which keeps the ordering total while
/// preserving the distinction between the two spellings.
///
/// # Example
///
/// ```
/// use sonic_pkg::descriptor::PackageVersion;
///
/// let old = PackageVersion::parse("1.0").unwrap();
/// let new = PackageVersion::parse("1.0.1").unwrap();
///
/// assert!(old < new);
/// assert_eq!(old.to_string(), "1.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageVersion {
    segments: Vec<u64>,
}

impl PackageVersion {
    /// Parse a version string.
    ///
    /// # Errors
    ///
    /// Returns a [`VersionError`] if the string is empty, a segment is empty
    /// or non-numeric, a segment has a leading zero, or a segment overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use sonic_pkg::descriptor::PackageVersion;
    ///
    /// assert!(PackageVersion::parse("1.0").is_ok());
    /// assert!(PackageVersion::parse("2.10.3").is_ok());
    /// assert!(PackageVersion::parse("1.").is_err());
    /// assert!(PackageVersion::parse("1.0rc1").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        if input.is_empty() {
            return Err(VersionError::Empty);
        }

        let mut segments = Vec::new();
        for raw in input.split('.') {
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionError::InvalidSegment(raw.to_string()));
            }
            if raw.len() > 1 && raw.starts_with('0') {
                return Err(VersionError::LeadingZero(raw.to_string()));
            }
            let value = raw
                .parse::<u64>()
                .map_err(|_| VersionError::Overflow(raw.to_string()))?;
            segments.push(value);
        }

        Ok(Self { segments })
    }

    /// The numeric segments of the version, most significant first.
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// The leading (major) segment.
    pub fn major(&self) -> u64 {
        self.segments[0]
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for PackageVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for PackageVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let a = self.segments.get(i).copied().unwrap_or(0);
            let b = other.segments.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                std::cmp::Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        self.segments.len().cmp(&other.segments.len())
    }
}

impl PartialOrd for PackageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<String> for PackageVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PackageVersion> for String {
    fn from(version: PackageVersion) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(s: &str) -> PackageVersion {
        PackageVersion::parse(s).unwrap()
    }

    #[test]
    fn test_parse_single_segment() {
        assert_eq!(v("1").segments(), &[1]);
        assert_eq!(v("0").segments(), &[0]);
    }

    #[test]
    fn test_parse_original_descriptor_version() {
        // The sonic-chassisd descriptor ships version "1.0".
        let version = v("1.0");
        assert_eq!(version.segments(), &[1, 0]);
        assert_eq!(version.to_string(), "1.0");
        assert_eq!(version.major(), 1);
    }

    #[test]
    fn test_parse_three_segments() {
        assert_eq!(v("2.10.3").segments(), &[2, 10, 3]);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(PackageVersion::parse(""), Err(VersionError::Empty));
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(matches!(
            PackageVersion::parse("1."),
            Err(VersionError::InvalidSegment(_))
        ));
        assert!(matches!(
            PackageVersion::parse(".1"),
            Err(VersionError::InvalidSegment(_))
        ));
        assert!(matches!(
            PackageVersion::parse("1..2"),
            Err(VersionError::InvalidSegment(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(PackageVersion::parse("v1.0").is_err());
        assert!(PackageVersion::parse("1.0rc1").is_err());
        assert!(PackageVersion::parse("1.0-beta").is_err());
        assert!(PackageVersion::parse("1. 0").is_err());
    }

    #[test]
    fn test_parse_rejects_leading_zero() {
        assert_eq!(
            PackageVersion::parse("01"),
            Err(VersionError::LeadingZero("01".to_string()))
        );
        assert_eq!(
            PackageVersion::parse("1.00"),
            Err(VersionError::LeadingZero("00".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_overflow() {
        // One digit past u64::MAX.
        assert!(matches!(
            PackageVersion::parse("184467440737095516160"),
            Err(VersionError::Overflow(_))
        ));
    }

    #[test]
    fn test_display_round_trip() {
        for input in ["1", "1.0", "1.0.3", "0.9", "10.20.30.40"] {
            assert_eq!(v(input).to_string(), input);
        }
    }

    #[test]
    fn test_ordering() {
        assert!(v("1.0") < v("1.0.1"));
        assert!(v("1.0.1") < v("1.1"));
        assert!(v("1.9") < v("1.10"));
        assert!(v("1") < v("2"));
        assert!(v("2.0") > v("1.999.999"));
    }

    #[test]
    fn test_ordering_padded_tie_breaks_on_length() {
        assert!(v("1") < v("1.0"));
        assert!(v("1.0") < v("1.0.0"));
        assert_ne!(v("1.0"), v("1.0.0"));
    }

    #[test]
    fn test_ordering_is_consistent_with_equality() {
        assert_eq!(v("1.0").cmp(&v("1.0")), std::cmp::Ordering::Equal);
        assert_eq!(v("1.0"), v("1.0"));
    }

    #[test]
    fn test_from_str() {
        let version: PackageVersion = "1.0".parse().unwrap();
        assert_eq!(version, v("1.0"));
    }

    #[test]
    fn test_serde_as_string() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Holder {
            version: PackageVersion,
        }

        let holder = Holder { version: v("1.0") };
        let encoded = toml::to_string(&holder).unwrap();
        assert!(encoded.contains("version = \"1.0\""));

        let decoded: Holder = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.version, v("1.0"));
    }

    #[test]
    fn test_serde_rejects_malformed() {
        #[derive(serde::Deserialize)]
        #[allow(dead_code)]
        struct Holder {
            version: PackageVersion,
        }

        let result: Result<Holder, _> = toml::from_str("version = \"not-a-version\"");
        assert!(result.is_err());
    }

    proptest! {
        /// Parse and display are inverse for any canonical dotted version.
        #[test]
        fn prop_parse_display_round_trip(segments in proptest::collection::vec(0u64..10_000, 1..5)) {
            let input = segments
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(".");

            let version = PackageVersion::parse(&input).unwrap();
            prop_assert_eq!(version.segments(), segments.as_slice());
            prop_assert_eq!(version.to_string(), input);
        }
    }
}
