//! Centralized package naming conventions.
//!
//! This module is the single source of truth for all sonic-pkg naming:
//! - Package names (e.g., `sonic-chassisd`)
//! - Artifact filenames (e.g., `sonic-chassisd-1.0.tar.gz`)
//! - Installed script names (e.g., `chassisd` from `scripts/chassisd`)
//!
//! All other modules should use these functions rather than constructing
//! names directly. This keeps the publisher and manager components agreed
//! on what an artifact or installed script is called.

use super::PackageVersion;

/// Check whether a string is a valid package name.
///
/// Names are restricted to ASCII alphanumerics plus `-`, `_` and `.`, and
/// must start with an alphanumeric character. Artifact filenames embed the
/// name directly, so anything with path separators or shell metacharacters
/// is rejected here once instead of being escaped everywhere.
///
/// # Examples
///
/// ```
/// use sonic_pkg::descriptor::is_valid_package_name;
///
/// assert!(is_valid_package_name("sonic-chassisd"));
/// assert!(is_valid_package_name("sonic_pcied"));
/// assert!(!is_valid_package_name(""));
/// assert!(!is_valid_package_name("-leading-dash"));
/// assert!(!is_valid_package_name("has space"));
/// ```
pub fn is_valid_package_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

/// Generate the artifact filename for a package release.
///
/// This is the filename used for the distributable archive in a repository's
/// `dist/` directory and referenced by the package index.
///
/// # Format
///
/// `{name}-{version}.tar.gz`
///
/// # Examples
///
/// ```
/// use sonic_pkg::descriptor::{artifact_filename, PackageVersion};
///
/// let version = PackageVersion::parse("1.0").unwrap();
/// assert_eq!(artifact_filename("sonic-chassisd", &version), "sonic-chassisd-1.0.tar.gz");
/// ```
pub fn artifact_filename(name: &str, version: &PackageVersion) -> String {
    format!("{}-{}.tar.gz", name, version)
}

/// Derive the installed name of a declared script.
///
/// Scripts are declared as source-relative paths in the descriptor; the
/// installed name on the search path is the final path component.
///
/// # Examples
///
/// ```
/// use sonic_pkg::descriptor::script_install_name;
///
/// assert_eq!(script_install_name("scripts/chassisd"), "chassisd");
/// assert_eq!(script_install_name("chassisd"), "chassisd");
/// ```
pub fn script_install_name(script_path: &str) -> &str {
    match script_path.rsplit_once('/') {
        Some((_, name)) => name,
        None => script_path,
    }
}

/// Check whether a declared script path is acceptable.
///
/// Script paths must be relative, must not traverse upward and must end in
/// a non-empty file name. The build step resolves them against the package
/// source directory and the installer trusts the resulting install name, so
/// both hinge on this check.
///
/// # Examples
///
/// ```
/// use sonic_pkg::descriptor::is_valid_script_path;
///
/// assert!(is_valid_script_path("scripts/chassisd"));
/// assert!(!is_valid_script_path("/usr/bin/chassisd"));
/// assert!(!is_valid_script_path("../escape"));
/// assert!(!is_valid_script_path("scripts/"));
/// ```
pub fn is_valid_script_path(script_path: &str) -> bool {
    if script_path.is_empty() || script_path.starts_with('/') {
        return false;
    }
    script_path
        .split('/')
        .all(|component| !component.is_empty() && component != "." && component != "..")
}
