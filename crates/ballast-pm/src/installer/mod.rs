//! Installation of resolved subpackages.
//!
//! [`PackageInstaller`] drives the whole per-package cycle;
//! [`DownloadInstaller`] performs the actual download/extract work for one
//! subpackage and keeps the tracking state that makes the cycle idempotent.

mod package_installer;
mod subpackage_installer;

pub use package_installer::PackageInstaller;
pub use subpackage_installer::{DownloadInstaller, SubpackageInstaller};
