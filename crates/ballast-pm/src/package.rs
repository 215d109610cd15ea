//! The slice of the host's package model this crate consumes.
//!
//! The embedding package manager owns the real package objects; all the
//! installer needs from one is its display name, its free-form `extra`
//! metadata and whether it is the root package.

use serde_json::Value;

/// Narrow view of a host package.
pub trait PackageMetadata: Send + Sync {
    /// Human-readable package name, e.g. `vendor/app`. Error messages use
    /// this; it must never be an internal identifier.
    fn name(&self) -> String;

    /// The package's `extra` metadata as free-form JSON. Packages without
    /// an `extra` section return an empty object.
    fn extra(&self) -> Value;

    /// Whether this is the root package (the top-level project), as
    /// opposed to an installed dependency.
    fn is_root(&self) -> bool {
        false
    }
}

/// Plain implementation of [`PackageMetadata`] for embedders that do not
/// have their own package model, and for tests.
#[derive(Debug, Clone)]
pub struct HostPackage {
    name: String,
    extra: Value,
    root: bool,
}

impl HostPackage {
    pub fn new(name: impl Into<String>, extra: Value) -> Self {
        Self {
            name: name.into(),
            extra,
            root: false,
        }
    }

    /// Mark this package as the root package.
    pub fn as_root(mut self) -> Self {
        self.root = true;
        self
    }
}

impl PackageMetadata for HostPackage {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn extra(&self) -> Value {
        self.extra.clone()
    }

    fn is_root(&self) -> bool {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_host_package_defaults() {
        let package = HostPackage::new("vendor/app", json!({}));
        assert_eq!(package.name(), "vendor/app");
        assert!(!package.is_root());
    }

    #[test]
    fn test_host_package_root() {
        let package = HostPackage::new("vendor/app", json!({})).as_root();
        assert!(package.is_root());
    }

    #[test]
    fn test_host_package_extra() {
        let package = HostPackage::new(
            "vendor/app",
            json!({"downloads": {"assets": {"url": "https://example.com/a.zip"}}}),
        );
        assert!(package.extra().get("downloads").is_some());
    }
}
