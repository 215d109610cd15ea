//! The resolved download unit produced by the factory.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sha1::{Digest, Sha1};

use crate::types::SubpackageType;

/// Where a subpackage's payload comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DownloadSource {
    /// Remote http(s) URL, fetched through the host's HTTP client.
    #[serde(rename = "url")]
    Url(String),
    /// Local filesystem path, copied instead of fetched.
    #[serde(rename = "file")]
    Path(String),
}

impl DownloadSource {
    pub fn as_str(&self) -> &str {
        match self {
            DownloadSource::Url(url) => url,
            DownloadSource::Path(path) => path,
        }
    }
}

impl std::fmt::Display for DownloadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated extra download of a package.
///
/// Constructed by the factory after the entry cleared the filter chain;
/// immutable from then on. `package_name` is the owning package's display
/// name, kept for messages and errors.
#[derive(Debug, Clone, Serialize)]
pub struct Subpackage {
    name: String,
    package_name: String,
    #[serde(rename = "type")]
    subpackage_type_tag: String,
    #[serde(skip)]
    subpackage_type: SubpackageType,
    source: DownloadSource,
    target: String,
    #[serde(skip)]
    base_path: PathBuf,
    ignore: Vec<String>,
    checksum: Option<String>,
}

impl Subpackage {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        package_name: impl Into<String>,
        subpackage_type: SubpackageType,
        source: DownloadSource,
        base_path: impl Into<PathBuf>,
        target: impl Into<String>,
        ignore: Vec<String>,
        checksum: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            package_name: package_name.into(),
            subpackage_type_tag: subpackage_type.as_str().to_string(),
            subpackage_type,
            source,
            target: target.into(),
            base_path: base_path.into(),
            ignore,
            checksum,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn subpackage_type(&self) -> SubpackageType {
        self.subpackage_type
    }

    pub fn source(&self) -> &DownloadSource {
        &self.source
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Absolute destination: the install base joined with the validated
    /// relative target.
    pub fn target_path(&self) -> PathBuf {
        self.base_path.join(&self.target)
    }

    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// Digest over every descriptor field that affects the installed
    /// outcome. The tracking marker records it; a mismatch on a later run
    /// means the configuration changed and the subpackage needs a
    /// re-install.
    pub fn descriptor_digest(&self) -> String {
        let descriptor = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha1::new();
        hasher.update(descriptor.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subpackage(url: &str, ignore: Vec<String>) -> Subpackage {
        Subpackage::new(
            "assets",
            "vendor/app",
            SubpackageType::Zip,
            DownloadSource::Url(url.to_string()),
            "/srv/app",
            "public/assets",
            ignore,
            None,
        )
    }

    #[test]
    fn test_target_path_is_anchored() {
        let sp = subpackage("https://example.com/a.zip", vec![]);
        assert_eq!(sp.target_path(), PathBuf::from("/srv/app/public/assets"));
    }

    #[test]
    fn test_digest_is_stable() {
        let a = subpackage("https://example.com/a.zip", vec![]);
        let b = subpackage("https://example.com/a.zip", vec![]);
        assert_eq!(a.descriptor_digest(), b.descriptor_digest());
    }

    #[test]
    fn test_digest_tracks_descriptor_changes() {
        let a = subpackage("https://example.com/a.zip", vec![]);
        let b = subpackage("https://example.com/b.zip", vec![]);
        let c = subpackage("https://example.com/a.zip", vec!["dir/*".to_string()]);
        assert_ne!(a.descriptor_digest(), b.descriptor_digest());
        assert_ne!(a.descriptor_digest(), c.descriptor_digest());
    }
}
