use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::factory::{DownloadsFactory, SubpackageFactory};
use crate::host::Host;
use crate::io::OutputSink;
use crate::package::PackageMetadata;

use super::{DownloadInstaller, SubpackageInstaller};

/// Drives the extra-downloads cycle for one package.
///
/// Packages without a downloads config are a strict no-op. Validation
/// failures abort before any output or filesystem side effect; install
/// failures abort the remaining subpackages of the package.
pub struct PackageInstaller {
    factory: Arc<dyn SubpackageFactory>,
    subpackage_installer: Arc<dyn SubpackageInstaller>,
}

impl PackageInstaller {
    pub fn new() -> Self {
        Self::with_components(
            Arc::new(DownloadsFactory::new()),
            Arc::new(DownloadInstaller::new()),
        )
    }

    /// Substitute factory and installer, e.g. with in-memory fakes.
    pub fn with_components(
        factory: Arc<dyn SubpackageFactory>,
        subpackage_installer: Arc<dyn SubpackageInstaller>,
    ) -> Self {
        Self {
            factory,
            subpackage_installer,
        }
    }

    pub async fn install(
        &self,
        package: Arc<dyn PackageMetadata>,
        host: &Host,
        io: &dyn OutputSink,
    ) -> Result<()> {
        let extra = package.extra();
        if !has_downloads(&extra) {
            return Ok(());
        }

        let base_path = if package.is_root() {
            host.working_dir.clone()
        } else {
            let manager = &host.installation_manager;
            let path = manager.install_path(package.as_ref());
            manager.ensure_binaries_presence(package.as_ref())?;
            path
        };

        let subpackages = self.factory.create(package.clone(), &base_path)?;
        if subpackages.is_empty() {
            return Ok(());
        }

        io.write(&format!("Download extra files for {}", package.name()));

        for subpackage in &subpackages {
            if self.subpackage_installer.is_installed(subpackage, io)? {
                log::debug!("Extra download {} is up to date", subpackage.name());
                continue;
            }
            self.subpackage_installer.install(subpackage, host, io).await?;
        }

        Ok(())
    }
}

impl Default for PackageInstaller {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the `extra` metadata declares at least one download.
fn has_downloads(extra: &Value) -> bool {
    match extra.get("downloads") {
        None => false,
        Some(Value::Object(entries)) => !entries.is_empty(),
        Some(Value::Array(entries)) => !entries.is_empty(),
        // Malformed values are the factory's to reject.
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_downloads() {
        assert!(!has_downloads(&json!({})));
        assert!(!has_downloads(&json!({"key": "value"})));
        assert!(!has_downloads(&json!({"downloads": {}})));
        assert!(!has_downloads(&json!({"downloads": []})));
        assert!(has_downloads(&json!({"downloads": {"a": {}}})));
        assert!(has_downloads(&json!({"downloads": "malformed"})));
    }
}
