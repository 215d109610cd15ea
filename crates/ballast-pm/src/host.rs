//! Handle to the embedding package manager.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::http::HttpClient;
use crate::package::PackageMetadata;

/// The slice of the host's installation machinery this crate consumes.
pub trait InstallationManager: Send + Sync {
    /// Absolute install directory of a (non-root) package.
    fn install_path(&self, package: &dyn PackageMetadata) -> PathBuf;

    /// Make sure the package's binaries are linked/present before extra
    /// files are placed next to them.
    fn ensure_binaries_presence(&self, package: &dyn PackageMetadata) -> crate::error::Result<()>;
}

/// The context handed to the installers: where the root project lives, how
/// install paths resolve, and which HTTP client to fetch with.
pub struct Host {
    pub working_dir: PathBuf,
    pub installation_manager: Arc<dyn InstallationManager>,
    pub http_client: Arc<HttpClient>,
}

impl Host {
    pub fn builder(working_dir: PathBuf) -> HostBuilder {
        HostBuilder::new(working_dir)
    }
}

/// Builder for [`Host`] instances.
pub struct HostBuilder {
    working_dir: PathBuf,
    installation_manager: Option<Arc<dyn InstallationManager>>,
    http_client: Option<Arc<HttpClient>>,
}

impl HostBuilder {
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            installation_manager: None,
            http_client: None,
        }
    }

    pub fn with_installation_manager(mut self, manager: Arc<dyn InstallationManager>) -> Self {
        self.installation_manager = Some(manager);
        self
    }

    pub fn with_http_client(mut self, http_client: Arc<HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn build(mut self) -> Result<Host> {
        let installation_manager = self
            .installation_manager
            .take()
            .ok_or_else(|| anyhow::anyhow!("an installation manager is required"))?;

        let http_client = match self.http_client.take() {
            Some(client) => client,
            None => Arc::new(HttpClient::new().context("Failed to create HTTP client")?),
        };

        Ok(Host {
            working_dir: self.working_dir,
            installation_manager,
            http_client,
        })
    }
}
