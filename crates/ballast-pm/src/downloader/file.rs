//! Source fetching: remote URLs and local file copies.

use std::path::Path;
use std::sync::Arc;

use crate::error::{BallastError, Result};
use crate::http::HttpClient;
use crate::subpackage::DownloadSource;

/// Fetches a download source to a local destination.
///
/// Remote URLs stream through the shared [`HttpClient`]; `file` sources are
/// plain filesystem copies, resolved against the host's working directory
/// when relative.
pub struct FileDownloader {
    http_client: Arc<HttpClient>,
}

impl FileDownloader {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }

    pub async fn fetch<F>(
        &self,
        source: &DownloadSource,
        base_dir: &Path,
        dest: &Path,
        progress: Option<F>,
    ) -> Result<()>
    where
        F: Fn(u64, u64),
    {
        match source {
            DownloadSource::Url(url) => self
                .http_client
                .download(url, dest, progress)
                .await
                .map_err(|e| BallastError::DownloadFailed {
                    name: url.clone(),
                    reason: e.to_string(),
                }),
            DownloadSource::Path(path) => {
                let resolved = if Path::new(path).is_absolute() {
                    Path::new(path).to_path_buf()
                } else {
                    base_dir.join(path)
                };
                if let Some(parent) = dest.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::copy(&resolved, dest).await.map_err(|e| {
                    BallastError::DownloadFailed {
                        name: path.clone(),
                        reason: e.to_string(),
                    }
                })?;
                Ok(())
            }
        }
    }
}
