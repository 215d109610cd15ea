use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::downloader::{verify_checksum, FileDownloader, IgnoreSet, ZipExtractor};
use crate::error::{BallastError, Result};
use crate::host::Host;
use crate::io::OutputSink;
use crate::subpackage::{DownloadSource, Subpackage};
use crate::types::SubpackageType;

/// Installs one subpackage and answers whether it already is installed.
#[async_trait]
pub trait SubpackageInstaller: Send + Sync {
    /// Idempotency check against the tracking state. Never mutates
    /// anything; safe to call repeatedly.
    fn is_installed(&self, subpackage: &Subpackage, io: &dyn OutputSink) -> Result<bool>;

    /// Download and place the subpackage, then record the tracking marker.
    /// Re-running on an installed target re-verifies; it never corrupts
    /// state.
    async fn install(
        &self,
        subpackage: &Subpackage,
        host: &Host,
        io: &dyn OutputSink,
    ) -> Result<()>;
}

/// Tracking state written next to the install base after a successful
/// install. The digest covers the whole descriptor, so any config change
/// (url, target, ignore rules, checksum) triggers a re-install.
#[derive(Debug, Serialize, Deserialize)]
struct TrackingMarker {
    name: String,
    source: String,
    digest: String,
    installed_at: DateTime<Utc>,
}

const TRACKING_DIR: &str = ".extra-downloads";

/// The real installer: fetches by type and maintains tracking markers.
#[derive(Default)]
pub struct DownloadInstaller;

impl DownloadInstaller {
    pub fn new() -> Self {
        Self
    }

    fn marker_path(subpackage: &Subpackage) -> PathBuf {
        let file = format!("{}.json", urlencoding::encode(subpackage.name()));
        subpackage.base_path().join(TRACKING_DIR).join(file)
    }

    fn read_marker(subpackage: &Subpackage) -> Option<TrackingMarker> {
        let path = Self::marker_path(subpackage);
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(marker) => Some(marker),
            Err(e) => {
                log::warn!("Discarding unreadable marker {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write_marker(subpackage: &Subpackage) -> Result<()> {
        let path = Self::marker_path(subpackage);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let marker = TrackingMarker {
            name: subpackage.name().to_string(),
            source: subpackage.source().as_str().to_string(),
            digest: subpackage.descriptor_digest(),
            installed_at: Utc::now(),
        };
        std::fs::write(&path, serde_json::to_string_pretty(&marker)?)?;
        Ok(())
    }

    async fn fetch(
        &self,
        subpackage: &Subpackage,
        host: &Host,
        dest: &std::path::Path,
    ) -> Result<()> {
        let downloader = FileDownloader::new(host.http_client.clone());

        match subpackage.source() {
            DownloadSource::Url(_) => {
                let bar = ProgressBar::new(0);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("#>-"),
                );
                let progress = {
                    let bar = bar.clone();
                    move |downloaded: u64, total: u64| {
                        if total > 0 {
                            bar.set_length(total);
                        }
                        bar.set_position(downloaded);
                    }
                };
                let result = downloader
                    .fetch(subpackage.source(), &host.working_dir, dest, Some(progress))
                    .await;
                bar.finish_and_clear();
                result
            }
            DownloadSource::Path(_) => {
                downloader
                    .fetch(
                        subpackage.source(),
                        &host.working_dir,
                        dest,
                        None::<fn(u64, u64)>,
                    )
                    .await
            }
        }
    }
}

#[async_trait]
impl SubpackageInstaller for DownloadInstaller {
    fn is_installed(&self, subpackage: &Subpackage, io: &dyn OutputSink) -> Result<bool> {
        let marker = match Self::read_marker(subpackage) {
            Some(marker) => marker,
            None => return Ok(false),
        };

        if marker.digest != subpackage.descriptor_digest() {
            log::debug!(
                "Extra download {} changed since {}, reinstalling",
                subpackage.name(),
                marker.installed_at
            );
            return Ok(false);
        }

        if !subpackage.target_path().exists() {
            return Ok(false);
        }

        io.write_verbose(&format!(
            "  - Skipping {}: already installed",
            subpackage.name()
        ));
        Ok(true)
    }

    async fn install(
        &self,
        subpackage: &Subpackage,
        host: &Host,
        io: &dyn OutputSink,
    ) -> Result<()> {
        io.write(&format!(
            "  - Downloading {} ({})",
            subpackage.name(),
            subpackage.source()
        ));

        let temp_dir = tempfile::tempdir()?;
        let artifact = temp_dir.path().join("download");
        self.fetch(subpackage, host, &artifact).await?;

        if let Some(expected) = subpackage.checksum() {
            if !verify_checksum(&artifact, expected).await? {
                return Err(BallastError::ChecksumMismatch {
                    name: subpackage.name().to_string(),
                });
            }
        }

        let target = subpackage.target_path();
        match subpackage.subpackage_type() {
            SubpackageType::File => {
                if let Some(parent) = target.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::copy(&artifact, &target).await?;
            }
            SubpackageType::Zip => {
                // A differing descriptor got us here; drop whatever the
                // previous configuration extracted.
                if target.is_dir() {
                    tokio::fs::remove_dir_all(&target).await?;
                }
                let ignore = IgnoreSet::from_rules(subpackage.ignore())?;
                ZipExtractor::extract(&artifact, &target, &ignore)?;
            }
            SubpackageType::Invalid => {
                return Err(BallastError::InstallationFailed(format!(
                    "Cannot install extra download \"{}\" of unresolved type",
                    subpackage.name()
                )));
            }
        }

        Self::write_marker(subpackage)?;
        log::debug!("Installed extra download {}", subpackage.name());
        Ok(())
    }
}
