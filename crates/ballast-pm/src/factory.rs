//! Builds subpackages from a package's `extra.downloads` configuration.

use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{BallastError, Result};
use crate::filter::{
    ChecksumFilter, Filter, IgnoreFilter, TargetFilter, TypeFilter, UrlFilter,
};
use crate::package::PackageMetadata;
use crate::subpackage::Subpackage;
use crate::types::json_type_name;

/// Turns a package's raw downloads config into validated [`Subpackage`]s.
pub trait SubpackageFactory: Send + Sync {
    /// Resolve every configured download of `package`, anchored at
    /// `base_path`. An absent or empty config yields an empty vector; any
    /// validation failure aborts the whole batch.
    fn create(
        &self,
        package: Arc<dyn PackageMetadata>,
        base_path: &Path,
    ) -> Result<Vec<Subpackage>>;
}

/// The real factory: runs each entry of `extra.downloads` through the
/// filter chain, in configuration order.
#[derive(Default)]
pub struct DownloadsFactory {
    default_ignore: Vec<String>,
}

impl DownloadsFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore rules applied to archive entries that declare none of their
    /// own; this is the upstream layer the ignore filter falls back to.
    pub fn with_default_ignore(mut self, rules: Vec<String>) -> Self {
        self.default_ignore = rules;
        self
    }

    fn create_subpackage(
        &self,
        name: &str,
        entry: &Map<String, Value>,
        package: &Arc<dyn PackageMetadata>,
        base_path: &Path,
    ) -> Result<Subpackage> {
        let source = UrlFilter::new(name, package.clone()).filter(entry)?;
        let target = TargetFilter::new(name, package.clone()).filter(entry)?;
        let checksum = ChecksumFilter::new(name, package.clone()).filter(entry)?;
        let subpackage_type = TypeFilter::new(name, package.clone()).filter(entry)?;

        let mut ignore_filter = IgnoreFilter::new(
            name,
            package.clone(),
            TypeFilter::new(name, package.clone()),
        );
        if !self.default_ignore.is_empty() {
            ignore_filter =
                ignore_filter.with_parent(Box::new(DefaultIgnore(self.default_ignore.clone())));
        }
        let ignore = ignore_filter.filter(entry)?;

        // Malformed globs must fail here, before any side effect.
        for rule in &ignore {
            let pattern = rule.strip_prefix('!').unwrap_or(rule);
            if glob::Pattern::new(pattern).is_err() {
                return Err(BallastError::UnexpectedValue {
                    package: package.name(),
                    field: "ignore".to_string(),
                    expected: "an array of valid glob patterns".to_string(),
                    actual: rule.clone(),
                });
            }
        }

        Ok(Subpackage::new(
            name,
            package.name(),
            subpackage_type,
            source,
            base_path,
            target,
            ignore,
            checksum,
        ))
    }
}

impl SubpackageFactory for DownloadsFactory {
    fn create(
        &self,
        package: Arc<dyn PackageMetadata>,
        base_path: &Path,
    ) -> Result<Vec<Subpackage>> {
        let extra = package.extra();
        let downloads = match extra.get("downloads") {
            Some(downloads) => downloads,
            None => return Ok(Vec::new()),
        };

        let entries = downloads.as_object().ok_or_else(|| {
            BallastError::UnexpectedValue {
                package: package.name(),
                field: "downloads".to_string(),
                expected: "object".to_string(),
                actual: json_type_name(downloads).to_string(),
            }
        })?;

        let mut subpackages = Vec::with_capacity(entries.len());
        for (name, raw) in entries {
            let entry = raw.as_object().ok_or_else(|| {
                BallastError::UnexpectedValue {
                    package: package.name(),
                    field: format!("downloads.{}", name),
                    expected: "object".to_string(),
                    actual: json_type_name(raw).to_string(),
                }
            })?;
            subpackages.push(self.create_subpackage(name, entry, &package, base_path)?);
        }

        log::debug!(
            "Resolved {} extra download(s) for {}",
            subpackages.len(),
            package.name()
        );
        Ok(subpackages)
    }
}

/// Parent filter feeding the factory's default ignore set into the chain.
struct DefaultIgnore(Vec<String>);

impl Filter for DefaultIgnore {
    type Output = Vec<String>;

    fn filter(&self, _entry: &Map<String, Value>) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}
