use std::sync::Arc;

use serde_json::{Map, Value};
use url::Url;

use crate::error::Result;
use crate::package::PackageMetadata;
use crate::subpackage::DownloadSource;
use crate::types::json_type_name;

use super::{Filter, FilterContext};

/// Validates the source reference: a remote `url` or a local `file` path.
pub struct UrlFilter {
    ctx: FilterContext,
}

impl UrlFilter {
    pub fn new(name: impl Into<String>, package: Arc<dyn PackageMetadata>) -> Self {
        Self {
            ctx: FilterContext::new(name, package),
        }
    }

    fn string_value<'a>(&self, field: &str, value: &'a Value) -> Result<&'a str> {
        let raw = value
            .as_str()
            .ok_or_else(|| self.ctx.unexpected(field, "string", json_type_name(value)))?;
        if raw.is_empty() {
            return Err(self.ctx.unexpected(field, "a non-empty string", ""));
        }
        Ok(raw)
    }
}

impl Filter for UrlFilter {
    type Output = DownloadSource;

    fn filter(&self, entry: &Map<String, Value>) -> Result<DownloadSource> {
        if let Some(value) = entry.get("url") {
            let raw = self.string_value("url", value)?;
            let parsed = Url::parse(raw)
                .ok()
                .filter(|url| matches!(url.scheme(), "http" | "https"));
            if parsed.is_none() {
                return Err(self.ctx.unexpected("url", "an http(s) URL", raw));
            }
            return Ok(DownloadSource::Url(raw.to_string()));
        }

        if let Some(value) = entry.get("file") {
            let raw = self.string_value("file", value)?;
            return Ok(DownloadSource::Path(raw.to_string()));
        }

        Err(self.ctx.unexpected("url", "string", "null"))
    }
}
