use std::sync::Arc;

use serde_json::{Map, Value};

use crate::downloader::ChecksumType;
use crate::error::Result;
use crate::package::PackageMetadata;
use crate::types::json_type_name;

use super::{Filter, FilterContext};

/// Validates the optional `checksum` key.
///
/// When present it must be a hex digest whose length identifies one of the
/// supported algorithms; the downloaded artifact is verified against it
/// before installation.
pub struct ChecksumFilter {
    ctx: FilterContext,
}

impl ChecksumFilter {
    pub fn new(name: impl Into<String>, package: Arc<dyn PackageMetadata>) -> Self {
        Self {
            ctx: FilterContext::new(name, package),
        }
    }
}

impl Filter for ChecksumFilter {
    type Output = Option<String>;

    fn filter(&self, entry: &Map<String, Value>) -> Result<Option<String>> {
        let value = match entry.get("checksum") {
            Some(value) => value,
            None => return Ok(None),
        };
        let raw = value
            .as_str()
            .ok_or_else(|| self.ctx.unexpected("checksum", "string", json_type_name(value)))?;

        let is_hex = raw.chars().all(|c| c.is_ascii_hexdigit());
        if !is_hex || ChecksumType::from_hex_length(raw.len()).is_none() {
            return Err(self
                .ctx
                .unexpected("checksum", "an md5, sha1 or sha256 hex digest", raw));
        }

        Ok(Some(raw.to_ascii_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::HostPackage;
    use serde_json::json;

    fn filter() -> ChecksumFilter {
        let package = Arc::new(HostPackage::new("vendor/app", json!({})));
        ChecksumFilter::new("assets", package)
    }

    fn entry(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    const SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_absent_checksum() {
        assert_eq!(filter().filter(&entry(json!({}))).unwrap(), None);
    }

    #[test]
    fn test_valid_checksum() {
        let checksum = filter()
            .filter(&entry(json!({"checksum": SHA256.to_uppercase()})))
            .unwrap();
        assert_eq!(checksum.as_deref(), Some(SHA256));
    }

    #[test]
    fn test_non_string_checksum() {
        let err = filter().filter(&entry(json!({"checksum": 1}))).unwrap_err();
        assert!(err.to_string().contains("checksum must be string, \"int\" given"));
    }

    #[test]
    fn test_unrecognized_digest() {
        let err = filter()
            .filter(&entry(json!({"checksum": "abc123"})))
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("checksum must be an md5, sha1 or sha256 hex digest"));
    }
}
