use std::path::{Component, Path};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::package::PackageMetadata;
use crate::types::json_type_name;

use super::{Filter, FilterContext};

/// Validates the destination path.
///
/// The target must stay inside the package's install directory: relative,
/// and free of `..` components.
pub struct TargetFilter {
    ctx: FilterContext,
}

impl TargetFilter {
    pub fn new(name: impl Into<String>, package: Arc<dyn PackageMetadata>) -> Self {
        Self {
            ctx: FilterContext::new(name, package),
        }
    }
}

impl Filter for TargetFilter {
    type Output = String;

    fn filter(&self, entry: &Map<String, Value>) -> Result<String> {
        let value = match entry.get("target") {
            Some(value) => value,
            None => return Err(self.ctx.unexpected("target", "string", "null")),
        };
        let raw = value
            .as_str()
            .ok_or_else(|| self.ctx.unexpected("target", "string", json_type_name(value)))?;

        if raw.is_empty() {
            return Err(self.ctx.unexpected("target", "a non-empty string", ""));
        }

        let path = Path::new(raw);
        if path.is_absolute() {
            return Err(self.ctx.unexpected("target", "a relative path", raw));
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(self
                .ctx
                .unexpected("target", "a path inside the package", raw));
        }

        Ok(raw.to_string())
    }
}
