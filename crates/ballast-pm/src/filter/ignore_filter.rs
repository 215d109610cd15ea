use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::package::PackageMetadata;
use crate::types::json_type_name;

use super::{parent_or, Filter, FilterContext, TypeFilter};

/// Validates the ignore-glob rules of an entry.
///
/// Ignore rules only make sense for archive entries: for plain files the
/// result is always empty, whatever the configuration says. Archive entries
/// without rules of their own fall back to the parent filter, which lets a
/// default ignore set propagate from upstream configuration layers.
pub struct IgnoreFilter {
    ctx: FilterContext,
    type_filter: TypeFilter,
    parent: Option<Box<dyn Filter<Output = Vec<String>> + Send + Sync>>,
}

impl IgnoreFilter {
    pub fn new(
        name: impl Into<String>,
        package: Arc<dyn PackageMetadata>,
        type_filter: TypeFilter,
    ) -> Self {
        Self {
            ctx: FilterContext::new(name, package),
            type_filter,
            parent: None,
        }
    }

    /// Chain a fallback filter consulted when the entry declares no ignore
    /// rules of its own.
    pub fn with_parent(
        mut self,
        parent: Box<dyn Filter<Output = Vec<String>> + Send + Sync>,
    ) -> Self {
        self.parent = Some(parent);
        self
    }
}

impl Filter for IgnoreFilter {
    type Output = Vec<String>;

    fn filter(&self, entry: &Map<String, Value>) -> Result<Vec<String>> {
        let resolved = self.type_filter.filter(entry)?;
        if !resolved.is_archive() {
            return Ok(Vec::new());
        }

        match entry.get("ignore") {
            None => parent_or(self.parent.as_deref(), entry, Vec::new),
            Some(Value::Array(rules)) if rules.is_empty() => {
                parent_or(self.parent.as_deref(), entry, Vec::new)
            }
            Some(Value::Array(rules)) => rules
                .iter()
                .map(|rule| {
                    rule.as_str().map(str::to_string).ok_or_else(|| {
                        self.ctx
                            .unexpected("ignore", "array of strings", json_type_name(rule))
                    })
                })
                .collect(),
            Some(other) => Err(self
                .ctx
                .unexpected("ignore", "array", json_type_name(other))),
        }
    }
}
