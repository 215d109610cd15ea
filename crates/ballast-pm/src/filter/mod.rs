//! Validation filters for raw download entries.
//!
//! Each filter owns one concern (type, source, target, checksum, ignore
//! rules) and turns its slice of a raw entry into a validated fragment, or
//! fails with [`BallastError::UnexpectedValue`]. Filters are pure: no I/O,
//! no mutation of the entry. The factory composes them; `IgnoreFilter`
//! additionally consults the type filter and an optional parent filter that
//! supplies defaults from upstream configuration layers.

mod checksum_filter;
mod ignore_filter;
mod target_filter;
mod type_filter;
mod url_filter;

pub use checksum_filter::ChecksumFilter;
pub use ignore_filter::IgnoreFilter;
pub use target_filter::TargetFilter;
pub use type_filter::TypeFilter;
pub use url_filter::UrlFilter;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{BallastError, Result};
use crate::package::PackageMetadata;

/// A single validation step over a raw download entry.
pub trait Filter {
    type Output;

    fn filter(&self, entry: &Map<String, Value>) -> Result<Self::Output>;
}

/// Shared state of every filter: the download's name and a handle to the
/// owning package.
///
/// The package's display name is looked up exclusively inside
/// [`FilterContext::unexpected`], so success paths never touch it.
#[derive(Clone)]
pub(crate) struct FilterContext {
    name: String,
    package: Arc<dyn PackageMetadata>,
}

impl FilterContext {
    pub(crate) fn new(name: impl Into<String>, package: Arc<dyn PackageMetadata>) -> Self {
        Self {
            name: name.into(),
            package,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Build the validation error for a malformed field, resolving the
    /// owning package's display name at this point only.
    pub(crate) fn unexpected(
        &self,
        field: &str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> BallastError {
        log::debug!("Rejecting extra download {}: invalid {}", self.name, field);
        BallastError::UnexpectedValue {
            package: self.package.name(),
            field: field.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Run `value` through an optional fallback filter, defaulting to `empty`.
pub(crate) fn parent_or<T, F>(
    parent: Option<&(dyn Filter<Output = T> + Send + Sync)>,
    entry: &Map<String, Value>,
    empty: F,
) -> Result<T>
where
    F: FnOnce() -> T,
{
    match parent {
        Some(filter) => filter.filter(entry),
        None => Ok(empty()),
    }
}
