use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::package::PackageMetadata;
use crate::types::{classify, json_type_name, SubpackageType};

use super::{Filter, FilterContext};

/// Resolves and validates the entry type.
///
/// Classification itself never fails; this filter turns an `Invalid`
/// classification into a validation error.
pub struct TypeFilter {
    ctx: FilterContext,
}

impl TypeFilter {
    pub fn new(name: impl Into<String>, package: Arc<dyn PackageMetadata>) -> Self {
        Self {
            ctx: FilterContext::new(name, package),
        }
    }
}

impl Filter for TypeFilter {
    type Output = SubpackageType;

    fn filter(&self, entry: &Map<String, Value>) -> Result<SubpackageType> {
        let resolved = classify(entry);
        if resolved != SubpackageType::Invalid {
            log::trace!("Extra download {} resolved as {}", self.ctx.name(), resolved);
            return Ok(resolved);
        }

        let actual = match entry.get("type") {
            Some(Value::String(declared)) => declared.clone(),
            Some(other) => json_type_name(other).to_string(),
            None => "null".to_string(),
        };
        Err(self
            .ctx
            .unexpected("type", "one of \"file\" or \"zip\"", actual))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::HostPackage;
    use serde_json::json;

    fn filter() -> TypeFilter {
        let package = Arc::new(HostPackage::new("vendor/app", json!({})));
        TypeFilter::new("assets", package)
    }

    fn entry(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_resolves_declared_type() {
        let resolved = filter().filter(&entry(json!({"type": "zip"}))).unwrap();
        assert_eq!(resolved, SubpackageType::Zip);
    }

    #[test]
    fn test_resolves_detected_type() {
        let resolved = filter()
            .filter(&entry(json!({"url": "https://example.com/a.zip"})))
            .unwrap();
        assert_eq!(resolved, SubpackageType::Zip);
    }

    #[test]
    fn test_unknown_declared_type() {
        let err = filter()
            .filter(&entry(json!({"type": "rar", "url": "https://example.com/a.rar"})))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected value in package \"vendor/app\": type must be one of \"file\" or \"zip\", \"rar\" given"
        );
    }

    #[test]
    fn test_non_string_declared_type() {
        let err = filter().filter(&entry(json!({"type": 42}))).unwrap_err();
        assert!(err.to_string().contains("type must be one of \"file\" or \"zip\", \"int\" given"));
    }

    #[test]
    fn test_undetectable_type() {
        let err = filter().filter(&entry(json!({}))).unwrap_err();
        assert!(err.to_string().contains("\"null\" given"));
    }
}
