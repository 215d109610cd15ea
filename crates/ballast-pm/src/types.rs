//! Download entry types and type detection.
//!
//! Every entry under `extra.downloads` resolves to exactly one
//! [`SubpackageType`]. Detection is a pure function over the raw entry;
//! turning `Invalid` into a user-facing error is the type filter's job.

use serde_json::{Map, Value};

/// Recognized kinds of download entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubpackageType {
    /// A single file placed at the target path as-is.
    File,
    /// A zip archive extracted into the target directory.
    Zip,
    /// Unrecognized or ambiguous entry.
    Invalid,
}

impl SubpackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubpackageType::File => "file",
            SubpackageType::Zip => "zip",
            SubpackageType::Invalid => "invalid",
        }
    }

    /// Whether entries of this type carry archive-internal paths that
    /// ignore rules can apply to.
    pub fn is_archive(&self) -> bool {
        matches!(self, SubpackageType::Zip)
    }
}

impl std::fmt::Display for SubpackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Determine the type of a raw download entry.
///
/// An explicit `type` key wins; anything other than `"file"` or `"zip"`
/// (including non-strings) is `Invalid`. Without a `type` key the source
/// reference (`url`, falling back to `file`) is sniffed: a `.zip` suffix
/// means `Zip`, any other non-empty source means `File`, and an entry with
/// no usable source is `Invalid`.
pub fn classify(entry: &Map<String, Value>) -> SubpackageType {
    if let Some(declared) = entry.get("type") {
        return match declared.as_str() {
            Some("file") => SubpackageType::File,
            Some("zip") => SubpackageType::Zip,
            _ => SubpackageType::Invalid,
        };
    }

    let source = entry
        .get("url")
        .or_else(|| entry.get("file"))
        .and_then(Value::as_str);

    match source {
        Some(reference) if !reference.is_empty() => {
            // Query strings do not count towards the extension.
            let path = reference.split(['?', '#']).next().unwrap_or(reference);
            if path.to_lowercase().ends_with(".zip") {
                SubpackageType::Zip
            } else {
                SubpackageType::File
            }
        }
        _ => SubpackageType::Invalid,
    }
}

/// Short tag describing a JSON value's runtime type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_classify_explicit_type() {
        assert_eq!(classify(&entry(json!({"type": "file"}))), SubpackageType::File);
        assert_eq!(classify(&entry(json!({"type": "zip"}))), SubpackageType::Zip);
        assert_eq!(classify(&entry(json!({"type": "rar"}))), SubpackageType::Invalid);
        assert_eq!(classify(&entry(json!({"type": 42}))), SubpackageType::Invalid);
    }

    #[test]
    fn test_classify_from_url_extension() {
        assert_eq!(
            classify(&entry(json!({"url": "https://example.com/assets.zip"}))),
            SubpackageType::Zip
        );
        assert_eq!(
            classify(&entry(json!({"url": "https://example.com/assets.ZIP?token=x"}))),
            SubpackageType::Zip
        );
        assert_eq!(
            classify(&entry(json!({"url": "https://example.com/tool.phar"}))),
            SubpackageType::File
        );
    }

    #[test]
    fn test_classify_from_local_file() {
        assert_eq!(
            classify(&entry(json!({"file": "dist/bundle.zip"}))),
            SubpackageType::Zip
        );
        assert_eq!(
            classify(&entry(json!({"file": "dist/logo.png"}))),
            SubpackageType::File
        );
    }

    #[test]
    fn test_classify_unusable_entries() {
        assert_eq!(classify(&entry(json!({}))), SubpackageType::Invalid);
        assert_eq!(classify(&entry(json!({"url": ""}))), SubpackageType::Invalid);
        assert_eq!(classify(&entry(json!({"url": 123}))), SubpackageType::Invalid);
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(true)), "bool");
        assert_eq!(json_type_name(&json!(123)), "int");
        assert_eq!(json_type_name(&json!(12.3)), "float");
        assert_eq!(json_type_name(&json!("test")), "string");
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!({"key": "value"})), "object");
    }
}
