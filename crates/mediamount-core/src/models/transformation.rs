//! Transformation parameters attached to uploads and eager versions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Ordered set of transformation parameters (e.g. `width: 200, crop: "fill"`).
///
/// Ordering is stable so the rendered directive is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transformation(BTreeMap<String, Value>);

impl Transformation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Render as a compact directive: `key_value` pairs joined by commas.
    ///
    /// String values are written bare; other JSON values use their JSON text.
    pub fn to_directive(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("{}_{}", key, s),
                other => format!("{}_{}", key, other),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_is_sorted_by_key() {
        let t = Transformation::new()
            .with("width", 200)
            .with("crop", "fill")
            .with("height", 100);
        assert_eq!(t.to_directive(), "crop_fill,height_100,width_200");
    }

    #[test]
    fn test_empty_directive() {
        assert_eq!(Transformation::new().to_directive(), "");
        assert!(Transformation::new().is_empty());
    }

    #[test]
    fn test_deserializes_from_json_object() {
        let t: Transformation =
            serde_json::from_value(serde_json::json!({"quality": 80, "effect": "sepia"})).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.get("quality"), Some(&Value::from(80)));
    }
}
