//! The record that owns a mounted attachment.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// Identity of a record, as stored in its primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Integer(i64),
    Uuid(Uuid),
    Text(String),
}

impl RecordId {
    /// Interpret user-supplied text: integers first, then UUIDs, otherwise plain text.
    pub fn parse(s: &str) -> Self {
        if let Ok(n) = s.parse::<i64>() {
            RecordId::Integer(n)
        } else if let Ok(id) = Uuid::parse_str(s) {
            RecordId::Uuid(id)
        } else {
            RecordId::Text(s.to_string())
        }
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RecordId::Integer(n) => write!(f, "{}", n),
            RecordId::Uuid(id) => write!(f, "{}", id),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Integer(n)
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        RecordId::Uuid(id)
    }
}

/// A value written into a single record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

impl FieldValue {
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Integer(n) => Value::from(*n),
            FieldValue::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// In-memory view of the owning record.
///
/// Every field persisted by the adapter is mirrored into `attributes` so the
/// caller's copy matches the stored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwningRecord {
    pub id: RecordId,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl OwningRecord {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn write_attribute(&mut self, name: &str, value: &FieldValue) {
        self.attributes.insert(name.to_string(), value.to_json());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_parse() {
        assert_eq!(RecordId::parse("42"), RecordId::Integer(42));
        let uuid = Uuid::new_v4();
        assert_eq!(RecordId::parse(&uuid.to_string()), RecordId::Uuid(uuid));
        assert_eq!(
            RecordId::parse("507f1f77bcf86cd799439011"),
            RecordId::Text("507f1f77bcf86cd799439011".to_string())
        );
    }

    #[test]
    fn test_write_attribute_mirrors_value() {
        let mut record = OwningRecord::new(7);
        record.write_attribute("avatar", &FieldValue::Text("v1/a.jpg".to_string()));
        record.write_attribute("pages", &FieldValue::Integer(3));
        assert_eq!(record.attribute("avatar"), Some(&Value::from("v1/a.jpg")));
        assert_eq!(record.attribute("pages"), Some(&Value::from(3)));
    }
}
