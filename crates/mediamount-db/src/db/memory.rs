//! In-memory field writer
//!
//! Records every update instead of touching a database. Used for dry runs and
//! in tests that need to observe what the adapter persisted.

use async_trait::async_trait;
use mediamount_core::models::FieldValue;
use mediamount_core::MountResult;
use std::sync::{Arc, Mutex};

use super::backend::{FieldWriter, RecordTarget};

/// One recorded update.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenField {
    pub target: RecordTarget,
    pub field: String,
    pub value: FieldValue,
}

#[derive(Clone, Default)]
pub struct MemoryFieldWriter {
    writes: Arc<Mutex<Vec<WrittenField>>>,
}

impl MemoryFieldWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates recorded so far, in order.
    pub fn writes(&self) -> Vec<WrittenField> {
        self.writes
            .lock()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FieldWriter for MemoryFieldWriter {
    async fn update_field(
        &self,
        target: &RecordTarget,
        field: &str,
        value: &FieldValue,
    ) -> MountResult<u64> {
        tracing::debug!(table = %target.table, record_id = %target.id, field = %field, value = %value, "Recording field update");
        if let Ok(mut writes) = self.writes.lock() {
            writes.push(WrittenField {
                target: target.clone(),
                field: field.to_string(),
                value: value.clone(),
            });
        }
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediamount_core::models::RecordId;

    #[tokio::test]
    async fn test_writes_are_recorded_in_order() {
        let writer = MemoryFieldWriter::new();
        let target = RecordTarget::new("users", "id", RecordId::Integer(1));

        writer
            .update_field(&target, "avatar", &FieldValue::Text("v1/a.jpg".to_string()))
            .await
            .unwrap();
        writer
            .update_field(&target, "pages", &FieldValue::Integer(2))
            .await
            .unwrap();

        let fields: Vec<_> = writer.writes().into_iter().map(|w| w.field).collect();
        assert_eq!(fields, vec!["avatar", "pages"]);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let writer = MemoryFieldWriter::new();
        let clone = writer.clone();
        let target = RecordTarget::new("users", "id", RecordId::Integer(1));
        clone
            .update_field(&target, "avatar", &FieldValue::Text("v1/a.jpg".to_string()))
            .await
            .unwrap();
        assert_eq!(writer.writes().len(), 1);
    }
}
