//! Repository performing point updates on JSONB documents

use async_trait::async_trait;
use mediamount_core::models::FieldValue;
use mediamount_core::MountResult;
use sqlx::PgPool;

use super::backend::{quote_identifier, FieldWriter, RecordTarget};
use super::relational::bind_record_id;

/// Repository for document records stored as JSONB in a collection table.
///
/// Only the named key of the document is replaced; the rest of the body is kept.
#[derive(Clone)]
pub struct DocumentRecordRepository {
    pool: PgPool,
    document_column: String,
}

impl DocumentRecordRepository {
    pub fn new(pool: PgPool, document_column: impl Into<String>) -> Self {
        Self {
            pool,
            document_column: document_column.into(),
        }
    }

    pub fn update_statement(&self, target: &RecordTarget) -> MountResult<String> {
        let column = quote_identifier(&self.document_column)?;
        Ok(format!(
            "UPDATE {table} SET {column} = jsonb_set(COALESCE({column}, '{{}}'::jsonb), ARRAY[$1]::text[], $2, true) WHERE {key} = $3",
            table = quote_identifier(&target.table)?,
            column = column,
            key = quote_identifier(&target.key_column)?,
        ))
    }
}

#[async_trait]
impl FieldWriter for DocumentRecordRepository {
    #[tracing::instrument(skip(self, value), fields(db.table = %target.table, db.operation = "update", db.record_id = %target.id))]
    async fn update_field(
        &self,
        target: &RecordTarget,
        field: &str,
        value: &FieldValue,
    ) -> MountResult<u64> {
        let sql = self.update_statement(target)?;

        let query = sqlx::query(&sql)
            .bind(field.to_string())
            .bind(sqlx::types::Json(value.to_json()));
        let result = bind_record_id(query, &target.id)
            .execute(&self.pool)
            .await?;

        let rows = result.rows_affected();
        if rows == 0 {
            tracing::warn!(field = %field, "No document matched the record identity");
        } else {
            tracing::debug!(field = %field, rows, "Document field updated");
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediamount_core::models::RecordId;

    fn repository(column: &str) -> DocumentRecordRepository {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/mediamount_test")
            .unwrap();
        DocumentRecordRepository::new(pool, column)
    }

    #[tokio::test]
    async fn test_update_statement() {
        let repo = repository("document");
        let target = RecordTarget::new("profiles", "_id", RecordId::Text("abc".to_string()));
        assert_eq!(
            repo.update_statement(&target).unwrap(),
            r#"UPDATE "profiles" SET "document" = jsonb_set(COALESCE("document", '{}'::jsonb), ARRAY[$1]::text[], $2, true) WHERE "_id" = $3"#
        );
    }

    #[tokio::test]
    async fn test_update_statement_rejects_bad_column() {
        let repo = repository("doc body");
        let target = RecordTarget::new("profiles", "_id", RecordId::Text("abc".to_string()));
        assert!(repo.update_statement(&target).is_err());
    }
}
