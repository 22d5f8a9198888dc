//! Repository updating single columns of relational rows by primary key

use async_trait::async_trait;
use mediamount_core::models::{FieldValue, RecordId};
use mediamount_core::MountResult;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{PgPool, Postgres};

use super::backend::{quote_identifier, FieldWriter, RecordTarget};

/// Repository for relational records
#[derive(Clone)]
pub struct RelationalRecordRepository {
    pool: PgPool,
}

impl RelationalRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `UPDATE "table" SET "field" = $1 WHERE "key" = $2`
    pub fn update_statement(target: &RecordTarget, field: &str) -> MountResult<String> {
        Ok(format!(
            "UPDATE {} SET {} = $1 WHERE {} = $2",
            quote_identifier(&target.table)?,
            quote_identifier(field)?,
            quote_identifier(&target.key_column)?,
        ))
    }
}

pub(crate) fn bind_field_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &FieldValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        FieldValue::Integer(n) => query.bind(*n),
        FieldValue::Text(s) => query.bind(s.clone()),
    }
}

pub(crate) fn bind_record_id<'q>(
    query: Query<'q, Postgres, PgArguments>,
    id: &RecordId,
) -> Query<'q, Postgres, PgArguments> {
    match id {
        RecordId::Integer(n) => query.bind(*n),
        RecordId::Uuid(id) => query.bind(*id),
        RecordId::Text(s) => query.bind(s.clone()),
    }
}

#[async_trait]
impl FieldWriter for RelationalRecordRepository {
    #[tracing::instrument(skip(self, value), fields(db.table = %target.table, db.operation = "update", db.record_id = %target.id))]
    async fn update_field(
        &self,
        target: &RecordTarget,
        field: &str,
        value: &FieldValue,
    ) -> MountResult<u64> {
        let sql = Self::update_statement(target, field)?;

        let query = bind_field_value(sqlx::query(&sql), value);
        let result = bind_record_id(query, &target.id)
            .execute(&self.pool)
            .await?;

        let rows = result.rows_affected();
        if rows == 0 {
            tracing::warn!(field = %field, "No row matched the record identity");
        } else {
            tracing::debug!(field = %field, rows, "Record column updated");
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_statement() {
        let target = RecordTarget::new("users", "id", RecordId::Integer(1));
        assert_eq!(
            RelationalRecordRepository::update_statement(&target, "avatar").unwrap(),
            r#"UPDATE "users" SET "avatar" = $1 WHERE "id" = $2"#
        );
    }

    #[test]
    fn test_update_statement_rejects_bad_field() {
        let target = RecordTarget::new("users", "id", RecordId::Integer(1));
        assert!(RelationalRecordRepository::update_statement(&target, "avatar = NULL --").is_err());
    }

    #[test]
    fn test_update_statement_rejects_bad_table() {
        let target = RecordTarget::new("public.users", "id", RecordId::Integer(1));
        assert!(RelationalRecordRepository::update_statement(&target, "avatar").is_err());
    }
}
