use actix_web::error::ErrorBadRequest;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use sqlx::MySqlPool;

/// ===============================
/// SQL error classification
/// ===============================

/// Unique-key violation (MySQL SQLSTATE 23000).
pub fn is_duplicate_key(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = e {
        return db_err.code().as_deref() == Some("23000");
    }
    false
}

/// Deadlock / serialization failure (MySQL SQLSTATE 40001); the one
/// failure worth retrying.
pub fn is_lock_conflict(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = e {
        return db_err.code().as_deref() == Some("40001");
    }
    false
}

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug)]
pub enum SqlValue {
    String(String),
    I64(i64),
    F64(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Null,
}

/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// ===============================
/// Build dynamic UPDATE SQL
/// ===============================
/// Columns outside `allowed` are rejected, and the WHERE clause is always
/// tenant-scoped.
pub fn build_update_sql(
    table: &str,
    allowed: &[&str],
    payload: &Value,
    id_value: u64,
    tenant_id: u64,
) -> Result<SqlUpdate, actix_web::Error> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ErrorBadRequest("Payload must be a JSON object"))?;

    if obj.is_empty() {
        return Err(ErrorBadRequest("No fields provided for update"));
    }

    for key in obj.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(ErrorBadRequest(format!("Unknown field: {}", key)));
        }
    }

    // Build SET clause
    let set_clause = obj
        .keys()
        .map(|k| format!("{} = ?", k))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!(
        "UPDATE {} SET {} WHERE id = ? AND tenant_id = ?",
        table, set_clause
    );

    let mut values = Vec::with_capacity(obj.len() + 2);

    // Convert JSON values → SqlValue
    for value in obj.values() {
        match value {
            Value::String(s) => {
                if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    values.push(SqlValue::Date(d));
                } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                    values.push(SqlValue::DateTime(dt));
                } else {
                    values.push(SqlValue::String(s.clone()));
                }
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    values.push(SqlValue::I64(i));
                } else if let Some(f) = n.as_f64() {
                    values.push(SqlValue::F64(f));
                }
            }
            Value::Bool(b) => values.push(SqlValue::Bool(*b)),
            Value::Null => values.push(SqlValue::Null),
            _ => return Err(ErrorBadRequest("Unsupported JSON value type")),
        }
    }

    // WHERE id = ? AND tenant_id = ?
    values.push(SqlValue::I64(id_value as i64));
    values.push(SqlValue::I64(tenant_id as i64));

    Ok(SqlUpdate { sql, values })
}

/// ===============================
/// Execute the update
/// ===============================
pub async fn execute_update(pool: &MySqlPool, update: SqlUpdate) -> Result<u64, sqlx::Error> {
    let mut query = sqlx::query(&update.sql);

    for value in update.values {
        query = match value {
            SqlValue::String(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
            SqlValue::F64(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
            SqlValue::DateTime(v) => query.bind(v),
            SqlValue::Null => query.bind(None::<String>),
        };
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_sql_is_tenant_scoped() {
        let update = build_update_sql(
            "holidays",
            &["name", "is_optional"],
            &json!({"name": "May Day", "is_optional": true}),
            7,
            1,
        )
        .unwrap();
        assert!(update.sql.starts_with("UPDATE holidays SET "));
        assert!(update.sql.contains("name = ?"));
        assert!(update.sql.contains("is_optional = ?"));
        assert!(update.sql.ends_with("WHERE id = ? AND tenant_id = ?"));
        assert_eq!(update.values.len(), 4);
    }

    #[test]
    fn unknown_columns_are_rejected() {
        let err = build_update_sql("holidays", &["name"], &json!({"status": "x"}), 7, 1);
        assert!(err.is_err());
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert!(build_update_sql("holidays", &["name"], &json!({}), 7, 1).is_err());
    }

    #[test]
    fn date_strings_bind_as_dates() {
        let update = build_update_sql(
            "holidays",
            &["holiday_date"],
            &json!({"holiday_date": "2025-05-01"}),
            7,
            1,
        )
        .unwrap();
        assert!(matches!(update.values[0], SqlValue::Date(_)));
    }
}
