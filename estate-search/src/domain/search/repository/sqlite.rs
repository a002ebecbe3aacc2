//! SQLite record store.

use async_trait::async_trait;
use serde_json::{Number, Value};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};

use crate::config::DatabaseSettings;
use crate::domain::search::traits::{RecordStore, Result};
use crate::domain::search::translator::TranslatedQuery;
use crate::domain::search::types::{PropertyRecord, RecordRow, SqlParam, RECORDS_TABLE};

/// SQLite-backed store over the single `records` table.
///
/// Each call checks a connection out of the pool and returns it on every
/// exit path; reads run inside their own transaction.
#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool from settings and bring the schema up to date.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(settings.connect_options()?)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Insert listings in one transaction.
    ///
    /// Returns the number of rows written.
    pub async fn insert_records(&self, records: &[PropertyRecord]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;
        let mut count = 0;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO records (
                    title, description, price, city, zone, people_capacity,
                    garden, garage, property_type, operation_type
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(record.title.as_str())
            .bind(record.description.as_deref())
            .bind(record.price)
            .bind(record.city.as_str())
            .bind(record.zone.as_str())
            .bind(record.people_capacity)
            .bind(record.garden)
            .bind(record.garage)
            .bind(record.property_type.as_str())
            .bind(record.operation_type.as_str())
            .execute(&mut *tx)
            .await?;
            count += 1;
        }

        tx.commit().await?;
        Ok(count)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM records")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn fetch_matching(&self, query: &TranslatedQuery) -> Result<Vec<RecordRow>> {
        let sql = query.to_sql(RECORDS_TABLE);
        tracing::debug!(sql = %sql, params = query.params.len(), "Fetching records");

        let mut statement = sqlx::query(&sql);
        for param in &query.params {
            statement = match param {
                SqlParam::Integer(i) => statement.bind(*i),
                SqlParam::Real(f) => statement.bind(*f),
                SqlParam::Text(s) => statement.bind(s.as_str()),
            };
        }

        let mut tx = self.pool.begin().await?;
        let rows = statement.fetch_all(&mut *tx).await?;
        tx.commit().await?;

        rows.iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: &SqliteRow) -> Result<RecordRow> {
    let mut record = RecordRow::new();
    for column in row.columns() {
        let value = column_value(row, column.ordinal())?;
        record.insert(column.name().to_string(), value);
    }
    Ok(record)
}

/// Decode one column by the storage class of the value actually stored.
fn column_value(row: &SqliteRow, index: usize) -> Result<Value> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let storage_class = raw.type_info().name().to_string();

    let value = match storage_class.as_str() {
        "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(index)?),
        "REAL" => Number::from_f64(row.try_get::<f64, _>(index)?)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "BLOB" => Value::from(row.try_get::<Vec<u8>, _>(index)?),
        _ => Value::String(row.try_get::<String, _>(index)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::translator::translate;
    use crate::domain::search::types::FilterSet;
    use serde_json::json;

    async fn memory_store() -> SqliteRecordStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = SqliteRecordStore::new(pool);
        store.migrate().await.unwrap();
        store
    }

    fn listing(title: &str, price: i64, city: &str, zone: &str, garden: bool) -> PropertyRecord {
        PropertyRecord {
            title: title.to_string(),
            description: None,
            price,
            city: city.to_string(),
            zone: zone.to_string(),
            people_capacity: Some(2),
            garden,
            garage: false,
            property_type: "Casa".to_string(),
            operation_type: "Venta".to_string(),
        }
    }

    async fn seeded_store() -> SqliteRecordStore {
        let store = memory_store().await;
        store
            .insert_records(&[
                listing("Casa Achumani", 250000, "La Paz", "Achumani", true),
                listing("Casa Calacoto", 320000, "La Paz", "Calacoto", true),
                listing("Casa Centro", 180000, "Cochabamba", "Centro", false),
            ])
            .await
            .unwrap();
        store
    }

    fn titles(rows: &[RecordRow]) -> Vec<String> {
        rows.iter()
            .map(|r| r["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn insert_and_count() {
        let store = seeded_store().await;
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn unconstrained_query_returns_all_rows() {
        let store = seeded_store().await;
        let rows = store
            .fetch_matching(&translate(&FilterSet::default()))
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn filters_match_case_insensitively() {
        let store = seeded_store().await;
        let filters: FilterSet = serde_json::from_value(json!({
            "price": 280000,
            "city": ["la paz"],
            "zone": ["ACHUMANI", "centro"],
            "garden": true,
            "property_type": "casa",
            "operation_type": "venta"
        }))
        .unwrap();

        let rows = store.fetch_matching(&translate(&filters)).await.unwrap();
        assert_eq!(titles(&rows), vec!["Casa Achumani"]);
    }

    #[tokio::test]
    async fn false_boolean_matches_zero() {
        let store = seeded_store().await;
        let filters: FilterSet = serde_json::from_value(json!({ "garden": false })).unwrap();

        let rows = store.fetch_matching(&translate(&filters)).await.unwrap();
        assert_eq!(titles(&rows), vec!["Casa Centro"]);
    }

    #[tokio::test]
    async fn rows_keep_column_order_and_types() {
        let store = seeded_store().await;
        let filters: FilterSet = serde_json::from_value(json!({ "zone": ["calacoto"] })).unwrap();

        let rows = store.fetch_matching(&translate(&filters)).await.unwrap();
        let row = &rows[0];

        let columns: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(&columns[..4], &["id", "title", "description", "price"]);
        assert_eq!(row["price"], json!(320000));
        assert_eq!(row["description"], Value::Null);
        assert_eq!(row["garden"], json!(1));
    }

    #[tokio::test]
    async fn capacity_is_a_lower_bound() {
        let store = seeded_store().await;
        let filters: FilterSet =
            serde_json::from_value(json!({ "people_capacity": 3 })).unwrap();

        let rows = store.fetch_matching(&translate(&filters)).await.unwrap();
        assert!(rows.is_empty());
    }
}
