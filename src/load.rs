//! Warehouse loading with full-replace semantics.

use chrono::NaiveDate;
use deadpool_postgres::{Config as PoolConfig, Pool, Runtime};
use serde_json::Value;
use tokio_postgres::types::ToSql;
use tokio_postgres::NoTls;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::error::EtlError;

/// Destination table name within the dataset schema.
const TABLE_NAME: &str = "data";

/// Write handle for the destination dataset.
///
/// Addresses the table as `<dataset>.data` inside the project database; the
/// credential and connection details are resolved by the caller before the
/// pipeline runs.
pub struct Warehouse {
    pool: Pool,
    dataset: String,
}

impl Warehouse {
    /// Build a pooled connection to the configured project database.
    pub fn connect(
        database: &DatabaseConfig,
        project: &str,
        dataset: &str,
    ) -> Result<Self, EtlError> {
        let mut pool_config = PoolConfig::new();
        pool_config.host = Some(database.host.clone());
        pool_config.port = Some(database.port);
        pool_config.dbname = Some(project.to_string());
        pool_config.user = Some(database.user.clone());
        pool_config.password = database
            .password
            .clone()
            .or_else(|| std::env::var("PGPASSWORD").ok());

        let pool = pool_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(EtlError::load)?;

        Ok(Self {
            pool,
            dataset: dataset.to_string(),
        })
    }

    /// Replace the destination table's content with `rows`.
    ///
    /// Schema creation, truncate and inserts run in one transaction: on any
    /// failure it rolls back and the table keeps its prior content. There is
    /// no partial-success outcome.
    pub async fn replace(&self, rows: &[Value]) -> Result<u64, EtlError> {
        let mut client = self.pool.get().await.map_err(EtlError::load)?;
        let tx = client.transaction().await.map_err(EtlError::load)?;

        tx.execute(
            &format!("CREATE SCHEMA IF NOT EXISTS {}", self.dataset),
            &[],
        )
        .await
        .map_err(EtlError::load)?;

        tx.execute(&self.create_table_sql(), &[])
            .await
            .map_err(EtlError::load)?;

        tx.execute(&format!("TRUNCATE {}.{}", self.dataset, TABLE_NAME), &[])
            .await
            .map_err(EtlError::load)?;

        let insert = tx.prepare(&self.insert_sql()).await.map_err(EtlError::load)?;

        let mut written = 0u64;
        for row in rows {
            let create_datetime = date_cell(row, "create_datetime");
            let update_datetime = date_cell(row, "update_datetime");
            let id = text_cell(row, "id");
            let description = text_cell(row, "description");
            let name = text_cell(row, "name");
            let structure = text_cell(row, "structure");
            let species_id = text_cell(row, "species_id");
            let practices = text_cell(row, "practices");
            let months = text_cell(row, "months");
            let region = text_cell(row, "region");
            let departement = text_cell(row, "departement");
            let country = text_cell(row, "Pays");

            let params: [&(dyn ToSql + Sync); 12] = [
                &create_datetime,
                &id,
                &description,
                &name,
                &structure,
                &species_id,
                &practices,
                &months,
                &region,
                &departement,
                &country,
                &update_datetime,
            ];

            tx.execute(&insert, &params).await.map_err(EtlError::load)?;
            written += 1;
        }

        tx.commit().await.map_err(EtlError::load)?;

        info!(
            "Replaced {}.{} with {} rows",
            self.dataset, TABLE_NAME, written
        );
        Ok(written)
    }

    fn create_table_sql(&self) -> String {
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {}.{} (
                create_datetime DATE,
                id TEXT,
                description TEXT,
                name TEXT,
                structure TEXT,
                species_id TEXT,
                practices TEXT,
                months TEXT,
                region TEXT,
                departement TEXT,
                "Pays" TEXT,
                update_datetime DATE
            )
            "#,
            self.dataset, TABLE_NAME
        )
    }

    fn insert_sql(&self) -> String {
        format!(
            r#"
            INSERT INTO {}.{}
                (create_datetime, id, description, name, structure, species_id,
                 practices, months, region, departement, "Pays", update_datetime)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
            self.dataset, TABLE_NAME
        )
    }
}

fn text_cell(row: &Value, column: &str) -> String {
    row.get(column)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Date cells that hold the invalid-date sentinel (or anything else that is
/// not `YYYY-MM-DD`) load as NULL.
fn date_cell(row: &Value, column: &str) -> Option<NaiveDate> {
    let text = row.get(column).and_then(Value::as_str)?;
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            warn!("Non-date value in {}: {:?}, storing NULL", column, text);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn date_cell_parses_normalized_dates() {
        let row = json!({"create_datetime": "2024-01-01"});
        assert_eq!(
            date_cell(&row, "create_datetime"),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn date_cell_maps_sentinel_to_null() {
        let row = json!({"create_datetime": crate::transform::INVALID_DATE});
        assert_eq!(date_cell(&row, "create_datetime"), None);
    }

    #[test]
    fn text_cell_defaults_to_empty() {
        let row = json!({"id": "42"});
        assert_eq!(text_cell(&row, "id"), "42");
        assert_eq!(text_cell(&row, "missing"), "");
    }
}
