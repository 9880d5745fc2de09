//! MySQL/MariaDB catalog reader.
//!
//! Implements [`SchemaReader`] over `INFORMATION_SCHEMA`, where both table and
//! column comments are plain columns. Uses a single-connection SQLx pool.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::core::{ColumnDescriptor, Dialect, SchemaReader, TableDescriptor};
use crate::drivers::common::SslMode;
use crate::drivers::CatalogQueries;
use crate::error::{DocgenError, Result};

/// Connection acquire timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// MySQL/MariaDB catalog reader.
pub struct MysqlReader {
    pool: MySqlPool,
    queries: CatalogQueries,
}

impl MysqlReader {
    /// Connect to MySQL using the given settings and catalog queries.
    pub async fn connect(config: &DatabaseConfig, queries: CatalogQueries) -> Result<Self> {
        let ssl_mode = SslMode::parse(&config.ssl_mode)?;
        let port = config.port.unwrap_or(Dialect::Mysql.default_port());

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password)
            .charset("utf8mb4")
            .ssl_mode(ssl_mode.to_mysql());

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(CONNECT_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| DocgenError::query("mysql", "connecting", e))?;

        info!(
            "Connected to MySQL: {}:{}/{}",
            config.host, port, config.database
        );

        Ok(Self { pool, queries })
    }

    /// Close the underlying connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn table_from_row(row: &MySqlRow) -> std::result::Result<TableDescriptor, sqlx::Error> {
        Ok(TableDescriptor::new(
            row.try_get::<String, _>(0)?,
            row.try_get::<Option<String>, _>(1)?,
        ))
    }

    fn column_from_row(row: &MySqlRow) -> std::result::Result<ColumnDescriptor, sqlx::Error> {
        let is_nullable: Option<String> = row.try_get(3)?;
        Ok(ColumnDescriptor::from_catalog(
            row.try_get::<String, _>(0)?,
            row.try_get::<String, _>(1)?,
            row.try_get::<Option<String>, _>(2)?,
            is_nullable.as_deref().unwrap_or("YES"),
            row.try_get::<Option<String>, _>(4)?,
        ))
    }
}

#[async_trait]
impl SchemaReader for MysqlReader {
    async fn list_tables(&self, schema: &str) -> Result<Vec<TableDescriptor>> {
        let rows: Vec<MySqlRow> = sqlx::query(&self.queries.list_tables)
            .bind(schema)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DocgenError::query("mysql", format!("listing tables of {}", schema), e))?;

        let tables = rows
            .iter()
            .map(Self::table_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DocgenError::query("mysql", "decoding table rows", e))?;

        debug!("Found {} tables in schema '{}'", tables.len(), schema);
        Ok(tables)
    }

    async fn list_columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows: Vec<MySqlRow> = sqlx::query(&self.queries.list_columns)
            .bind(schema)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DocgenError::query("mysql", format!("listing columns of {}.{}", schema, table), e)
            })?;

        let columns = rows
            .iter()
            .map(Self::column_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DocgenError::query("mysql", "decoding column rows", e))?;

        debug!("Loaded {} columns for {}.{}", columns.len(), schema, table);
        Ok(columns)
    }

    fn dialect(&self) -> Dialect {
        Dialect::Mysql
    }
}
