//! PostgreSQL-family catalog reader.
//!
//! Implements [`SchemaReader`] for PostgreSQL and compatible engines (PanWei,
//! openGauss). Comments are not part of `information_schema` there, so the
//! built-in queries join `pg_description` by object id and column position.

use async_trait::async_trait;
use tokio_postgres::{Client, Config as PgConfig, NoTls, Row};
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::core::{ColumnDescriptor, Dialect, SchemaReader, TableDescriptor};
use crate::drivers::common::{SslMode, TlsBuilder};
use crate::drivers::CatalogQueries;
use crate::error::{DocgenError, Result};

/// PostgreSQL catalog reader holding one client connection.
pub struct PostgresReader {
    client: Client,
    queries: CatalogQueries,
}

impl PostgresReader {
    /// Connect using the given settings and catalog queries.
    pub async fn connect(config: &DatabaseConfig, queries: CatalogQueries) -> Result<Self> {
        let port = config.port.unwrap_or(Dialect::Postgres.default_port());

        let mut pg_config = PgConfig::new();
        pg_config.host(&config.host);
        pg_config.port(port);
        pg_config.dbname(&config.database);
        pg_config.user(&config.user);
        pg_config.password(&config.password);
        pg_config.application_name("schema-docgen");

        let ssl_mode = SslMode::parse(&config.ssl_mode)?;
        let client = match TlsBuilder::new(ssl_mode).build()? {
            Some(tls) => {
                let (client, connection) = pg_config
                    .connect(tls)
                    .await
                    .map_err(|e| DocgenError::query("postgres", "connecting", e))?;
                tokio::spawn(async move {
                    if let Err(e) = connection.await {
                        warn!("PostgreSQL connection closed with error: {}", e);
                    }
                });
                client
            }
            None => {
                let (client, connection) = pg_config
                    .connect(NoTls)
                    .await
                    .map_err(|e| DocgenError::query("postgres", "connecting", e))?;
                tokio::spawn(async move {
                    if let Err(e) = connection.await {
                        warn!("PostgreSQL connection closed with error: {}", e);
                    }
                });
                client
            }
        };

        info!(
            "Connected to PostgreSQL: {}:{}/{}",
            config.host, port, config.database
        );

        Ok(Self { client, queries })
    }

    fn table_from_row(row: &Row) -> std::result::Result<TableDescriptor, tokio_postgres::Error> {
        Ok(TableDescriptor::new(
            row.try_get::<_, String>(0)?,
            row.try_get::<_, Option<String>>(1)?,
        ))
    }

    fn column_from_row(row: &Row) -> std::result::Result<ColumnDescriptor, tokio_postgres::Error> {
        let is_nullable: Option<String> = row.try_get(3)?;
        Ok(ColumnDescriptor::from_catalog(
            row.try_get::<_, String>(0)?,
            row.try_get::<_, String>(1)?,
            row.try_get::<_, Option<String>>(2)?,
            is_nullable.as_deref().unwrap_or("YES"),
            row.try_get::<_, Option<String>>(4)?,
        ))
    }
}

#[async_trait]
impl SchemaReader for PostgresReader {
    async fn list_tables(&self, schema: &str) -> Result<Vec<TableDescriptor>> {
        let rows = self
            .client
            .query(self.queries.list_tables.as_str(), &[&schema])
            .await
            .map_err(|e| {
                DocgenError::query("postgres", format!("listing tables of {}", schema), e)
            })?;

        let tables = rows
            .iter()
            .map(Self::table_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DocgenError::query("postgres", "decoding table rows", e))?;

        debug!("Found {} tables in schema '{}'", tables.len(), schema);
        Ok(tables)
    }

    async fn list_columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows = self
            .client
            .query(self.queries.list_columns.as_str(), &[&schema, &table])
            .await
            .map_err(|e| {
                DocgenError::query(
                    "postgres",
                    format!("listing columns of {}.{}", schema, table),
                    e,
                )
            })?;

        let columns = rows
            .iter()
            .map(Self::column_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DocgenError::query("postgres", "decoding column rows", e))?;

        debug!("Loaded {} columns for {}.{}", columns.len(), schema, table);
        Ok(columns)
    }

    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }
}
