//! Database driver implementations.
//!
//! - [`mysql`]: MySQL/MariaDB reader
//! - [`postgres`]: PostgreSQL-family reader
//! - [`common`]: shared TLS setup
//! - [`queries`]: the catalog SQL each reader runs
//!
//! # Static dispatch
//!
//! [`ReaderImpl`] wraps the concrete readers in an enum so the generator can
//! hold "some reader" without a `Box<dyn SchemaReader>`. Which variant is
//! built is decided once, from configuration.

pub mod common;
pub mod mysql;
pub mod postgres;
pub mod queries;

pub use common::{SslMode, TlsBuilder};
pub use mysql::MysqlReader;
pub use postgres::PostgresReader;
pub use queries::CatalogQueries;

use async_trait::async_trait;

use crate::config::Config;
use crate::core::{ColumnDescriptor, Dialect, SchemaReader, TableDescriptor};
use crate::error::Result;

/// Enum-based static dispatch for readers.
pub enum ReaderImpl {
    Mysql(MysqlReader),
    Postgres(PostgresReader),
}

impl ReaderImpl {
    /// Connect the reader selected by `database.type`.
    pub async fn connect(config: &Config) -> Result<Self> {
        let dialect = config.dialect()?;
        let queries = CatalogQueries::with_overrides(dialect, config.catalog.as_ref());
        queries.validate(dialect)?;

        match dialect {
            Dialect::Mysql => Ok(ReaderImpl::Mysql(
                MysqlReader::connect(&config.database, queries).await?,
            )),
            Dialect::Postgres => Ok(ReaderImpl::Postgres(
                PostgresReader::connect(&config.database, queries).await?,
            )),
        }
    }

    /// Release the connection.
    pub async fn close(&self) {
        if let ReaderImpl::Mysql(r) = self {
            r.close().await;
        }
    }
}

#[async_trait]
impl SchemaReader for ReaderImpl {
    async fn list_tables(&self, schema: &str) -> Result<Vec<TableDescriptor>> {
        match self {
            ReaderImpl::Mysql(r) => r.list_tables(schema).await,
            ReaderImpl::Postgres(r) => r.list_tables(schema).await,
        }
    }

    async fn list_columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        match self {
            ReaderImpl::Mysql(r) => r.list_columns(schema, table).await,
            ReaderImpl::Postgres(r) => r.list_columns(schema, table).await,
        }
    }

    fn dialect(&self) -> Dialect {
        match self {
            ReaderImpl::Mysql(r) => r.dialect(),
            ReaderImpl::Postgres(r) => r.dialect(),
        }
    }
}
