//! Core trait for reading catalog metadata.
//!
//! - [`SchemaReader`]: lists tables and columns of a schema
//!
//! Readers for different engines share this contract; the SQL they run is a
//! [`CatalogQueries`](crate::drivers::CatalogQueries) value rather than code.

use async_trait::async_trait;

use crate::error::Result;

use super::dialect::Dialect;
use super::schema::{ColumnDescriptor, TableDescriptor};

/// Read table and column metadata from a database catalog.
///
/// Both queries are read-only and parameterized by schema and table name.
#[async_trait]
pub trait SchemaReader: Send + Sync {
    /// List base tables of a schema, in catalog order.
    async fn list_tables(&self, schema: &str) -> Result<Vec<TableDescriptor>>;

    /// List the columns of one table, ordered by ordinal position ascending.
    async fn list_columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>>;

    /// Dialect this reader speaks.
    fn dialect(&self) -> Dialect;

    /// Look up a single table's catalog comment.
    ///
    /// Template method over [`list_tables`](SchemaReader::list_tables).
    async fn table_comment(&self, schema: &str, table: &str) -> Result<Option<String>> {
        let tables = self.list_tables(schema).await?;
        Ok(tables
            .into_iter()
            .find(|t| t.name == table)
            .and_then(|t| t.comment))
    }
}
