//! Catalog SQL owned by the readers.
//!
//! Every query returns its columns positionally:
//!
//! - table listing: `table_name`, `table_comment`
//! - column listing: `column_name`, `column_type`, `column_comment`,
//!   `is_nullable`, `column_default`
//!
//! Overrides supplied through configuration must keep that shape.

use crate::config::CatalogConfig;
use crate::core::Dialect;
use crate::error::{DocgenError, Result};

const MYSQL_LIST_TABLES: &str = r#"
    SELECT
        CAST(TABLE_NAME AS CHAR(255)) AS table_name,
        CAST(TABLE_COMMENT AS CHAR(2048)) AS table_comment
    FROM INFORMATION_SCHEMA.TABLES
    WHERE TABLE_SCHEMA = ? AND LOWER(TABLE_TYPE) = 'base table'
    ORDER BY TABLE_NAME
"#;

const MYSQL_LIST_COLUMNS: &str = r#"
    SELECT
        CAST(COLUMN_NAME AS CHAR(255)) AS column_name,
        CAST(COLUMN_TYPE AS CHAR(255)) AS column_type,
        CAST(COLUMN_COMMENT AS CHAR(2048)) AS column_comment,
        CAST(IS_NULLABLE AS CHAR(3)) AS is_nullable,
        CAST(COLUMN_DEFAULT AS CHAR(2048)) AS column_default
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION ASC
"#;

const POSTGRES_LIST_TABLES: &str = r#"
    SELECT
        tb.table_name::text AS table_name,
        d.description AS table_comment
    FROM information_schema.tables tb
    JOIN pg_catalog.pg_namespace n ON n.nspname = tb.table_schema
    JOIN pg_catalog.pg_class c ON c.relname = tb.table_name AND c.relnamespace = n.oid
    LEFT JOIN pg_catalog.pg_description d ON d.objoid = c.oid AND d.objsubid = 0
    WHERE tb.table_schema = $1 AND tb.table_type = 'BASE TABLE'
    ORDER BY tb.table_name
"#;

const POSTGRES_LIST_COLUMNS: &str = r#"
    SELECT
        col.column_name::text AS column_name,
        col.data_type::text AS column_type,
        d.description AS column_comment,
        col.is_nullable::text AS is_nullable,
        col.column_default::text AS column_default
    FROM information_schema.columns col
    JOIN pg_catalog.pg_namespace n ON n.nspname = col.table_schema
    JOIN pg_catalog.pg_class c ON c.relname = col.table_name AND c.relnamespace = n.oid
    LEFT JOIN pg_catalog.pg_description d
        ON d.objoid = c.oid AND d.objsubid = col.ordinal_position
    WHERE col.table_schema = $1 AND col.table_name = $2
    ORDER BY col.ordinal_position ASC
"#;

/// The two catalog queries a reader runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQueries {
    /// Lists base tables; bound to the schema name.
    pub list_tables: String,
    /// Lists columns by ordinal position; bound to schema then table name.
    pub list_columns: String,
}

impl CatalogQueries {
    /// Built-in queries for a dialect.
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Mysql => Self {
                list_tables: MYSQL_LIST_TABLES.to_string(),
                list_columns: MYSQL_LIST_COLUMNS.to_string(),
            },
            Dialect::Postgres => Self {
                list_tables: POSTGRES_LIST_TABLES.to_string(),
                list_columns: POSTGRES_LIST_COLUMNS.to_string(),
            },
        }
    }

    /// Built-in queries with any configured overrides applied.
    pub fn with_overrides(dialect: Dialect, overrides: Option<&CatalogConfig>) -> Self {
        let mut queries = Self::for_dialect(dialect);
        if let Some(cfg) = overrides {
            if let Some(sql) = &cfg.list_tables {
                queries.list_tables = sql.clone();
            }
            if let Some(sql) = &cfg.list_columns {
                queries.list_columns = sql.clone();
            }
        }
        queries
    }

    /// Check that both queries take the parameters the reader binds.
    pub fn validate(&self, dialect: Dialect) -> Result<()> {
        if placeholder_count(dialect, &self.list_tables) != 1 {
            return Err(DocgenError::Config(format!(
                "catalog.list_tables must take exactly one {} parameter (schema name)",
                placeholder_hint(dialect)
            )));
        }
        if placeholder_count(dialect, &self.list_columns) != 2 {
            return Err(DocgenError::Config(format!(
                "catalog.list_columns must take exactly two {} parameters (schema, table)",
                placeholder_hint(dialect)
            )));
        }
        Ok(())
    }
}

/// Count distinct bind parameters, ignoring text inside single-quoted literals.
fn placeholder_count(dialect: Dialect, sql: &str) -> usize {
    let mut in_literal = false;
    let mut count = 0;
    let mut seen = Vec::new();
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            in_literal = !in_literal;
            continue;
        }
        if in_literal {
            continue;
        }
        match (dialect, c) {
            (Dialect::Mysql, '?') => count += 1,
            (Dialect::Postgres, '$') => {
                let mut digits = String::new();
                while let Some(&d) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    digits.push(d);
                    chars.next();
                }
                if !digits.is_empty() && !seen.contains(&digits) {
                    seen.push(digits);
                    count += 1;
                }
            }
            _ => {}
        }
    }

    count
}

fn placeholder_hint(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Mysql => "'?'",
        Dialect::Postgres => "'$n'",
    }
}
