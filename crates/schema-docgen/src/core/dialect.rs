//! Supported catalog dialects.

use std::fmt;

use crate::error::{DocgenError, Result};

/// Catalog-query dialect of the database being documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// MySQL / MariaDB: comments live in `information_schema` itself.
    Mysql,
    /// PostgreSQL and compatible engines (PanWei, openGauss): comments come
    /// from `pg_description`, joined by object id and column position.
    Postgres,
}

impl Dialect {
    /// Parse a dialect from a database type string.
    ///
    /// # Errors
    ///
    /// Returns an error if the database type is not recognized.
    pub fn from_db_type(db_type: &str) -> Result<Self> {
        match db_type.trim().to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::Mysql),
            "postgres" | "postgresql" | "pg" | "panwei" | "opengauss" => Ok(Dialect::Postgres),
            other => Err(DocgenError::Config(format!(
                "Unknown database type: '{}'. Supported types: mysql, postgres",
                other
            ))),
        }
    }

    /// Canonical dialect name.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Mysql => "mysql",
            Dialect::Postgres => "postgres",
        }
    }

    /// Port used when the configuration leaves it unset.
    pub fn default_port(&self) -> u16 {
        match self {
            Dialect::Mysql => 3306,
            Dialect::Postgres => 5432,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_db_type() {
        assert_eq!(Dialect::from_db_type("mysql").unwrap(), Dialect::Mysql);
        assert_eq!(Dialect::from_db_type("MariaDB").unwrap(), Dialect::Mysql);
        assert_eq!(Dialect::from_db_type("postgres").unwrap(), Dialect::Postgres);
        assert_eq!(Dialect::from_db_type("panwei").unwrap(), Dialect::Postgres);
        assert_eq!(Dialect::from_db_type(" pg ").unwrap(), Dialect::Postgres);
        assert!(Dialect::from_db_type("mssql").is_err());
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(Dialect::Mysql.default_port(), 3306);
        assert_eq!(Dialect::Postgres.default_port(), 5432);
    }
}
