//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::core::Dialect;
use crate::error::{DocgenError, Result};
use std::path::Path;

impl Config {
    /// Load and validate configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::parse_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML file without validating it, so callers can apply
    /// overrides before calling [`Config::validate`].
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DocgenError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Dialect named by `database.type`.
    pub fn dialect(&self) -> Result<Dialect> {
        Dialect::from_db_type(&self.database.r#type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
database:
  type: postgres
  host: localhost
  database: shop
  user: docs
  password: secret
"#;

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let config = Config::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.dialect().unwrap(), Dialect::Postgres);
        assert_eq!(config.database.port, None);
        assert_eq!(config.database.ssl_mode, "disable");
        assert_eq!(config.document.template, Path::new("template.docx"));
        assert_eq!(config.document.output, Path::new("schema.docx"));
        assert_eq!(config.document.heading_style, "1");
        assert_eq!(config.document.table_width, 8000);
        assert!(config.catalog.is_none());
        assert!(config.type_aliases.is_empty());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
database:
  type: mysql
  host: db.internal
  port: 3307
  database: shop
  user: docs
  password: secret
  ssl_mode: require
document:
  template: styles/base.docx
  output: out/shop.docx
  heading_style: Heading1
  table_width: 9000
catalog:
  list_tables: "SELECT table_name, table_comment FROM information_schema.tables WHERE table_schema = ?"
type_aliases:
  "tinyint(1)": bool
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.dialect().unwrap(), Dialect::Mysql);
        assert_eq!(config.database.port, Some(3307));
        assert_eq!(config.document.heading_style, "Heading1");
        assert_eq!(config.document.table_width, 9000);
        assert!(config.catalog.as_ref().unwrap().list_columns.is_none());
        assert_eq!(config.type_aliases.get("tinyint(1)").unwrap(), "bool");
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(Config::from_yaml("database: [").is_err());
    }

    #[test]
    fn test_parse_file_defers_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"database:\n  type: oracle\n  host: localhost\n  database: shop\n  user: docs\n",
        )
        .unwrap();

        assert!(Config::load(file.path()).is_err());

        let mut config = Config::parse_file(file.path()).unwrap();
        assert!(config.validate().is_err());
        config.database.r#type = "postgres".to_string();
        config.validate().unwrap();
        assert_eq!(config.dialect().unwrap(), Dialect::Postgres);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Config::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, DocgenError::Config(_)));
        assert_eq!(err.exit_code(), 2);
    }
}
