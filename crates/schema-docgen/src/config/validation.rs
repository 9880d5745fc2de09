//! Configuration validation.

use super::Config;
use crate::drivers::{CatalogQueries, SslMode};
use crate::error::{DocgenError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    let dialect = config.dialect()?;

    if config.database.host.is_empty() {
        return Err(DocgenError::Config("database.host is required".into()));
    }
    if config.database.database.is_empty() {
        return Err(DocgenError::Config("database.database is required".into()));
    }
    if config.database.user.is_empty() {
        return Err(DocgenError::Config("database.user is required".into()));
    }
    if let Some(0) = config.database.port {
        return Err(DocgenError::Config("database.port must be non-zero".into()));
    }
    SslMode::parse(&config.database.ssl_mode)?;

    if config.document.template.as_os_str().is_empty() {
        return Err(DocgenError::Config("document.template is required".into()));
    }
    if config.document.output.as_os_str().is_empty() {
        return Err(DocgenError::Config("document.output is required".into()));
    }
    if config.document.template == config.document.output {
        return Err(DocgenError::Config(
            "document.output must differ from document.template".into(),
        ));
    }
    if config.document.heading_style.trim().is_empty() {
        return Err(DocgenError::Config(
            "document.heading_style must not be empty".into(),
        ));
    }
    if config.document.table_width == 0 {
        return Err(DocgenError::Config(
            "document.table_width must be at least 1".into(),
        ));
    }

    if config.catalog.is_some() {
        CatalogQueries::with_overrides(dialect, config.catalog.as_ref()).validate(dialect)?;
    }

    if let Some((raw, _)) = config
        .type_aliases
        .iter()
        .find(|(raw, display)| raw.trim().is_empty() || display.trim().is_empty())
    {
        return Err(DocgenError::Config(format!(
            "type_aliases entry '{}' must map a non-empty type to a non-empty name",
            raw
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, DatabaseConfig, DocumentConfig};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn valid_config() -> Config {
        Config {
            database: DatabaseConfig {
                r#type: "postgres".to_string(),
                host: "localhost".to_string(),
                port: Some(5432),
                database: "shop".to_string(),
                user: "docs".to_string(),
                password: "password".to_string(),
                ssl_mode: "disable".to_string(),
            },
            document: DocumentConfig::default(),
            catalog: None,
            type_aliases: BTreeMap::new(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_host() {
        let mut config = valid_config();
        config.database.host = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unknown_dialect() {
        let mut config = valid_config();
        config.database.r#type = "oracle".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_ssl_mode() {
        let mut config = valid_config();
        config.database.ssl_mode = "sometimes".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_table_width() {
        let mut config = valid_config();
        config.document.table_width = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_output_cannot_overwrite_template() {
        let mut config = valid_config();
        config.document.output = PathBuf::from("template.docx");
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_catalog_override_needs_placeholders() {
        let mut config = valid_config();
        config.catalog = Some(CatalogConfig {
            list_tables: Some("SELECT relname, NULL FROM pg_class".into()),
            list_columns: None,
        });
        assert!(validate(&config).is_err());

        config.catalog = Some(CatalogConfig {
            list_tables: Some("SELECT relname, NULL FROM my_tables WHERE nsp = $1".into()),
            list_columns: None,
        });
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_blank_type_alias() {
        let mut config = valid_config();
        config.type_aliases.insert("bigint".into(), " ".into());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_database_config_debug_redacts_password() {
        let mut config = valid_config();
        config.database.password = "super_secret_password_123".to_string();
        let debug_output = format!("{:?}", config.database);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_password_123"));
    }
}
