//! Configuration type definitions.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database to introspect.
    pub database: DatabaseConfig,

    /// Template and output document settings.
    #[serde(default)]
    pub document: DocumentConfig,

    /// Optional replacement catalog queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogConfig>,

    /// Extra raw type -> display type pairs, merged over the dialect's table.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub type_aliases: BTreeMap<String, String>,
}

/// Database connection configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database type: mysql or postgres (default: "mysql").
    #[serde(default = "default_mysql")]
    pub r#type: String,

    /// Database host.
    pub host: String,

    /// Database port. Defaults to the dialect's standard port when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Database name.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,

    /// SSL mode (default: "disable").
    #[serde(default = "default_disable")]
    pub ssl_mode: String,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("type", &self.r#type)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

/// Template and output document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Template .docx supplying paragraph and table styles (default: "template.docx").
    #[serde(default = "default_template")]
    pub template: PathBuf,

    /// Output .docx path (default: "schema.docx").
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Style id applied to section headings (default: "1").
    #[serde(default = "default_heading_style")]
    pub heading_style: String,

    /// Table width in twentieths of a point (default: 8000).
    #[serde(default = "default_table_width")]
    pub table_width: u32,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            output: default_output(),
            heading_style: default_heading_style(),
            table_width: default_table_width(),
        }
    }
}

/// Catalog query overrides. Each field replaces the dialect's built-in SQL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Table listing query, parameterized by schema name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_tables: Option<String>,

    /// Column listing query, parameterized by schema and table name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_columns: Option<String>,
}

fn default_mysql() -> String {
    "mysql".to_string()
}

fn default_disable() -> String {
    "disable".to_string()
}

fn default_template() -> PathBuf {
    PathBuf::from("template.docx")
}

fn default_output() -> PathBuf {
    PathBuf::from("schema.docx")
}

fn default_heading_style() -> String {
    "1".to_string()
}

fn default_table_width() -> u32 {
    8000
}
