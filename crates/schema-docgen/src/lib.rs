//! # schema-docgen
//!
//! Renders relational schema metadata into a Word document.
//!
//! Table and column definitions (comments, nullability, defaults) are read
//! from the database catalog and written as one section per table into a copy
//! of a template `.docx`, which supplies all styling. Two catalog dialects are
//! supported:
//!
//! - **MySQL / MariaDB** via `INFORMATION_SCHEMA`
//! - **PostgreSQL and compatible engines** (PanWei, openGauss) via
//!   `information_schema` joined with `pg_description`
//!
//! ## Example
//!
//! ```rust,no_run
//! use schema_docgen::{Config, DocGenerator, ReaderImpl, Target};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> schema_docgen::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let reader = ReaderImpl::connect(&config).await?;
//!     let generator = DocGenerator::with_config(reader, &config);
//!     let target = Target::Schema { schema: "shop".into() };
//!     let report = generator
//!         .generate(&target, &config.document.template, &config.document.output)
//!         .await?;
//!     println!("Wrote {} sections", report.sections.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod docx;
pub mod drivers;
pub mod error;
pub mod generator;
pub mod render;
pub mod typemap;

// Re-exports for convenient access
pub use config::{CatalogConfig, Config, DatabaseConfig, DocumentConfig};
pub use crate::core::{ColumnDescriptor, Dialect, SchemaReader, TableDescriptor};
pub use docx::{DocxTemplate, SchemaDocument};
pub use drivers::{CatalogQueries, MysqlReader, PostgresReader, ReaderImpl};
pub use error::{DocgenError, Result};
pub use generator::{DocGenerator, GenerationReport, Rendered, SkippedTable, Target};
pub use render::{RenderOptions, RenderedSection};
pub use typemap::TypeNormalizer;
