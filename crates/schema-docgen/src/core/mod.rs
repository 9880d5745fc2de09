//! Core abstractions shared by readers, renderer and generator.
//!
//! - [`dialect`]: supported catalog dialects
//! - [`schema`]: table and column metadata types
//! - [`traits`]: the [`SchemaReader`] contract implemented by each driver

pub mod dialect;
pub mod schema;
pub mod traits;

pub use dialect::Dialect;
pub use schema::{normalize_comment, ColumnDescriptor, TableDescriptor};
pub use traits::SchemaReader;
