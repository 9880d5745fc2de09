//! PostgreSQL driver.
//!
//! - [`PostgresReader`]: catalog reader for PostgreSQL and compatible engines

mod reader;

pub use reader::PostgresReader;
