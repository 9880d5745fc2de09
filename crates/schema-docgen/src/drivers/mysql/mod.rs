//! MySQL/MariaDB driver.
//!
//! - [`MysqlReader`]: catalog reader over `INFORMATION_SCHEMA`
//!
//! # Supported Versions
//!
//! - MySQL 5.7+, 8.0+
//! - MariaDB 10.2+

mod reader;

pub use reader::MysqlReader;
