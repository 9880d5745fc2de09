//! Utilities shared by the MySQL and PostgreSQL readers.
//!
//! - [`tls`]: SSL mode parsing and rustls connector setup

pub mod tls;

pub use tls::{SslMode, TlsBuilder};
