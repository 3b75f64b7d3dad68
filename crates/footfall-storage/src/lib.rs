//! # footfall-storage
//!
//! SQLite persistence layer for the Footfall analytics service.
//! WAL mode, one writer + pooled read-only readers, schema migrations,
//! and the aggregation queries the HTTP boundary serves.
//!
//! The aggregation engine is read-only: the fact tables are appended by
//! the bulk importer and never mutated here.

pub mod migrations;
pub mod pool;
pub mod pragmas;
pub mod queries;
pub mod schema;

pub use pool::ConnectionPool;

// Callers name `rusqlite::Connection` in `with_reader`/`with_writer`
// closures without taking their own rusqlite dependency.
pub use rusqlite;
