//! # drivebox-database
//!
//! Metadata persistence for Drivebox. Defines the store traits the
//! hierarchy engine depends on ([`store`]), their PostgreSQL
//! implementations ([`repositories`]), and in-memory implementations
//! ([`memory`]) for tests and single-process use.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{FileStore, FolderScope, FolderStore, UserStore};
