//! Adapter traits implemented outside this crate.

pub mod object_store;

pub use object_store::{ByteStream, ObjectStore};
