//! # drivebox-storage
//!
//! Object store implementations for Drivebox: an S3-compatible backend
//! (AWS S3 or MinIO) and an in-memory backend for tests.

pub mod memory;
pub mod s3;

pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;

/// Chunk size used when streaming blob content to callers.
pub const DOWNLOAD_CHUNK_SIZE: usize = 32 * 1024;
