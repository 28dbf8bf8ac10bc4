//! # drivebox-service
//!
//! The hierarchy engine: folder/file CRUD, materialized-path maintenance,
//! recursive move/copy/delete, and the ownership guard. Services receive
//! their adapters (`FolderStore`, `FileStore`, `ObjectStore`) at
//! construction time via `Arc` references; nothing here owns a connection.

pub mod context;
pub mod file;
pub mod folder;
pub mod selector;

mod guard;
mod paths;

pub use context::Principal;
pub use file::{DownloadResult, DownloadService, FileService, UploadParams, UploadService};
pub use folder::{CreateFolderRequest, FolderContent, FolderService};
pub use selector::FolderRef;
