//! Folder operations.

pub mod service;

pub use service::{CreateFolderRequest, FolderContent, FolderService};
