//! File operations.

pub mod download;
pub mod service;
pub mod upload;

pub use download::{DownloadResult, DownloadService};
pub use service::FileService;
pub use upload::{UploadParams, UploadService};
