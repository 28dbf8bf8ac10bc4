//! Folder references as they arrive from callers.
//!
//! Callers address folder slots either by ID or with the conventional
//! `"root"` sentinel meaning "top level, no parent".

use drivebox_core::types::FolderId;
use drivebox_core::{AppError, AppResult};

/// The `"root"` sentinel accepted wherever a folder ID is expected.
pub const ROOT_SENTINEL: &str = "root";

/// A caller-supplied reference to a folder slot in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderRef {
    /// The top level (no parent folder).
    Root,
    /// A concrete folder.
    Folder(FolderId),
}

impl FolderRef {
    /// Parse a raw reference: `"root"` or a folder UUID.
    ///
    /// Anything else is a validation error, never a lookup miss.
    pub fn parse(value: &str) -> AppResult<Self> {
        if value == ROOT_SENTINEL {
            return Ok(Self::Root);
        }
        value
            .parse::<FolderId>()
            .map(Self::Folder)
            .map_err(|_| AppError::validation(format!("Invalid folder id: {value}")))
    }

    /// Parse an optional raw reference, passing absence through.
    pub fn parse_opt(value: Option<&str>) -> AppResult<Option<Self>> {
        value.map(Self::parse).transpose()
    }

    /// The concrete folder ID, if this is not the root.
    pub fn folder_id(&self) -> Option<FolderId> {
        match self {
            Self::Root => None,
            Self::Folder(id) => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivebox_core::error::ErrorKind;

    #[test]
    fn test_root_sentinel() {
        assert_eq!(FolderRef::parse("root").unwrap(), FolderRef::Root);
        assert_eq!(FolderRef::Root.folder_id(), None);
    }

    #[test]
    fn test_uuid_reference() {
        let id = FolderId::new();
        let parsed = FolderRef::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, FolderRef::Folder(id));
        assert_eq!(parsed.folder_id(), Some(id));
    }

    #[test]
    fn test_malformed_is_validation_error() {
        let err = FolderRef::parse("definitely-not-a-uuid").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_parse_opt_passes_none_through() {
        assert_eq!(FolderRef::parse_opt(None).unwrap(), None);
        assert_eq!(
            FolderRef::parse_opt(Some("root")).unwrap(),
            Some(FolderRef::Root)
        );
    }
}
