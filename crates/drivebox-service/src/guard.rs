//! The ownership guard — the only access-control policy in the system.
//!
//! Absent entities, ownerless rows, and entities owned by someone else all
//! come back as NotFound. Returning Forbidden instead would confirm the
//! resource exists to a caller who may not see it.

use drivebox_core::{AppError, AppResult};
use drivebox_entity::{File, Folder};

use crate::context::Principal;

/// An entity carrying an optional owner stamp.
pub(crate) trait Owned {
    fn owner(&self) -> Option<&str>;
}

impl Owned for Folder {
    fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}

impl Owned for File {
    fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}

/// Authorize access to a (possibly absent) entity.
///
/// `missing` is the message used for every denial, so that callers cannot
/// distinguish "does not exist" from "not yours".
pub(crate) fn authorize<R: Owned>(
    resource: Option<R>,
    principal: &Principal,
    missing: &str,
) -> AppResult<R> {
    let resource = resource.ok_or_else(|| AppError::not_found(missing))?;
    if principal.is_admin {
        return Ok(resource);
    }
    match resource.owner() {
        Some(owner) if owner == principal.username => Ok(resource),
        _ => Err(AppError::not_found(missing)),
    }
}
