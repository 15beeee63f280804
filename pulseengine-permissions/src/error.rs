//! Permission errors

use thiserror::Error;

/// Errors surfaced by the permission crate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// Sentinel for embedders that turn a negative decision into a failure.
    ///
    /// Nothing in this crate returns it on its own; see
    /// [`PermissionError::denied_unless`].
    #[error("permission denied")]
    PermissionDenied,

    /// A mode name that is not one of `Read`, `Update`, `Create`, `Delete`, `CRUD`
    #[error("Unknown permission mode: {0}")]
    UnknownMode(String),
}

impl PermissionError {
    /// Convert a decision into `Ok(())` or [`PermissionError::PermissionDenied`]
    ///
    /// ```
    /// use pulseengine_permissions::{Permission, PermissionError, PermissionMode};
    ///
    /// let mut permission = Permission::new();
    /// permission.allow(PermissionMode::Read, ["admin"]);
    ///
    /// let decision = permission.has_permission(PermissionMode::Read, &["guest"]);
    /// assert_eq!(
    ///     PermissionError::denied_unless(decision),
    ///     Err(PermissionError::PermissionDenied)
    /// );
    /// ```
    pub fn denied_unless(allowed: bool) -> Result<(), Self> {
        if allowed {
            Ok(())
        } else {
            Err(Self::PermissionDenied)
        }
    }
}
