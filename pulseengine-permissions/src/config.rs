//! Serializable permission setup
//!
//! Lets a permission be described in configuration, keyed by mode name:
//!
//! ```json
//! {
//!   "allow": { "CRUD": ["admin"], "Read": ["viewer"] },
//!   "deny":  { "Delete": ["intern"] }
//! }
//! ```
//!
//! `CRUD` entries are applied before the base-mode entries, so here Read
//! holds `["admin", "viewer"]`.

use crate::mode::PermissionMode;
use crate::permission::Permission;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Allow and deny role lists keyed by mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionConfig {
    /// Roles granted per mode
    #[serde(default)]
    pub allow: BTreeMap<PermissionMode, Vec<String>>,

    /// Roles denied per mode
    #[serde(default)]
    pub deny: BTreeMap<PermissionMode, Vec<String>>,
}

impl PermissionConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern for adding allowed roles
    pub fn allow_roles<I, S>(mut self, mode: PermissionMode, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow
            .entry(mode)
            .or_default()
            .extend(roles.into_iter().map(Into::into));
        self
    }

    /// Builder pattern for adding denied roles
    pub fn deny_roles<I, S>(mut self, mode: PermissionMode, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deny
            .entry(mode)
            .or_default()
            .extend(roles.into_iter().map(Into::into));
        self
    }

    /// Build a permission from this configuration.
    ///
    /// Entries go through [`Permission::allow`] and [`Permission::deny`], so
    /// `CRUD` keys are expanded into the base modes. The `CRUD` entry is
    /// applied before the base-mode entries: `{"CRUD": ["admin"], "Read":
    /// ["viewer"]}` stores `["admin", "viewer"]` under Read.
    pub fn build<R>(&self) -> Permission<R> {
        let mut permission = Permission::default();
        for (mode, roles) in crud_first(&self.allow) {
            permission.allow(mode, roles.iter().cloned());
        }
        for (mode, roles) in crud_first(&self.deny) {
            permission.deny(mode, roles.iter().cloned());
        }

        debug!(
            allow_modes = self.allow.len(),
            deny_modes = self.deny.len(),
            "Built permission from config"
        );
        permission
    }
}

fn crud_first(
    lists: &BTreeMap<PermissionMode, Vec<String>>,
) -> impl Iterator<Item = (PermissionMode, &Vec<String>)> {
    let crud = lists
        .get(&PermissionMode::Crud)
        .map(|roles| (PermissionMode::Crud, roles));
    let base = lists
        .iter()
        .filter(|(mode, _)| mode.is_base())
        .map(|(mode, roles)| (*mode, roles));
    crud.into_iter().chain(base)
}

impl<R> From<&Permission<R>> for PermissionConfig {
    fn from(permission: &Permission<R>) -> Self {
        Self {
            allow: permission
                .allow_rules()
                .map(|(mode, roles)| (mode, roles.to_vec()))
                .collect(),
            deny: permission
                .deny_rules()
                .map(|(mode, roles)| (mode, roles.to_vec()))
                .collect(),
        }
    }
}
