//! Allow/deny role lists and the permission decision
//!
//! A [`Permission`] keeps, per base mode, the role names explicitly allowed
//! and the role names explicitly denied. Deny rules always win. A permission
//! without any allow rule is open: every mode is granted unless denied.
//!
//! ```
//! use pulseengine_permissions::{Permission, PermissionMode};
//!
//! let mut permission = Permission::new();
//! permission
//!     .allow(PermissionMode::Crud, ["admin"])
//!     .allow(PermissionMode::Read, ["viewer"])
//!     .deny(PermissionMode::Delete, ["intern"]);
//!
//! assert!(permission.has_permission(PermissionMode::Read, &["viewer"]));
//! assert!(permission.has_permission(PermissionMode::Delete, &["admin"]));
//! assert!(!permission.has_permission(PermissionMode::Delete, &["admin", "intern"]));
//! assert!(!permission.has_permission(PermissionMode::Update, &["viewer"]));
//! ```

use crate::mode::PermissionMode;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

type RoleLists = BTreeMap<PermissionMode, Vec<String>>;

/// Authorization rules for a single resource
///
/// `R` is the embedder's role context type. It is carried along as an
/// optional shared back-reference and never consulted by
/// [`has_permission`](Permission::has_permission).
pub struct Permission<R = ()> {
    role: Option<Arc<R>>,
    allow_roles: RoleLists,
    deny_roles: RoleLists,
}

impl Permission {
    /// Create an empty permission without a role context.
    ///
    /// Only available for the default `R = ()`. With a role context type, use
    /// [`Permission::with_role`] or `Permission::<R>::default()`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R> Permission<R> {
    /// Create an empty permission owned by `role`.
    ///
    /// This is the constructor for any role context type. An empty
    /// permission of that type without a context comes from
    /// `Permission::<R>::default()`.
    pub fn with_role(role: Arc<R>) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    /// Grant `mode` to every role in `roles`.
    ///
    /// `Crud` appends the roles to Create, Update, Read and Delete. Names are
    /// stored as given: empty strings and repeats are kept. Calling this with
    /// no roles still registers an (empty) allow rule for the mode, which
    /// turns off the open default.
    pub fn allow<I, S>(&mut self, mode: PermissionMode, roles: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: Vec<String> = roles.into_iter().map(Into::into).collect();
        trace!(%mode, ?roles, "Adding allow rule");
        append_expanded(&mut self.allow_roles, mode, &roles);
        self
    }

    /// Deny `mode` to every role in `roles`. Same expansion rules as
    /// [`allow`](Permission::allow).
    pub fn deny<I, S>(&mut self, mode: PermissionMode, roles: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: Vec<String> = roles.into_iter().map(Into::into).collect();
        trace!(%mode, ?roles, "Adding deny rule");
        append_expanded(&mut self.deny_roles, mode, &roles);
        self
    }

    /// Combine `self` with `other` into a new permission.
    ///
    /// Equivalent to `Permission::merge(Some(self), Some(other))`: role lists
    /// hold `other`'s entries followed by `self`'s, and the role context is
    /// the one of `self`.
    pub fn concat(&self, other: &Permission<R>) -> Permission<R> {
        Self::merge(Some(self), Some(other))
    }

    /// Merge two optional permissions into a new one.
    ///
    /// `other` is applied first, then `current`. For every base mode the
    /// resulting allow and deny lists are `other`'s entries followed by
    /// `current`'s. Each present input overwrites the role context, so
    /// `current`'s context wins whenever `current` is present, even if it is
    /// `None`. An absent input contributes nothing.
    pub fn merge(
        current: Option<&Permission<R>>,
        other: Option<&Permission<R>>,
    ) -> Permission<R> {
        let mut result = Permission::default();

        for permission in [other, current].into_iter().flatten() {
            result.role = permission.role.clone();
            extend_lists(&mut result.deny_roles, &permission.deny_roles);
            extend_lists(&mut result.allow_roles, &permission.allow_roles);
        }

        trace!(
            allow_modes = result.allow_roles.len(),
            deny_modes = result.deny_roles.len(),
            "Merged permissions"
        );
        result
    }

    /// Decide whether any of `roles` may perform `mode`.
    ///
    /// 1. If a deny rule for `mode` names one of `roles`, the answer is `false`.
    /// 2. If no allow rule exists for any mode, the answer is `true`.
    /// 3. Otherwise the allow rule for `mode` must name one of `roles`.
    ///
    /// Role names are compared exactly (case-sensitive).
    ///
    /// `Crud` is not expanded here. Rules are only stored under base modes,
    /// so a `Crud` query never matches a deny or allow rule and is granted
    /// only by the open default.
    pub fn has_permission<S: AsRef<str>>(&self, mode: PermissionMode, roles: &[S]) -> bool {
        let allowed = self.decide(mode, roles);
        debug!(%mode, roles = roles.len(), allowed, "Checked permission");
        allowed
    }

    fn decide<S: AsRef<str>>(&self, mode: PermissionMode, roles: &[S]) -> bool {
        if let Some(denied) = self.deny_roles.get(&mode) {
            if shares_role(denied, roles) {
                return false;
            }
        }

        if self.allow_roles.is_empty() {
            return true;
        }

        self.allow_roles
            .get(&mode)
            .is_some_and(|allowed| shares_role(allowed, roles))
    }

    /// Roles explicitly allowed for `mode`, in insertion order
    pub fn allowed_roles(&self, mode: PermissionMode) -> &[String] {
        self.allow_roles.get(&mode).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Roles explicitly denied for `mode`, in insertion order
    pub fn denied_roles(&self, mode: PermissionMode) -> &[String] {
        self.deny_roles.get(&mode).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Allow rules by base mode
    pub fn allow_rules(&self) -> impl Iterator<Item = (PermissionMode, &[String])> {
        self.allow_roles
            .iter()
            .map(|(mode, roles)| (*mode, roles.as_slice()))
    }

    /// Deny rules by base mode
    pub fn deny_rules(&self) -> impl Iterator<Item = (PermissionMode, &[String])> {
        self.deny_roles
            .iter()
            .map(|(mode, roles)| (*mode, roles.as_slice()))
    }

    /// Whether any allow rule has been registered
    pub fn has_allow_rules(&self) -> bool {
        !self.allow_roles.is_empty()
    }

    /// Whether any deny rule has been registered
    pub fn has_deny_rules(&self) -> bool {
        !self.deny_roles.is_empty()
    }

    /// True when neither allow nor deny rules exist
    pub fn is_empty(&self) -> bool {
        self.allow_roles.is_empty() && self.deny_roles.is_empty()
    }

    /// Owning role context, if any
    pub fn role(&self) -> Option<&Arc<R>> {
        self.role.as_ref()
    }

    /// Replace the owning role context
    pub fn set_role(&mut self, role: Option<Arc<R>>) {
        self.role = role;
    }
}

/// Empty and open, with no role context, for any `R`
impl<R> Default for Permission<R> {
    fn default() -> Self {
        Self {
            role: None,
            allow_roles: RoleLists::new(),
            deny_roles: RoleLists::new(),
        }
    }
}

impl<R> Clone for Permission<R> {
    fn clone(&self) -> Self {
        Self {
            role: self.role.clone(),
            allow_roles: self.allow_roles.clone(),
            deny_roles: self.deny_roles.clone(),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Permission<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Permission")
            .field("role", &self.role)
            .field("allow_roles", &self.allow_roles)
            .field("deny_roles", &self.deny_roles)
            .finish()
    }
}

fn append_expanded(lists: &mut RoleLists, mode: PermissionMode, roles: &[String]) {
    for base in mode.expand() {
        lists.entry(*base).or_default().extend_from_slice(roles);
    }
}

fn extend_lists(target: &mut RoleLists, source: &RoleLists) {
    for (mode, roles) in source {
        target.entry(*mode).or_default().extend_from_slice(roles);
    }
}

fn shares_role<S: AsRef<str>>(rule_roles: &[String], roles: &[S]) -> bool {
    rule_roles
        .iter()
        .any(|rule_role| roles.iter().any(|role| role.as_ref() == rule_role))
}
