//! Role-based permissions for CRUD operations
//!
//! This crate provides a small authorization primitive meant to be embedded in
//! a resource (a field, a record, an endpoint):
//! - Per-mode allow and deny lists of role names
//! - `CRUD` shorthand that expands into Read, Update, Create and Delete
//! - Merging of two permission sets
//! - A deny-first decision with an open default
//!
//! Role membership is resolved elsewhere; the decision receives role names as
//! plain strings.
//!
//! # Quick Start
//!
//! ```rust
//! use pulseengine_permissions::{Permission, PermissionError, PermissionMode};
//!
//! let mut defaults = Permission::new();
//! defaults.allow(PermissionMode::Read, ["viewer"]);
//!
//! let mut overrides = Permission::new();
//! overrides
//!     .allow(PermissionMode::Crud, ["admin"])
//!     .deny(PermissionMode::Read, ["suspended"]);
//!
//! let permission = overrides.concat(&defaults);
//!
//! assert!(permission.has_permission(PermissionMode::Read, &["viewer"]));
//! assert!(permission.has_permission(PermissionMode::Delete, &["admin"]));
//! assert!(!permission.has_permission(PermissionMode::Read, &["viewer", "suspended"]));
//!
//! let decision = permission.has_permission(PermissionMode::Update, &["viewer"]);
//! assert_eq!(
//!     PermissionError::denied_unless(decision),
//!     Err(PermissionError::PermissionDenied)
//! );
//! ```
//!
//! # Configuration
//!
//! [`PermissionConfig`] describes the same rules in serializable form, keyed by
//! the names in [`PermissionMode::ALL`].

pub mod config;
pub mod error;
pub mod mode;
pub mod permission;

pub use config::PermissionConfig;
pub use error::PermissionError;
pub use mode::PermissionMode;
pub use permission::Permission;

/// Result type for permission operations
pub type Result<T> = std::result::Result<T, PermissionError>;
