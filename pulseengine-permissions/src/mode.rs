//! Permission modes
//!
//! Four base operations plus the `CRUD` shorthand. `CRUD` is only meaningful
//! when writing rules; it is expanded into the base modes before anything is
//! stored.

use crate::error::PermissionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operation a permission rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PermissionMode {
    /// Read access
    Read,
    /// Update access
    Update,
    /// Create access
    Create,
    /// Delete access
    Delete,
    /// All four base modes at once
    #[serde(rename = "CRUD")]
    Crud,
}

impl PermissionMode {
    /// The base modes, in declaration order
    pub const BASE: [PermissionMode; 4] = [Self::Read, Self::Update, Self::Create, Self::Delete];

    /// Well-known names for config or string driven setup
    pub const ALL: [(&'static str, PermissionMode); 5] = [
        ("Read", Self::Read),
        ("Update", Self::Update),
        ("Create", Self::Create),
        ("Delete", Self::Delete),
        ("CRUD", Self::Crud),
    ];

    /// Bit pattern of the mode. `Crud` is the union of the four base bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Read => 1 << 31,
            Self::Update => 1 << 30,
            Self::Create => 1 << 29,
            Self::Delete => 1 << 28,
            Self::Crud => {
                Self::Read.bits() | Self::Update.bits() | Self::Create.bits() | Self::Delete.bits()
            }
        }
    }

    /// Whether this is one of the four base modes
    pub const fn is_base(self) -> bool {
        !matches!(self, Self::Crud)
    }

    /// Base modes this mode stands for when rules are written
    pub fn expand(self) -> &'static [PermissionMode] {
        match self {
            Self::Read => &[Self::Read],
            Self::Update => &[Self::Update],
            Self::Create => &[Self::Create],
            Self::Delete => &[Self::Delete],
            Self::Crud => &[Self::Create, Self::Update, Self::Read, Self::Delete],
        }
    }

    /// Canonical name, as listed in [`PermissionMode::ALL`]
    pub fn name(self) -> &'static str {
        match self {
            Self::Read => "Read",
            Self::Update => "Update",
            Self::Create => "Create",
            Self::Delete => "Delete",
            Self::Crud => "CRUD",
        }
    }

    /// Look up a mode by its canonical (case-sensitive) name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, mode)| *mode)
    }
}

impl fmt::Display for PermissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PermissionMode {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PermissionError::UnknownMode(s.to_string()))
    }
}
