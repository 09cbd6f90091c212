//! Enumerated option values and their external tokens.
//!
//! Documents spell these the same way the designer does (`ReadOnly`,
//! `ObjectNotSupported`, ...), so a token read from a file can be checked
//! against the tool's own help text.

use std::fmt;

use serde::{Deserialize, Serialize};
use v8_args_core::{Encode, EncodeError};

/// Rights granted to a repository user (`-Rights`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepositoryRight {
    /// View only.
    ReadOnly,
    /// May lock objects.
    LockObjects,
    /// May change the set of stored versions.
    ManageConfigurationVersions,
    /// Administrative functions.
    Administration,
}

impl RepositoryRight {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryRight::ReadOnly => "ReadOnly",
            RepositoryRight::LockObjects => "LockObjects",
            RepositoryRight::ManageConfigurationVersions => "ManageConfigurationVersions",
            RepositoryRight::Administration => "Administration",
        }
    }
}

/// Support rule applied to vendor objects when a repository is created
/// (`-ChangesAllowedRule`, `-ChangesNotRecommendedRule`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportRule {
    /// The vendor object is not editable.
    ObjectNotEditable,
    /// The vendor object is editable and stays on support.
    ObjectIsEditableSupportEnabled,
    /// The vendor object is taken off support.
    ObjectNotSupported,
}

impl SupportRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportRule::ObjectNotEditable => "ObjectNotEditable",
            SupportRule::ObjectIsEditableSupportEnabled => "ObjectIsEditableSupportEnabled",
            SupportRule::ObjectNotSupported => "ObjectNotSupported",
        }
    }
}

/// Grouping of a repository history report. Rendered as a bare token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupBy {
    Object,
    Comment,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Object => "-GroupByObject",
            GroupBy::Comment => "-GroupByComment",
        }
    }
}

macro_rules! encode_as_str {
    ($($ty:ty),* $(,)?) => {$(
        impl Encode for $ty {
            fn encode(&self) -> Result<String, EncodeError> {
                Ok(self.as_str().to_string())
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

encode_as_str!(RepositoryRight, SupportRule, GroupBy);
