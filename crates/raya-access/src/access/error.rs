//! Access command errors

use super::USAGE;
use crate::identity::IdentityError;
use crate::manifest::ManifestError;
use crate::registry::RegistryError;
use std::fmt;
use thiserror::Error;

/// Ordinal position of a positional argument, used in usage messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgPosition {
    First,
    Second,
}

impl fmt::Display for ArgPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArgPosition::First => "First",
            ArgPosition::Second => "Second",
        })
    }
}

/// Errors produced while routing an access command
///
/// Everything except `Registry` and `Identity` is detected before the
/// registry client is called.
#[derive(Debug, Error)]
pub enum AccessError {
    /// No subcommand given
    #[error("Usage: Subcommand is required.\n\n{}", USAGE)]
    SubcommandMissing,

    /// Subcommand not in the known set
    #[error("Usage: {0} is not a recognized subcommand.\n\n{}", USAGE)]
    SubcommandUnrecognized(String),

    /// `edit` was invoked
    #[error("edit subcommand is not implemented yet")]
    NotImplemented,

    /// `public`/`restricted` on an unscoped package
    #[error("Usage: This command is only available for scoped packages.")]
    ScopeRequired(String),

    /// No explicit package and no manifest in the working directory
    #[error("no package name passed to command and no raya.toml found")]
    PackageUnresolvable,

    /// Manifest present but malformed
    #[error(transparent)]
    ManifestParseError(ManifestError),

    /// Manifest present but could not be read
    #[error(transparent)]
    ManifestUnreadable(ManifestError),

    /// `grant` permission is not `read-only` or `read-write`
    #[error("Usage: First argument must be either `read-only` or `read-write`.")]
    PermissionInvalid(Option<String>),

    /// Team argument absent
    #[error("Usage: `<scope:team>` argument is required.")]
    TeamMissing,

    /// Team argument present but not `scope:team`
    #[error("Usage: {position} argument used incorrect format.\nExample: @example:developers")]
    TeamMalformed { position: ArgPosition, value: String },

    /// Completion requested for an unknown subcommand
    #[error("{0} not recognized")]
    CompletionUnrecognized(String),

    /// Registry call failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Caller identity could not be determined
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl AccessError {
    /// Whether this is an argument error (`Usage: ...`)
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            AccessError::SubcommandMissing
                | AccessError::SubcommandUnrecognized(_)
                | AccessError::ScopeRequired(_)
                | AccessError::PermissionInvalid(_)
                | AccessError::TeamMissing
                | AccessError::TeamMalformed { .. }
        )
    }
}

impl From<ManifestError> for AccessError {
    fn from(err: ManifestError) -> Self {
        match err {
            ManifestError::NotFound(_) => AccessError::PackageUnresolvable,
            err if err.is_malformed() => AccessError::ManifestParseError(err),
            err => AccessError::ManifestUnreadable(err),
        }
    }
}
