//! Access subcommands and their typed arguments
//!
//! Parsing turns positional slots into an [`AccessCommand`]. All argument
//! validation happens here so that no registry call is made for bad input.

use super::error::{AccessError, ArgPosition};
use crate::registry::{PermissionLevel, TeamRef};
use std::fmt;
use std::str::FromStr;

/// Usage summary shown with subcommand errors
pub const USAGE: &str = "\
raya-access public [<package>]
raya-access restricted [<package>]
raya-access grant <read-only|read-write> <scope:team> [<package>]
raya-access revoke <scope:team> [<package>]
raya-access 2fa-required [<package>]
raya-access 2fa-not-required [<package>]
raya-access ls-packages [<user>|<scope>|<scope:team>]
raya-access ls-collaborators [<package> [<user>]]
raya-access edit [<package>]";

/// Known `access` subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subcommand {
    Public,
    Restricted,
    Grant,
    Revoke,
    LsPackages,
    LsCollaborators,
    Edit,
    TfaRequired,
    TfaNotRequired,
}

impl Subcommand {
    /// All subcommands, in completion order
    pub const ALL: [Subcommand; 9] = [
        Subcommand::Public,
        Subcommand::Restricted,
        Subcommand::Grant,
        Subcommand::Revoke,
        Subcommand::LsPackages,
        Subcommand::LsCollaborators,
        Subcommand::Edit,
        Subcommand::TfaRequired,
        Subcommand::TfaNotRequired,
    ];

    /// Names of [`Subcommand::ALL`], same order
    pub const NAMES: [&'static str; 9] = [
        "public",
        "restricted",
        "grant",
        "revoke",
        "ls-packages",
        "ls-collaborators",
        "edit",
        "2fa-required",
        "2fa-not-required",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Subcommand::Public => "public",
            Subcommand::Restricted => "restricted",
            Subcommand::Grant => "grant",
            Subcommand::Revoke => "revoke",
            Subcommand::LsPackages => "ls-packages",
            Subcommand::LsCollaborators => "ls-collaborators",
            Subcommand::Edit => "edit",
            Subcommand::TfaRequired => "2fa-required",
            Subcommand::TfaNotRequired => "2fa-not-required",
        }
    }
}

impl FromStr for Subcommand {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subcommand::ALL
            .into_iter()
            .find(|cmd| cmd.as_str() == s)
            .ok_or_else(|| AccessError::SubcommandUnrecognized(s.to_string()))
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments for subcommands taking only an optional package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageArgs {
    pub package: Option<String>,
}

/// `grant <permission> <scope:team> [<package>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantArgs {
    pub permission: PermissionLevel,
    pub team: TeamRef,
    pub package: Option<String>,
}

/// `revoke <scope:team> [<package>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokeArgs {
    pub team: TeamRef,
    pub package: Option<String>,
}

/// `ls-packages [<entity>]`; `None` means the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LsPackagesArgs {
    pub entity: Option<String>,
}

/// `ls-collaborators [<package> [<user>]]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LsCollaboratorsArgs {
    pub package: Option<String>,
    pub user: Option<String>,
}

/// A validated access command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessCommand {
    Public(PackageArgs),
    Restricted(PackageArgs),
    Grant(GrantArgs),
    Revoke(RevokeArgs),
    TfaRequired(PackageArgs),
    TfaNotRequired(PackageArgs),
    LsPackages(LsPackagesArgs),
    LsCollaborators(LsCollaboratorsArgs),
}

impl AccessCommand {
    /// Parse `[subcommand, args...]`
    ///
    /// Slots are `Option` so an absent argument can be told apart from an
    /// empty string. `edit` is rejected here, whatever its arguments.
    pub fn parse(argv: &[Option<&str>]) -> Result<Self, AccessError> {
        let name = match argv.first().copied().flatten() {
            Some(name) if !name.is_empty() => name,
            _ => return Err(AccessError::SubcommandMissing),
        };
        let subcommand: Subcommand = name.parse()?;
        let arg = |i: usize| argv.get(i + 1).copied().flatten();

        let command = match subcommand {
            Subcommand::Public => AccessCommand::Public(PackageArgs {
                package: optional(arg(0)),
            }),
            Subcommand::Restricted => AccessCommand::Restricted(PackageArgs {
                package: optional(arg(0)),
            }),
            Subcommand::Grant => {
                let permission = arg(0)
                    .and_then(|p| p.parse::<PermissionLevel>().ok())
                    .ok_or_else(|| AccessError::PermissionInvalid(arg(0).map(str::to_string)))?;
                let team = validate_team_ref(arg(1), ArgPosition::Second)?;
                AccessCommand::Grant(GrantArgs {
                    permission,
                    team,
                    package: optional(arg(2)),
                })
            }
            Subcommand::Revoke => {
                let team = validate_team_ref(arg(0), ArgPosition::First)?;
                AccessCommand::Revoke(RevokeArgs {
                    team,
                    package: optional(arg(1)),
                })
            }
            Subcommand::TfaRequired => AccessCommand::TfaRequired(PackageArgs {
                package: optional(arg(0)),
            }),
            Subcommand::TfaNotRequired => AccessCommand::TfaNotRequired(PackageArgs {
                package: optional(arg(0)),
            }),
            Subcommand::LsPackages => AccessCommand::LsPackages(LsPackagesArgs {
                entity: optional(arg(0)),
            }),
            Subcommand::LsCollaborators => AccessCommand::LsCollaborators(LsCollaboratorsArgs {
                package: optional(arg(0)),
                user: optional(arg(1)),
            }),
            Subcommand::Edit => return Err(AccessError::NotImplemented),
        };

        Ok(command)
    }

    pub fn subcommand(&self) -> Subcommand {
        match self {
            AccessCommand::Public(_) => Subcommand::Public,
            AccessCommand::Restricted(_) => Subcommand::Restricted,
            AccessCommand::Grant(_) => Subcommand::Grant,
            AccessCommand::Revoke(_) => Subcommand::Revoke,
            AccessCommand::TfaRequired(_) => Subcommand::TfaRequired,
            AccessCommand::TfaNotRequired(_) => Subcommand::TfaNotRequired,
            AccessCommand::LsPackages(_) => Subcommand::LsPackages,
            AccessCommand::LsCollaborators(_) => Subcommand::LsCollaborators,
        }
    }
}

/// Validate a `scope:team` argument
///
/// `position` only affects the wording of the malformed-argument message.
pub fn validate_team_ref(value: Option<&str>, position: ArgPosition) -> Result<TeamRef, AccessError> {
    let value = value.ok_or(AccessError::TeamMissing)?;
    TeamRef::parse(value).ok_or_else(|| AccessError::TeamMalformed {
        position,
        value: value.to_string(),
    })
}

/// Trimmed optional argument; blank counts as absent
fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
