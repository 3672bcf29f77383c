//! Registry API types
//!
//! Request bodies and listing responses for the `/-/package` and `/-/team`
//! access endpoints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Permission a team or collaborator holds on a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionLevel {
    ReadOnly,
    ReadWrite,
}

impl PermissionLevel {
    /// All levels, in completion order
    pub const ALL: [PermissionLevel; 2] = [PermissionLevel::ReadOnly, PermissionLevel::ReadWrite];

    pub fn as_str(self) -> &'static str {
        match self {
            PermissionLevel::ReadOnly => "read-only",
            PermissionLevel::ReadWrite => "read-write",
        }
    }

    /// Name used on the wire by the registry (`read` / `write`)
    pub fn as_wire(self) -> &'static str {
        match self {
            PermissionLevel::ReadOnly => "read",
            PermissionLevel::ReadWrite => "write",
        }
    }

    /// Parse a wire permission
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "read" => Some(PermissionLevel::ReadOnly),
            "write" => Some(PermissionLevel::ReadWrite),
            _ => None,
        }
    }
}

impl FromStr for PermissionLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read-only" => Ok(PermissionLevel::ReadOnly),
            "read-write" => Ok(PermissionLevel::ReadWrite),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name (package or user) → permission
pub type AccessListing = BTreeMap<String, PermissionLevel>;

/// A `scope:team` reference
///
/// The scope may carry a leading `@` (`@example:developers`). The original
/// text is kept so it can be forwarded to the registry unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRef {
    raw: String,
    colon: usize,
    scope_start: usize,
}

impl TeamRef {
    /// Parse `scope:team`; both halves must be non-empty
    pub fn parse(s: &str) -> Option<Self> {
        let scope_start = usize::from(s.starts_with('@'));
        let colon = s.find(':')?;
        if colon <= scope_start || colon + 1 == s.len() {
            return None;
        }
        Some(Self {
            raw: s.to_string(),
            colon,
            scope_start,
        })
    }

    /// Scope without the leading `@`
    pub fn scope(&self) -> &str {
        &self.raw[self.scope_start..self.colon]
    }

    pub fn team(&self) -> &str {
        &self.raw[self.colon + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for TeamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Package visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    Restricted,
}

/// Body of `POST /-/package/{name}/access`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PackageAccessRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessLevel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_requires_tfa: Option<bool>,
}

/// Body of `PUT`/`DELETE /-/team/{scope}/{team}/package`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamPackageRequest {
    pub package: String,

    /// Wire permission (`read` / `write`); absent on revoke
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_parse() {
        assert_eq!("read-only".parse::<PermissionLevel>(), Ok(PermissionLevel::ReadOnly));
        assert_eq!("read-write".parse::<PermissionLevel>(), Ok(PermissionLevel::ReadWrite));
        assert!("rerere".parse::<PermissionLevel>().is_err());
        assert!("read".parse::<PermissionLevel>().is_err());
    }

    #[test]
    fn test_permission_wire_names() {
        assert_eq!(PermissionLevel::from_wire("read"), Some(PermissionLevel::ReadOnly));
        assert_eq!(PermissionLevel::from_wire("write"), Some(PermissionLevel::ReadWrite));
        assert_eq!(PermissionLevel::from_wire("admin"), None);
        assert_eq!(PermissionLevel::ReadWrite.as_wire(), "write");
    }

    #[test]
    fn test_listing_serializes_cli_names() {
        let mut listing = AccessListing::new();
        listing.insert("@org/pkg".to_string(), PermissionLevel::ReadWrite);
        let json = serde_json::to_string(&listing).unwrap();
        assert_eq!(json, r#"{"@org/pkg":"read-write"}"#);
    }

    #[test]
    fn test_team_ref_parse() {
        let team = TeamRef::parse("myorg:myteam").unwrap();
        assert_eq!(team.scope(), "myorg");
        assert_eq!(team.team(), "myteam");
        assert_eq!(team.as_str(), "myorg:myteam");

        let team = TeamRef::parse("@example:developers").unwrap();
        assert_eq!(team.scope(), "example");
        assert_eq!(team.team(), "developers");
        assert_eq!(team.to_string(), "@example:developers");
    }

    #[test]
    fn test_team_ref_rejects_malformed() {
        for bad in ["foo", "", ":team", "org:", "@:team", ":", "@"] {
            assert!(TeamRef::parse(bad).is_none(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_access_request_body() {
        let body = PackageAccessRequest {
            access: Some(AccessLevel::Restricted),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"access":"restricted"}"#);

        let body = PackageAccessRequest {
            publish_requires_tfa: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"publish_requires_tfa":true}"#
        );
    }
}
