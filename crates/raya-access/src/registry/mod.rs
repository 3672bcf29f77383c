//! Registry access client
//!
//! [`AccessClient`] is the seam between command routing and the network.
//! [`RegistryClient`] implements it over HTTP against the raya.dev API.

mod api;
mod client;

pub use api::{
    AccessLevel, AccessListing, PackageAccessRequest, PermissionLevel, TeamPackageRequest, TeamRef,
};
pub use client::{RegistryClient, RegistryError};

use crate::config::RegistryOptions;

/// Access-control operations offered by a package registry
///
/// Every call receives the endpoint configuration explicitly; implementations
/// must not fall back to ambient configuration.
pub trait AccessClient {
    /// Make a scoped package publicly visible
    fn set_public(&self, pkg: &str, opts: &RegistryOptions) -> Result<(), RegistryError>;

    /// Restrict a scoped package to its owners
    fn set_restricted(&self, pkg: &str, opts: &RegistryOptions) -> Result<(), RegistryError>;

    /// Grant a team access to a package
    fn grant(
        &self,
        pkg: &str,
        team: &TeamRef,
        permission: PermissionLevel,
        opts: &RegistryOptions,
    ) -> Result<(), RegistryError>;

    /// Revoke a team's access to a package
    fn revoke(&self, pkg: &str, team: &TeamRef, opts: &RegistryOptions) -> Result<(), RegistryError>;

    /// Require two-factor auth to publish a package
    fn tfa_required(&self, pkg: &str, opts: &RegistryOptions) -> Result<(), RegistryError>;

    /// Drop the two-factor publishing requirement
    fn tfa_not_required(&self, pkg: &str, opts: &RegistryOptions) -> Result<(), RegistryError>;

    /// Packages a user, org, or team has access to
    fn list_packages(&self, entity: &str, opts: &RegistryOptions) -> Result<AccessListing, RegistryError>;

    /// Collaborators on a package, optionally filtered to one user
    fn list_collaborators(
        &self,
        pkg: &str,
        user: Option<&str>,
        opts: &RegistryOptions,
    ) -> Result<AccessListing, RegistryError>;
}
