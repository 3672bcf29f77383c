//! Access command router
//!
//! Resolves the target package and routes a validated [`AccessCommand`] to
//! exactly one [`AccessClient`] call.

use super::command::{AccessCommand, GrantArgs, LsCollaboratorsArgs, LsPackagesArgs, PackageArgs, RevokeArgs};
use super::error::AccessError;
use crate::config::RegistryOptions;
use crate::identity::IdentityResolver;
use crate::manifest::PackageNameResolver;
use crate::registry::{AccessClient, AccessListing};
use std::path::Path;

/// Receives listing results for display
pub trait OutputSink {
    fn emit(&mut self, listing: AccessListing);
}

impl OutputSink for Vec<AccessListing> {
    fn emit(&mut self, listing: AccessListing) {
        self.push(listing);
    }
}

/// Routes access commands to a registry client
pub struct AccessRouter<'a> {
    manifest: &'a dyn PackageNameResolver,
    identity: &'a dyn IdentityResolver,
    client: &'a dyn AccessClient,
}

impl<'a> AccessRouter<'a> {
    pub fn new(
        manifest: &'a dyn PackageNameResolver,
        identity: &'a dyn IdentityResolver,
        client: &'a dyn AccessClient,
    ) -> Self {
        Self {
            manifest,
            identity,
            client,
        }
    }

    /// Parse and run `[subcommand, args...]`
    ///
    /// `cwd` is where the manifest is looked up when no package is given.
    pub fn dispatch(
        &self,
        argv: &[Option<&str>],
        cwd: &Path,
        opts: &RegistryOptions,
        output: &mut dyn OutputSink,
    ) -> Result<(), AccessError> {
        let command = AccessCommand::parse(argv)?;
        self.execute(command, cwd, opts, output)
    }

    /// Run an already-parsed command
    pub fn execute(
        &self,
        command: AccessCommand,
        cwd: &Path,
        opts: &RegistryOptions,
        output: &mut dyn OutputSink,
    ) -> Result<(), AccessError> {
        tracing::debug!(subcommand = %command.subcommand(), registry = %opts.registry, "dispatching access command");

        match command {
            AccessCommand::Public(PackageArgs { package }) => {
                let pkg = self.resolve_scoped_package(package, cwd)?;
                self.client.set_public(&pkg, opts)?;
            }
            AccessCommand::Restricted(PackageArgs { package }) => {
                let pkg = self.resolve_scoped_package(package, cwd)?;
                self.client.set_restricted(&pkg, opts)?;
            }
            AccessCommand::Grant(GrantArgs {
                permission,
                team,
                package,
            }) => {
                let pkg = self.resolve_package(package, cwd)?;
                self.client.grant(&pkg, &team, permission, opts)?;
            }
            AccessCommand::Revoke(RevokeArgs { team, package }) => {
                let pkg = self.resolve_package(package, cwd)?;
                self.client.revoke(&pkg, &team, opts)?;
            }
            AccessCommand::TfaRequired(PackageArgs { package }) => {
                let pkg = self.resolve_package(package, cwd)?;
                self.client.tfa_required(&pkg, opts)?;
            }
            AccessCommand::TfaNotRequired(PackageArgs { package }) => {
                let pkg = self.resolve_package(package, cwd)?;
                self.client.tfa_not_required(&pkg, opts)?;
            }
            AccessCommand::LsPackages(LsPackagesArgs { entity }) => {
                let entity = match entity {
                    Some(entity) => entity,
                    None => self.identity.self_identity()?,
                };
                let listing = self.client.list_packages(&entity, opts)?;
                output.emit(listing);
            }
            AccessCommand::LsCollaborators(LsCollaboratorsArgs { package, user }) => {
                let pkg = self.resolve_package(package, cwd)?;
                let listing = self.client.list_collaborators(&pkg, user.as_deref(), opts)?;
                output.emit(listing);
            }
        }

        Ok(())
    }

    /// Explicit package, or the name declared in `cwd/raya.toml`
    fn resolve_package(&self, explicit: Option<String>, cwd: &Path) -> Result<String, AccessError> {
        if let Some(pkg) = explicit {
            return Ok(pkg);
        }

        let name = self.manifest.resolve_package_name(cwd)?;
        tracing::debug!(package = %name, dir = %cwd.display(), "resolved package from manifest");
        Ok(name)
    }

    fn resolve_scoped_package(&self, explicit: Option<String>, cwd: &Path) -> Result<String, AccessError> {
        let pkg = self.resolve_package(explicit, cwd)?;
        if !is_scoped(&pkg) {
            return Err(AccessError::ScopeRequired(pkg));
        }
        Ok(pkg)
    }
}

/// `@scope/name` with a non-empty scope
fn is_scoped(name: &str) -> bool {
    name.strip_prefix('@')
        .and_then(|rest| rest.split_once('/'))
        .is_some_and(|(scope, _)| !scope.is_empty())
}
