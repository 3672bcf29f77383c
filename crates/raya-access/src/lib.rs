//! Raya Registry Access Library
//!
//! This crate manages access-control settings for packages published to the
//! Raya package registry, including:
//! - Package visibility (public / restricted)
//! - Team grants and revocations
//! - Two-factor-auth publishing requirements
//! - Package and collaborator listings
//!
//! The [`AccessRouter`] validates `access` subcommand arguments, resolves the
//! target package (explicitly or from `raya.toml`), and issues exactly one
//! call to an [`AccessClient`].

pub mod access;
pub mod config;
pub mod identity;
pub mod manifest;
pub mod registry;

pub use access::{
    complete, validate_team_ref, AccessCommand, AccessError, AccessRouter, ArgPosition, GrantArgs,
    LsCollaboratorsArgs, LsPackagesArgs, OutputSink, PackageArgs, RevokeArgs, Subcommand, TeamRef,
    USAGE,
};
pub use config::{ConfigError, RegistryOptions, RegistrySettings, RegistrySource, DEFAULT_REGISTRY};
pub use identity::{CredentialsIdentity, IdentityError, IdentityResolver};
pub use manifest::{
    ManifestError, ManifestResolver, PackageInfo, PackageManifest, PackageNameResolver,
    RegistryConfig, MANIFEST_FILE,
};
pub use registry::{AccessClient, AccessListing, PermissionLevel, RegistryClient, RegistryError};
