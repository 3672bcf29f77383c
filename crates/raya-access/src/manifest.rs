//! Package manifest parsing (raya.toml)
//!
//! Only the parts of the manifest that access commands care about are
//! modelled here: the package name and an optional registry override.
//! Other tables (dependencies, scripts, ...) are accepted and ignored.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest file name looked up in a project directory
pub const MANIFEST_FILE: &str = "raya.toml";

/// Errors that can occur while loading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// No manifest in the directory
    #[error("No raya.toml found at {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to read manifest file
    #[error("Failed to read manifest file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse manifest: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid manifest: {0}")]
    ValidationError(String),
}

impl ManifestError {
    /// Whether the manifest exists but is malformed
    pub fn is_malformed(&self) -> bool {
        matches!(self, ManifestError::ParseError(_) | ManifestError::ValidationError(_))
    }
}

/// Package manifest (raya.toml)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageManifest {
    /// Package metadata
    pub package: PackageInfo,

    /// Per-project registry override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<RegistryConfig>,
}

/// Package information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageInfo {
    /// Package name, optionally scoped (`@org/name`)
    pub name: String,

    /// Semver version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `[registry]` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistryConfig {
    /// Registry base URL
    pub url: String,
}

impl PackageManifest {
    /// Parse a manifest from a file
    ///
    /// A missing file is reported as [`ManifestError::NotFound`] rather than
    /// a generic I/O error.
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ManifestError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_str(&content)
    }

    /// Parse a manifest from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        let manifest: PackageManifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load `raya.toml` from a project directory
    pub fn from_dir(dir: &Path) -> Result<Self, ManifestError> {
        Self::from_file(&dir.join(MANIFEST_FILE))
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.package.name.is_empty() {
            return Err(ManifestError::ValidationError(
                "Package name cannot be empty".to_string(),
            ));
        }

        if !is_valid_package_name(&self.package.name) {
            return Err(ManifestError::ValidationError(format!(
                "Invalid package name: {}. Must contain only alphanumeric characters, hyphens, underscores, dots, and optional @org/ prefix",
                self.package.name
            )));
        }

        Ok(())
    }
}

/// Resolves the default package name for a working directory
pub trait PackageNameResolver {
    /// Read the package name declared by the manifest in `dir`
    fn resolve_package_name(&self, dir: &Path) -> Result<String, ManifestError>;
}

/// Reads `raya.toml` from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestResolver;

impl PackageNameResolver for ManifestResolver {
    fn resolve_package_name(&self, dir: &Path) -> Result<String, ManifestError> {
        let manifest = PackageManifest::from_dir(dir)?;
        Ok(manifest.package.name)
    }
}

/// Validate a package name
fn is_valid_package_name(name: &str) -> bool {
    if let Some(rest) = name.strip_prefix('@') {
        return match rest.split_once('/') {
            Some((org, pkg)) => is_valid_name_part(org) && is_valid_name_part(pkg),
            None => false,
        };
    }

    is_valid_name_part(name)
}

/// Validate a name part (alphanumeric, hyphens, underscores, dots)
fn is_valid_name_part(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
}
