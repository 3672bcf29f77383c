//! Registry HTTP client
//!
//! Provides a blocking HTTP client for the access-control endpoints of the
//! raya.dev package registry.

use super::api::{
    AccessLevel, AccessListing, PackageAccessRequest, PermissionLevel, TeamPackageRequest, TeamRef,
};
use super::AccessClient;
use crate::config::RegistryOptions;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur during registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Package not found
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    /// User, org, or team not found
    #[error("No user, org, or team named {0}")]
    EntityNotFound(String),

    /// Missing or rejected credentials
    #[error("Not authorized to modify {0}. Run `raya pkg login` to authenticate.")]
    Unauthorized(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Registry URL cannot carry an API path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Response did not have the expected shape
    #[error("Unexpected registry response: {0}")]
    InvalidResponse(String),

    /// Registry unavailable
    #[error("Registry unavailable: {0}")]
    Unavailable(String),
}

/// Registry client for the access-control API
pub struct RegistryClient {
    /// HTTP client
    client: Client,
}

impl RegistryClient {
    /// Create a new registry client
    pub fn new() -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("raya-access/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    fn request(&self, method: Method, url: &str, opts: &RegistryOptions) -> RequestBuilder {
        tracing::debug!(%method, %url, "registry request");
        let request = self.client.request(method, url);
        match &opts.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request, mapping non-success statuses to errors
    ///
    /// A 404 becomes whatever `not_found` builds; 401/403 become
    /// [`RegistryError::Unauthorized`] naming `subject`.
    fn send<F>(&self, request: RequestBuilder, subject: &str, not_found: F) -> Result<Response, RegistryError>
    where
        F: FnOnce() -> RegistryError,
    {
        let response = request.send()?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        Err(match status {
            StatusCode::NOT_FOUND => not_found(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                RegistryError::Unauthorized(subject.to_string())
            }
            _ => RegistryError::Unavailable(format!("Registry returned status {}", status)),
        })
    }

    fn set_package_access(
        &self,
        pkg: &str,
        body: &PackageAccessRequest,
        opts: &RegistryOptions,
    ) -> Result<(), RegistryError> {
        let url = package_access_url(&opts.registry, pkg)?;
        let request = self.request(Method::POST, &url, opts).json(body);
        self.send(request, pkg, || RegistryError::PackageNotFound(pkg.to_string()))?;
        Ok(())
    }

    fn fetch_listing(
        &self,
        url: &str,
        subject: &str,
        opts: &RegistryOptions,
        not_found: impl FnOnce() -> RegistryError,
    ) -> Result<AccessListing, RegistryError> {
        let request = self.request(Method::GET, url, opts);
        let response = self.send(request, subject, not_found)?;
        let raw: BTreeMap<String, String> = serde_json::from_str(&response.text()?)?;
        translate_permissions(raw)
    }
}

impl AccessClient for RegistryClient {
    fn set_public(&self, pkg: &str, opts: &RegistryOptions) -> Result<(), RegistryError> {
        let body = PackageAccessRequest {
            access: Some(AccessLevel::Public),
            ..Default::default()
        };
        self.set_package_access(pkg, &body, opts)
    }

    fn set_restricted(&self, pkg: &str, opts: &RegistryOptions) -> Result<(), RegistryError> {
        let body = PackageAccessRequest {
            access: Some(AccessLevel::Restricted),
            ..Default::default()
        };
        self.set_package_access(pkg, &body, opts)
    }

    fn grant(
        &self,
        pkg: &str,
        team: &TeamRef,
        permission: PermissionLevel,
        opts: &RegistryOptions,
    ) -> Result<(), RegistryError> {
        let url = team_package_url(&opts.registry, team)?;
        let body = TeamPackageRequest {
            package: pkg.to_string(),
            permissions: Some(permission.as_wire().to_string()),
        };
        let request = self.request(Method::PUT, &url, opts).json(&body);
        self.send(request, pkg, || RegistryError::EntityNotFound(team.to_string()))?;
        Ok(())
    }

    fn revoke(&self, pkg: &str, team: &TeamRef, opts: &RegistryOptions) -> Result<(), RegistryError> {
        let url = team_package_url(&opts.registry, team)?;
        let body = TeamPackageRequest {
            package: pkg.to_string(),
            permissions: None,
        };
        let request = self.request(Method::DELETE, &url, opts).json(&body);
        self.send(request, pkg, || RegistryError::EntityNotFound(team.to_string()))?;
        Ok(())
    }

    fn tfa_required(&self, pkg: &str, opts: &RegistryOptions) -> Result<(), RegistryError> {
        let body = PackageAccessRequest {
            publish_requires_tfa: Some(true),
            ..Default::default()
        };
        self.set_package_access(pkg, &body, opts)
    }

    fn tfa_not_required(&self, pkg: &str, opts: &RegistryOptions) -> Result<(), RegistryError> {
        let body = PackageAccessRequest {
            publish_requires_tfa: Some(false),
            ..Default::default()
        };
        self.set_package_access(pkg, &body, opts)
    }

    fn list_packages(&self, entity: &str, opts: &RegistryOptions) -> Result<AccessListing, RegistryError> {
        let not_found = || RegistryError::EntityNotFound(entity.to_string());

        if let Some(team) = TeamRef::parse(entity) {
            let url = team_package_url(&opts.registry, &team)?;
            return self.fetch_listing(&url, entity, opts, not_found);
        }

        // Orgs and users share a namespace; try the org listing first
        let org_url = endpoint(&opts.registry, &["-", "org", entity, "package"])?;
        match self.fetch_listing(&org_url, entity, opts, not_found) {
            Err(RegistryError::EntityNotFound(_)) => {
                let user_url = endpoint(&opts.registry, &["-", "user", entity, "package"])?;
                self.fetch_listing(&user_url, entity, opts, not_found)
            }
            other => other,
        }
    }

    fn list_collaborators(
        &self,
        pkg: &str,
        user: Option<&str>,
        opts: &RegistryOptions,
    ) -> Result<AccessListing, RegistryError> {
        let url = collaborators_url(&opts.registry, pkg, user)?;
        self.fetch_listing(&url, pkg, opts, || RegistryError::PackageNotFound(pkg.to_string()))
    }
}

/// Append path segments to the registry base URL
///
/// Each segment is percent-encoded on its own, so a scoped package
/// (`@org/name`) stays one segment (`@org%2Fname`) and user-supplied
/// entities cannot add path components or a query.
fn endpoint_url(registry: &str, segments: &[&str]) -> Result<Url, RegistryError> {
    let mut url = Url::parse(registry).map_err(|e| RegistryError::InvalidUrl(format!("{}: {}", registry, e)))?;
    url.path_segments_mut()
        .map_err(|_| RegistryError::InvalidUrl(registry.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn endpoint(registry: &str, segments: &[&str]) -> Result<String, RegistryError> {
    endpoint_url(registry, segments).map(String::from)
}

fn package_access_url(registry: &str, pkg: &str) -> Result<String, RegistryError> {
    endpoint(registry, &["-", "package", pkg, "access"])
}

fn team_package_url(registry: &str, team: &TeamRef) -> Result<String, RegistryError> {
    endpoint(registry, &["-", "team", team.scope(), team.team(), "package"])
}

fn collaborators_url(registry: &str, pkg: &str, user: Option<&str>) -> Result<String, RegistryError> {
    let mut url = endpoint_url(registry, &["-", "package", pkg, "collaborators"])?;
    if let Some(user) = user {
        url.query_pairs_mut().append_pair("user", user);
    }
    Ok(url.into())
}

/// Convert registry `read`/`write` values to permission levels
fn translate_permissions(raw: BTreeMap<String, String>) -> Result<AccessListing, RegistryError> {
    raw.into_iter()
        .map(|(name, perm)| match PermissionLevel::from_wire(&perm) {
            Some(level) => Ok((name, level)),
            None => Err(RegistryError::InvalidResponse(format!(
                "unknown permission '{}' for {}",
                perm, name
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_access_url_encodes_scope_slash() {
        assert_eq!(
            package_access_url("https://pkg.raya.dev/api/v1", "@scoped/another").unwrap(),
            "https://pkg.raya.dev/api/v1/-/package/@scoped%2Fanother/access"
        );
        assert_eq!(
            package_access_url("https://pkg.raya.dev/api/v1", "yargs").unwrap(),
            "https://pkg.raya.dev/api/v1/-/package/yargs/access"
        );
    }

    #[test]
    fn test_team_package_url_strips_scope_marker() {
        let team = TeamRef::parse("@myorg:myteam").unwrap();
        assert_eq!(
            team_package_url("https://r.example.com", &team).unwrap(),
            "https://r.example.com/-/team/myorg/myteam/package"
        );
    }

    #[test]
    fn test_team_segments_are_encoded() {
        let team = TeamRef::parse("org:x?y").unwrap();
        assert_eq!(
            team_package_url("https://r.example.com", &team).unwrap(),
            "https://r.example.com/-/team/org/x%3Fy/package"
        );

        let team = TeamRef::parse("a/b:dev").unwrap();
        assert_eq!(
            team_package_url("https://r.example.com", &team).unwrap(),
            "https://r.example.com/-/team/a%2Fb/dev/package"
        );
    }

    #[test]
    fn test_entity_segment_is_encoded() {
        assert_eq!(
            endpoint("https://r.example.com/api", &["-", "org", "a/b", "package"]).unwrap(),
            "https://r.example.com/api/-/org/a%2Fb/package"
        );
        assert_eq!(
            endpoint("https://r.example.com", &["-", "user", "../admin#x", "package"]).unwrap(),
            "https://r.example.com/-/user/..%2Fadmin%23x/package"
        );
    }

    #[test]
    fn test_collaborators_url() {
        assert_eq!(
            collaborators_url("https://r.example.com", "yargs", None).unwrap(),
            "https://r.example.com/-/package/yargs/collaborators"
        );
        assert_eq!(
            collaborators_url("https://r.example.com", "@a/b", Some("jane doe")).unwrap(),
            "https://r.example.com/-/package/@a%2Fb/collaborators?user=jane+doe"
        );
    }

    #[test]
    fn test_base_without_path_rejected() {
        assert!(matches!(
            endpoint("mailto:someone@example.com", &["-", "package"]),
            Err(RegistryError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_translate_permissions() {
        let mut raw = BTreeMap::new();
        raw.insert("alice".to_string(), "write".to_string());
        raw.insert("bob".to_string(), "read".to_string());

        let listing = translate_permissions(raw).unwrap();
        assert_eq!(listing["alice"], PermissionLevel::ReadWrite);
        assert_eq!(listing["bob"], PermissionLevel::ReadOnly);
    }

    #[test]
    fn test_translate_unknown_permission() {
        let mut raw = BTreeMap::new();
        raw.insert("carol".to_string(), "owner".to_string());
        assert!(matches!(
            translate_permissions(raw),
            Err(RegistryError::InvalidResponse(_))
        ));
    }
}
