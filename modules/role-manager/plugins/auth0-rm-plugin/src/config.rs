//! Configuration for the Auth0 role manager plugin.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Audience of the Authorization Extension API.
pub const AUTHZ_API_AUDIENCE: &str = "urn:auth0-authz-api";

/// Prefix of environment variables overriding file settings.
pub const ENV_PREFIX: &str = "AUTH0_RM_";

/// Largest page the management API serves.
pub const MAX_USERS_PAGE_SIZE: u32 = 100;

/// Number of users the management API serves through paging.
pub const USERS_PAGING_WINDOW: u32 = 1000;

fn default_users_page_size() -> u32 {
    50
}

/// Plugin configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Auth0RoleManagerConfig {
    /// Client ID of the machine-to-machine application.
    pub client_id: String,

    /// Client secret of the machine-to-machine application.
    pub client_secret: SecretString,

    /// Tenant name. For `abc.auth0.com` the tenant is `abc`.
    pub tenant: String,

    /// Base URL of the Authorization Extension, without a trailing
    /// `/api`, `/admins` or `/users`, e.g.
    /// `https://abc.us.webtask.io/adf6e2f2b84784b57522e3b19dfc9201`.
    pub authorization_url: Url,

    /// Tenant domain override. Defaults to `https://{tenant}.auth0.com`.
    #[serde(default)]
    pub domain_url: Option<Url>,

    /// Page size used when listing users through the management API.
    #[serde(default = "default_users_page_size")]
    pub users_page_size: u32,
}

impl Auth0RoleManagerConfig {
    /// Load the configuration from a YAML file, with `AUTH0_RM_*`
    /// environment variables taking precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a required field is
    /// missing or malformed.
    pub fn load(path: impl AsRef<Path>) -> figment::Result<Self> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
    }

    /// Base URL of the tenant: token endpoint and management API live here.
    ///
    /// # Errors
    ///
    /// Returns an error if the tenant name does not form a valid host.
    pub fn tenant_domain(&self) -> Result<Url, url::ParseError> {
        match &self.domain_url {
            Some(url) => Ok(url.clone()),
            None => Url::parse(&format!("https://{}.auth0.com", self.tenant)),
        }
    }

    /// Audience of the management API for this tenant.
    #[must_use]
    pub fn management_audience(&self) -> String {
        format!("https://{}.auth0.com/api/v2/", self.tenant)
    }
}
