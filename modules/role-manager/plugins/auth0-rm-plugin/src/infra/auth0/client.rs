//! [`Auth0Directory`] over HTTP.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::dto::{GroupDto, GroupsEnvelope, MembersEnvelope, UsersPage};
use super::endpoint;
use super::session::{ClientCredentials, TokenSession};
use crate::config::{
    AUTHZ_API_AUDIENCE, Auth0RoleManagerConfig, MAX_USERS_PAGE_SIZE, USERS_PAGING_WINDOW,
};
use crate::domain::{Auth0Directory, DirectoryGroup, DirectoryUser, DomainError};

/// Directory backed by the Auth0 management API (users) and the
/// Authorization Extension API (groups and memberships).
///
/// Each API has its own audience and therefore its own token session.
#[derive(Debug)]
pub struct HttpAuth0Directory {
    http: reqwest::Client,
    tenant_domain: Url,
    authorization_url: Url,
    management: TokenSession,
    authz: TokenSession,
    users_page_size: u32,
}

impl HttpAuth0Directory {
    /// Validate `cfg` and authenticate against both APIs.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the users page size is out of range or the tenant
    ///   is not a plain subdomain label
    /// - `InvalidUrl` / `InvalidBaseUrl` if the tenant domain is unusable
    /// - `Token` / `TokenRejected` if either token request fails
    pub async fn connect(cfg: &Auth0RoleManagerConfig) -> Result<Self, DomainError> {
        if !(1..=MAX_USERS_PAGE_SIZE).contains(&cfg.users_page_size) {
            return Err(DomainError::InvalidConfig(format!(
                "users_page_size must be between 1 and {MAX_USERS_PAGE_SIZE}, got {}",
                cfg.users_page_size
            )));
        }
        if !is_tenant_name(&cfg.tenant) {
            return Err(DomainError::InvalidConfig(format!(
                "tenant must consist of ASCII letters, digits and '-', got '{}'",
                cfg.tenant
            )));
        }

        let tenant_domain = cfg
            .tenant_domain()
            .map_err(|source| DomainError::InvalidUrl {
                url: format!("https://{}.auth0.com", cfg.tenant),
                source,
            })?;
        let token_url = endpoint(&tenant_domain, &["oauth", "token"])?;

        let http = reqwest::Client::new();
        let credentials = Arc::new(ClientCredentials {
            client_id: cfg.client_id.clone(),
            client_secret: SecretString::from(cfg.client_secret.expose_secret().to_owned()),
        });

        let management = TokenSession::open(
            http.clone(),
            token_url.clone(),
            cfg.management_audience(),
            Arc::clone(&credentials),
        )
        .await?;
        let authz = TokenSession::open(http.clone(), token_url, AUTHZ_API_AUDIENCE, credentials)
            .await?;

        debug!(
            tenant_domain = %tenant_domain,
            authorization_url = %cfg.authorization_url,
            "Auth0 directory connected"
        );

        Ok(Self {
            http,
            tenant_domain,
            authorization_url: cfg.authorization_url.clone(),
            management,
            authz,
            users_page_size: cfg.users_page_size,
        })
    }

    #[instrument(skip(self, session, url), fields(url = %url, audience = session.audience()))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        session: &TokenSession,
        url: &Url,
    ) -> Result<T, DomainError> {
        let token = session.bearer().await?;
        let http_error = |source: reqwest::Error| DomainError::Http {
            url: url.to_string(),
            source,
        };

        let resp = self
            .http
            .get(url.as_str())
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(http_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        resp.json().await.map_err(http_error)
    }

    fn extension_endpoint(&self, segments: &[&str]) -> Result<Url, DomainError> {
        endpoint(&self.authorization_url, segments)
    }
}

/// The tenant becomes a label of the token endpoint host, so nothing that
/// could change the host is allowed.
fn is_tenant_name(tenant: &str) -> bool {
    !tenant.is_empty()
        && tenant
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

#[async_trait]
impl Auth0Directory for HttpAuth0Directory {
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, DomainError> {
        let per_page = self.users_page_size.to_string();
        let max_pages = USERS_PAGING_WINDOW
            .checked_div(self.users_page_size)
            .unwrap_or(1);
        let mut seen = HashSet::new();
        let mut users: Vec<DirectoryUser> = Vec::new();

        for page in 0..max_pages {
            let mut url = endpoint(&self.tenant_domain, &["api", "v2", "users"])?;
            url.query_pairs_mut()
                .append_pair("page", &page.to_string())
                .append_pair("per_page", &per_page)
                .append_pair("include_totals", "true");

            let batch: UsersPage = self.get_json(&self.management, &url).await?;
            let fetched = batch.users.len();
            let before = users.len();
            users.extend(
                batch
                    .users
                    .into_iter()
                    .map(DirectoryUser::from)
                    .filter(|u| seen.insert(u.id.clone())),
            );

            if fetched > 0 && users.len() == before {
                warn!(page, "Users page only repeats earlier results, stopping");
                return Ok(users);
            }

            let last = fetched == 0
                || match batch.total {
                    Some(total) => users.len() >= total,
                    None => u32::try_from(fetched).is_ok_and(|n| n < self.users_page_size),
                };
            if last {
                debug!(count = users.len(), "Listed tenant users");
                return Ok(users);
            }
        }

        warn!(
            count = users.len(),
            window = USERS_PAGING_WINDOW,
            "User listing reached the paging window, remaining users are not mapped"
        );
        Ok(users)
    }

    async fn list_groups(&self) -> Result<Vec<DirectoryGroup>, DomainError> {
        let url = self.extension_endpoint(&["api", "groups"])?;
        let body: GroupsEnvelope = self.get_json(&self.authz, &url).await?;
        Ok(body.groups.into_iter().map(Into::into).collect())
    }

    async fn user_groups(&self, user_id: &str) -> Result<Vec<DirectoryGroup>, DomainError> {
        let url = self.extension_endpoint(&["api", "users", user_id, "groups"])?;
        let groups: Vec<GroupDto> = self.get_json(&self.authz, &url).await?;
        Ok(groups.into_iter().map(Into::into).collect())
    }

    async fn group_members(&self, group_id: &str) -> Result<Vec<DirectoryUser>, DomainError> {
        let url = self.extension_endpoint(&["api", "groups", group_id, "members"])?;
        let body: MembersEnvelope = self.get_json(&self.authz, &url).await?;
        Ok(body.users.into_iter().map(Into::into).collect())
    }
}
