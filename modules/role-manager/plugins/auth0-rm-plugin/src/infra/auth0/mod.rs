//! Auth0 HTTP adapters: client-credentials sessions and the directory
//! backed by the management API and the Authorization Extension API.

pub mod client;
pub mod dto;
pub mod session;

pub use client::HttpAuth0Directory;
pub use session::{ClientCredentials, TokenSession};

use url::Url;

use crate::domain::DomainError;

/// Append path `segments` to `base`, percent-encoding each one.
///
/// # Errors
///
/// `InvalidBaseUrl` if `base` cannot carry a path (e.g. `mailto:`).
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, DomainError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| DomainError::InvalidBaseUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn appends_to_root_and_nested_bases() {
        let root = Url::parse("https://abc.auth0.com").unwrap();
        assert_eq!(
            endpoint(&root, &["oauth", "token"]).unwrap().as_str(),
            "https://abc.auth0.com/oauth/token"
        );

        let nested = Url::parse("https://abc.us.webtask.io/adf6e2f2/").unwrap();
        assert_eq!(
            endpoint(&nested, &["api", "groups"]).unwrap().as_str(),
            "https://abc.us.webtask.io/adf6e2f2/api/groups"
        );
    }

    #[test]
    fn encodes_ids() {
        let base = Url::parse("https://ext.example.com/x").unwrap();
        let url = endpoint(&base, &["api", "users", "sms|5f1c/2 x", "groups"]).unwrap();
        assert_eq!(url.path(), "/x/api/users/sms|5f1c%2F2%20x/groups");
    }

    #[test]
    fn rejects_non_hierarchical_base() {
        let base = Url::parse("mailto:ops@example.com").unwrap();
        assert!(matches!(
            endpoint(&base, &["api"]),
            Err(DomainError::InvalidBaseUrl { .. })
        ));
    }
}
