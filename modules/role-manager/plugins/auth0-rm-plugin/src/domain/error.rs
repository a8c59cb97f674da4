use role_manager_sdk::RoleManagerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("ID not found for name '{name}'")]
    NameNotFound { name: String },

    #[error("{operation} is not implemented")]
    NotImplemented { operation: &'static str },

    #[error("token request for audience '{audience}' failed: {source}")]
    Token {
        audience: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("token request for audience '{audience}' rejected with status {status}: {body}")]
    TokenRejected {
        audience: String,
        status: u16,
        body: String,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned status {status}: {body}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL '{url}' cannot be used as a base for API paths")]
    InvalidBaseUrl { url: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("auth0 role manager already initialized")]
    AlreadyInitialized,
}

impl DomainError {
    /// Whether the failure came from the remote service or its transport.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Token { .. }
                | Self::TokenRejected { .. }
                | Self::Http { .. }
                | Self::UnexpectedStatus { .. }
        )
    }
}

impl From<DomainError> for RoleManagerError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NameNotFound { name } => Self::NameNotFound { name },
            DomainError::NotImplemented { operation } => Self::NotImplemented { operation },
            other => Self::backend(other),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn lookup_failures_keep_their_kind() {
        let err: RoleManagerError = DomainError::NameNotFound {
            name: "carol@test.com".to_owned(),
        }
        .into();
        assert!(matches!(err, RoleManagerError::NameNotFound { name } if name == "carol@test.com"));
    }

    #[test]
    fn remote_failures_become_backend_errors() {
        let domain = DomainError::UnexpectedStatus {
            url: "https://abc.auth0.com/api/v2/users".to_owned(),
            status: 503,
            body: "unavailable".to_owned(),
        };
        assert!(domain.is_remote());

        let err: RoleManagerError = domain.into();
        match err {
            RoleManagerError::Backend(source) => {
                assert!(source.to_string().contains("status 503"));
            }
            other => panic!("Expected Backend error, got: {other:?}"),
        }
    }

    #[test]
    fn local_failures_are_not_remote() {
        assert!(!DomainError::InvalidConfig("page size".to_owned()).is_remote());
        assert!(!DomainError::AlreadyInitialized.is_remote());
    }
}
