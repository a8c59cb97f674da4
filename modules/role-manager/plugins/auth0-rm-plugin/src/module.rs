use std::sync::{Arc, OnceLock};

use role_manager_sdk::RoleManager;
use tracing::info;

use crate::config::Auth0RoleManagerConfig;
use crate::domain::{DomainError, Service};
use crate::infra::auth0::HttpAuth0Directory;

/// Auth0 role manager plugin module.
///
/// Answers role queries from the Auth0 Authorization Extension. Owns the
/// single [`Service`] instance created on [`init`](Self::init).
pub struct Auth0RoleManagerPlugin {
    service: OnceLock<Arc<Service>>,
}

impl Default for Auth0RoleManagerPlugin {
    fn default() -> Self {
        Self {
            service: OnceLock::new(),
        }
    }
}

impl Auth0RoleManagerPlugin {
    pub const MODULE_NAME: &'static str = "auth0-rm-plugin";

    /// Authenticate against the tenant, take the identity snapshot and
    /// expose the service as a [`RoleManager`].
    ///
    /// # Errors
    ///
    /// - any configuration, token or directory error raised while connecting
    /// - `AlreadyInitialized` if the module was initialized before
    #[tracing::instrument(skip_all, fields(tenant = %cfg.tenant))]
    pub async fn init(
        &self,
        cfg: &Auth0RoleManagerConfig,
    ) -> Result<Arc<dyn RoleManager>, DomainError> {
        info!("Initializing {} module", Self::MODULE_NAME);

        if self.service.get().is_some() {
            return Err(DomainError::AlreadyInitialized);
        }

        let directory = Arc::new(HttpAuth0Directory::connect(cfg).await?);
        let service = Arc::new(Service::connect(directory).await?);
        self.service
            .set(service.clone())
            .map_err(|_| DomainError::AlreadyInitialized)?;

        info!(
            identities = service.identities().len(),
            "{} module initialized successfully",
            Self::MODULE_NAME
        );
        Ok(service)
    }

    /// The service, once [`init`](Self::init) has succeeded.
    #[must_use]
    pub fn service(&self) -> Option<Arc<Service>> {
        self.service.get().cloned()
    }
}
