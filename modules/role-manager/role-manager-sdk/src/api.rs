//! Role resolution trait consumed by the policy enforcer.

use async_trait::async_trait;

use crate::error::RoleManagerError;

/// Role resolution backend.
///
/// The enforcer resolves role inheritance exclusively through this trait, so
/// a backend owns the whole subject/role graph. Backends that keep the graph
/// in a remote directory are read-only: the mutating operations report
/// [`RoleManagerError::NotImplemented`].
///
/// Every operation that accepts a `domain` rejects `Some(_)` with
/// [`RoleManagerError::DomainNotSupported`] unless the backend is
/// domain-aware.
///
/// ```ignore
/// let rm: Arc<dyn RoleManager> = plugin.init(cfg).await?;
///
/// let roles = rm.get_roles("bob@example.com", None).await?;
/// let admin = rm.has_link("bob@example.com", "Admin", None).await?;
/// ```
#[async_trait]
pub trait RoleManager: Send + Sync {
    /// Reset all locally held role data.
    ///
    /// # Errors
    ///
    /// Backend specific. Backends without local role data never fail.
    fn clear(&self) -> Result<(), RoleManagerError>;

    /// Add the inheritance link `name1` -> `name2`.
    ///
    /// # Errors
    ///
    /// - `DomainNotSupported` if a domain is supplied to a backend without domains
    /// - `NotImplemented` for read-only backends
    fn add_link(
        &self,
        name1: &str,
        name2: &str,
        domain: Option<&str>,
    ) -> Result<(), RoleManagerError>;

    /// Delete the inheritance link `name1` -> `name2`.
    ///
    /// # Errors
    ///
    /// - `DomainNotSupported` if a domain is supplied to a backend without domains
    /// - `NotImplemented` for read-only backends
    fn delete_link(
        &self,
        name1: &str,
        name2: &str,
        domain: Option<&str>,
    ) -> Result<(), RoleManagerError>;

    /// Whether `name1` inherits the role `name2`.
    ///
    /// Must agree with [`RoleManager::get_roles`]: `true` iff `name2` is one
    /// of the roles returned for `name1`.
    ///
    /// # Errors
    ///
    /// - `DomainNotSupported` if a domain is supplied to a backend without domains
    /// - `NameNotFound` if `name1` is unknown to the backend
    /// - `Backend` if the backend call fails
    async fn has_link(
        &self,
        name1: &str,
        name2: &str,
        domain: Option<&str>,
    ) -> Result<bool, RoleManagerError>;

    /// Roles directly held by the subject `name`, in backend order.
    ///
    /// # Errors
    ///
    /// - `DomainNotSupported` if a domain is supplied to a backend without domains
    /// - `NameNotFound` if `name` is unknown to the backend
    /// - `Backend` if the backend call fails
    async fn get_roles(
        &self,
        name: &str,
        domain: Option<&str>,
    ) -> Result<Vec<String>, RoleManagerError>;

    /// Subjects holding the role `name`, in backend order.
    ///
    /// # Errors
    ///
    /// - `DomainNotSupported` if a domain is supplied to a backend without domains
    /// - `NameNotFound` if `name` is unknown to the backend
    /// - `Backend` if the backend call fails
    async fn get_users(
        &self,
        name: &str,
        domain: Option<&str>,
    ) -> Result<Vec<String>, RoleManagerError>;

    /// Dump the role graph to the log.
    ///
    /// # Errors
    ///
    /// `NotImplemented` for backends that cannot enumerate their graph.
    fn print_roles(&self) -> Result<(), RoleManagerError>;
}
