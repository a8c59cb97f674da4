//! `RoleManager` implementation for the Auth0 role manager plugin.

use async_trait::async_trait;
use role_manager_sdk::{RoleManager, RoleManagerError, ensure_no_domain};

use super::error::DomainError;
use super::service::Service;

fn log_and_convert(op: &str, e: DomainError) -> RoleManagerError {
    if e.is_remote() {
        tracing::error!(operation = op, error = ?e, "auth0 role manager call failed");
    } else {
        tracing::debug!(operation = op, error = %e, "auth0 role manager call rejected");
    }
    e.into()
}

fn not_implemented(operation: &'static str) -> RoleManagerError {
    DomainError::NotImplemented { operation }.into()
}

#[async_trait]
impl RoleManager for Service {
    /// The role graph lives in Auth0, so there is nothing local to reset.
    fn clear(&self) -> Result<(), RoleManagerError> {
        Ok(())
    }

    fn add_link(
        &self,
        _name1: &str,
        _name2: &str,
        domain: Option<&str>,
    ) -> Result<(), RoleManagerError> {
        ensure_no_domain(domain)?;
        Err(not_implemented("add_link"))
    }

    fn delete_link(
        &self,
        _name1: &str,
        _name2: &str,
        domain: Option<&str>,
    ) -> Result<(), RoleManagerError> {
        ensure_no_domain(domain)?;
        Err(not_implemented("delete_link"))
    }

    async fn has_link(
        &self,
        name1: &str,
        name2: &str,
        domain: Option<&str>,
    ) -> Result<bool, RoleManagerError> {
        ensure_no_domain(domain)?;
        self.inherits(name1, name2)
            .await
            .map_err(|e| log_and_convert("has_link", e))
    }

    async fn get_roles(
        &self,
        name: &str,
        domain: Option<&str>,
    ) -> Result<Vec<String>, RoleManagerError> {
        ensure_no_domain(domain)?;
        self.roles_of(name)
            .await
            .map_err(|e| log_and_convert("get_roles", e))
    }

    async fn get_users(
        &self,
        name: &str,
        domain: Option<&str>,
    ) -> Result<Vec<String>, RoleManagerError> {
        ensure_no_domain(domain)?;
        self.members_of(name)
            .await
            .map_err(|e| log_and_convert("get_users", e))
    }

    fn print_roles(&self) -> Result<(), RoleManagerError> {
        Err(not_implemented("print_roles"))
    }
}
