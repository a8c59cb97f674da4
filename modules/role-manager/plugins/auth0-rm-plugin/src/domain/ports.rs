use async_trait::async_trait;

use crate::domain::error::DomainError;

/// A user as listed by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    pub id: String,
    /// Users provisioned without an email (e.g. passwordless SMS) have none.
    pub email: Option<String>,
}

/// A group as listed by the Authorization Extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGroup {
    pub id: String,
    pub name: Option<String>,
}

/// Remote directory holding users, groups and their memberships.
#[async_trait]
pub trait Auth0Directory: Send + Sync {
    /// All users of the tenant.
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, DomainError>;

    /// All groups of the Authorization Extension.
    async fn list_groups(&self) -> Result<Vec<DirectoryGroup>, DomainError>;

    /// Groups the user with `user_id` belongs to, in directory order.
    async fn user_groups(&self, user_id: &str) -> Result<Vec<DirectoryGroup>, DomainError>;

    /// Members of the group with `group_id`, in directory order.
    async fn group_members(&self, group_id: &str) -> Result<Vec<DirectoryUser>, DomainError>;
}
