//! Service implementation for the Auth0 role manager plugin.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::identity_map::IdentityMap;
use crate::domain::ports::Auth0Directory;

/// Auth0 role manager service.
///
/// Holds the identity snapshot taken at construction. The snapshot is only
/// replaced by an explicit [`Service::refresh`]; users and groups created
/// remotely after that point do not resolve until the next refresh.
pub struct Service {
    directory: Arc<dyn Auth0Directory>,
    identities: ArcSwap<IdentityMap>,
}

impl Service {
    /// Load the identity snapshot and build the service.
    ///
    /// # Errors
    ///
    /// Returns the directory error if either listing fails.
    pub async fn connect(directory: Arc<dyn Auth0Directory>) -> Result<Self, DomainError> {
        let identities = load_identities(directory.as_ref()).await?;
        Ok(Self {
            directory,
            identities: ArcSwap::from_pointee(identities),
        })
    }

    /// Re-read users and groups and publish a new snapshot.
    ///
    /// On failure the current snapshot is kept.
    ///
    /// # Errors
    ///
    /// Returns the directory error if either listing fails.
    pub async fn refresh(&self) -> Result<(), DomainError> {
        let identities = load_identities(self.directory.as_ref()).await?;
        self.identities.store(Arc::new(identities));
        Ok(())
    }

    /// Current identity snapshot.
    #[must_use]
    pub fn identities(&self) -> Arc<IdentityMap> {
        self.identities.load_full()
    }

    fn resolve(&self, name: &str) -> Result<String, DomainError> {
        self.identities
            .load()
            .id_of(name)
            .map(ToOwned::to_owned)
            .ok_or_else(|| DomainError::NameNotFound {
                name: name.to_owned(),
            })
    }

    /// Names of the groups the user `name` belongs to.
    ///
    /// # Errors
    ///
    /// - `NameNotFound` if `name` is not in the snapshot
    /// - the directory error if the lookup fails
    #[instrument(skip(self))]
    pub async fn roles_of(&self, name: &str) -> Result<Vec<String>, DomainError> {
        let user_id = self.resolve(name)?;
        let groups = self.directory.user_groups(&user_id).await?;

        let identities = self.identities.load();
        Ok(groups
            .into_iter()
            .filter_map(|g| match g.name {
                Some(name) => Some(name),
                None => {
                    let fallback = identities.name_of(&g.id).map(ToOwned::to_owned);
                    if fallback.is_none() {
                        warn!(group_id = %g.id, "Dropping unnamed group missing from snapshot");
                    }
                    fallback
                }
            })
            .collect())
    }

    /// Emails of the members of group `name`.
    ///
    /// # Errors
    ///
    /// - `NameNotFound` if `name` is not in the snapshot
    /// - the directory error if the lookup fails
    #[instrument(skip(self))]
    pub async fn members_of(&self, name: &str) -> Result<Vec<String>, DomainError> {
        let group_id = self.resolve(name)?;
        let members = self.directory.group_members(&group_id).await?;

        let identities = self.identities.load();
        Ok(members
            .into_iter()
            .filter_map(|u| match u.email {
                Some(email) => Some(email),
                None => {
                    let fallback = identities.name_of(&u.id).map(ToOwned::to_owned);
                    if fallback.is_none() {
                        warn!(user_id = %u.id, "Dropping member without email missing from snapshot");
                    }
                    fallback
                }
            })
            .collect())
    }

    /// Whether user `name` belongs to group `role`.
    ///
    /// # Errors
    ///
    /// Same as [`Service::roles_of`].
    pub async fn inherits(&self, name: &str, role: &str) -> Result<bool, DomainError> {
        let roles = self.roles_of(name).await?;
        Ok(roles.iter().any(|r| r == role))
    }
}

async fn load_identities(directory: &dyn Auth0Directory) -> Result<IdentityMap, DomainError> {
    info!("Loading (ID, name) mapping for users and groups");
    let users = directory.list_users().await?;
    let groups = directory.list_groups().await?;

    let identities = IdentityMap::build(&users, &groups);
    info!(
        users = users.len(),
        groups = groups.len(),
        names = identities.len(),
        "Identity mapping loaded"
    );
    Ok(identities)
}
