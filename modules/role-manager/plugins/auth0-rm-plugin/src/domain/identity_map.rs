//! Name <-> ID snapshot of the tenant's users and groups.
//!
//! Users are keyed by email and groups by name, in one shared namespace.
//! The map is a bijection: every name has exactly one ID and every ID
//! exactly one name. When two entries claim the same name the later one
//! wins; groups are inserted after users, so a group shadows a user whose
//! email equals the group name.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::ports::{DirectoryGroup, DirectoryUser};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdentityMap {
    name_to_id: HashMap<String, String>,
    id_to_name: HashMap<String, String>,
}

impl IdentityMap {
    /// Build the snapshot from the full user and group listings.
    #[must_use]
    pub fn build(users: &[DirectoryUser], groups: &[DirectoryGroup]) -> Self {
        let mut map = Self::default();

        for user in users {
            let Some(email) = user.email.as_deref() else {
                debug!(user_id = %user.id, "Skipping user without email");
                continue;
            };
            map.insert(email, &user.id);
            debug!("{} -> {}", user.id, email);
        }

        for group in groups {
            let Some(name) = group.name.as_deref() else {
                debug!(group_id = %group.id, "Skipping group without name");
                continue;
            };
            map.insert(name, &group.id);
            debug!("{} -> {}", group.id, name);
        }

        map
    }

    fn insert(&mut self, name: &str, id: &str) {
        if let Some(old_id) = self.name_to_id.insert(name.to_owned(), id.to_owned())
            && old_id != id
        {
            warn!(name, old_id = %old_id, new_id = %id, "Name maps to more than one ID, keeping the last");
            self.id_to_name.remove(&old_id);
        }
        if let Some(old_name) = self.id_to_name.insert(id.to_owned(), name.to_owned())
            && old_name != name
        {
            self.name_to_id.remove(&old_name);
        }
    }

    /// Remote ID for a user email or group name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<&str> {
        self.name_to_id.get(name).map(String::as_str)
    }

    /// User email or group name for a remote ID.
    #[must_use]
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.id_to_name.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.name_to_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name_to_id.is_empty()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn user(id: &str, email: Option<&str>) -> DirectoryUser {
        DirectoryUser {
            id: id.to_owned(),
            email: email.map(ToOwned::to_owned),
        }
    }

    fn group(id: &str, name: &str) -> DirectoryGroup {
        DirectoryGroup {
            id: id.to_owned(),
            name: Some(name.to_owned()),
        }
    }

    #[test]
    fn maps_users_and_groups_both_ways() {
        let map = IdentityMap::build(
            &[user("auth0|1", Some("alice@test.com"))],
            &[group("g-1", "Group1")],
        );

        assert_eq!(map.len(), 2);
        assert_eq!(map.id_of("alice@test.com"), Some("auth0|1"));
        assert_eq!(map.id_of("Group1"), Some("g-1"));
        assert_eq!(map.name_of("auth0|1"), Some("alice@test.com"));
        assert_eq!(map.name_of("g-1"), Some("Group1"));
        assert_eq!(map.id_of("bob@test.com"), None);
    }

    #[test]
    fn users_without_email_are_skipped() {
        let map = IdentityMap::build(&[user("sms|1", None)], &[]);

        assert!(map.is_empty());
        assert_eq!(map.name_of("sms|1"), None);
    }

    #[test]
    fn group_shadows_user_with_same_name() {
        let map = IdentityMap::build(&[user("auth0|1", Some("ops"))], &[group("g-ops", "ops")]);

        assert_eq!(map.id_of("ops"), Some("g-ops"));
        assert_eq!(map.name_of("g-ops"), Some("ops"));
        // The shadowed user's reverse entry is dropped to keep the map a bijection.
        assert_eq!(map.name_of("auth0|1"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn repeated_id_keeps_latest_name() {
        let map = IdentityMap::build(
            &[
                user("auth0|1", Some("old@test.com")),
                user("auth0|1", Some("new@test.com")),
            ],
            &[],
        );

        assert_eq!(map.id_of("new@test.com"), Some("auth0|1"));
        assert_eq!(map.id_of("old@test.com"), None);
        assert_eq!(map.name_of("auth0|1"), Some("new@test.com"));
    }
}
