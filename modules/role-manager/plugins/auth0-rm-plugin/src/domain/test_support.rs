#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::ports::{Auth0Directory, DirectoryGroup, DirectoryUser};

/// In-memory directory with switchable failures.
///
/// `scenario()` holds the tenant graph
///
/// ```text
///            Group1      Admin
///         /          \  /
/// alice@test.com    bob@test.com
/// ```
#[derive(Default)]
pub struct FakeDirectory {
    users: Mutex<Vec<DirectoryUser>>,
    groups: Vec<DirectoryGroup>,
    user_groups: Mutex<HashMap<String, Vec<DirectoryGroup>>>,
    group_members: HashMap<String, Vec<DirectoryUser>>,
    membership_calls: AtomicUsize,
    fail_listing: AtomicBool,
    fail_membership: AtomicBool,
}

fn user(id: &str, email: &str) -> DirectoryUser {
    DirectoryUser {
        id: id.to_owned(),
        email: Some(email.to_owned()),
    }
}

fn group(id: &str, name: &str) -> DirectoryGroup {
    DirectoryGroup {
        id: id.to_owned(),
        name: Some(name.to_owned()),
    }
}

fn server_error() -> DomainError {
    DomainError::UnexpectedStatus {
        url: "fake://directory".to_owned(),
        status: 500,
        body: "boom".to_owned(),
    }
}

impl FakeDirectory {
    pub fn scenario() -> Self {
        let alice = user("u1", "alice@test.com");
        let bob = user("u2", "bob@test.com");
        let group1 = group("g1", "Group1");
        let admin = group("g2", "Admin");

        Self {
            users: Mutex::new(vec![alice.clone(), bob.clone()]),
            groups: vec![group1.clone(), admin.clone()],
            user_groups: Mutex::new(HashMap::from([
                ("u1".to_owned(), vec![group1.clone()]),
                ("u2".to_owned(), vec![group1, admin]),
            ])),
            group_members: HashMap::from([
                ("g1".to_owned(), vec![alice, bob.clone()]),
                ("g2".to_owned(), vec![bob]),
            ]),
            ..Self::default()
        }
    }

    pub fn membership_calls(&self) -> usize {
        self.membership_calls.load(Ordering::SeqCst)
    }

    pub fn fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    pub fn fail_membership(&self, fail: bool) {
        self.fail_membership.store(fail, Ordering::SeqCst);
    }

    pub fn add_user(&self, user: DirectoryUser) {
        self.users.lock().unwrap().push(user);
    }

    pub fn set_user_groups(&self, user_id: &str, groups: Vec<DirectoryGroup>) {
        self.user_groups
            .lock()
            .unwrap()
            .insert(user_id.to_owned(), groups);
    }
}

#[async_trait]
impl Auth0Directory for FakeDirectory {
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, DomainError> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(self.users.lock().unwrap().clone())
    }

    async fn list_groups(&self) -> Result<Vec<DirectoryGroup>, DomainError> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(self.groups.clone())
    }

    async fn user_groups(&self, user_id: &str) -> Result<Vec<DirectoryGroup>, DomainError> {
        self.membership_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_membership.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(self
            .user_groups
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn group_members(&self, group_id: &str) -> Result<Vec<DirectoryUser>, DomainError> {
        self.membership_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_membership.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(self
            .group_members
            .get(group_id)
            .cloned()
            .unwrap_or_default())
    }
}
