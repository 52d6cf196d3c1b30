//! In-memory user directory.
//!
//! Fed by the orchestrator from user sync; also the directory used in tests.

use crate::domain::{DirectoryError, UserRecord};
use crate::ports::outbound::UserDirectory;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// User directory keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let directory = Self::new();
        for user in users {
            directory.upsert(user);
        }
        directory
    }

    /// Insert or replace a user.
    pub fn upsert(&self, user: UserRecord) {
        self.users.write().insert(user.username.clone(), user);
    }

    pub fn remove(&self, username: &str) -> Option<UserRecord> {
        self.users.write().remove(username)
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn lookup_by_username(&self, username: &str) -> Result<UserRecord, DirectoryError> {
        self.users
            .read()
            .get(username)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(username.to_string()))
    }
}
