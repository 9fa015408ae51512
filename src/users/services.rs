use std::sync::Arc;

use tracing::{debug, info};

use crate::error::ApiError;
use crate::users::repo::UserStore;
use crate::users::repo_types::{NewUser, User};

/// Business rules for user records, independent of HTTP.
///
/// Safe to share between concurrent requests: all state lives in the store.
/// `update` is a read followed by a write with no lock in between, so two
/// concurrent updates of the same id resolve as last-write-wins.
#[derive(Clone)]
pub struct AccountManager {
    store: Arc<dyn UserStore>,
}

impl AccountManager {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Always inserts. Duplicate emails are accepted.
    pub async fn register(&self, user: NewUser) -> Result<User, ApiError> {
        let user = self.store.insert(&user).await?;
        info!(user_id = user.id, "user registered");
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self.store.find_by_email(email).await?)
    }

    /// Full overwrite keyed by `user.id`; `None` if the id was never assigned
    /// or the row is gone.
    pub async fn update(&self, user: User) -> Result<Option<User>, ApiError> {
        if self.store.find_by_id(user.id).await?.is_none() {
            debug!(user_id = user.id, "update target missing");
            return Ok(None);
        }
        let updated = self.store.update(&user).await?;
        if updated.is_some() {
            info!(user_id = user.id, "user updated");
        }
        Ok(updated)
    }

    /// Does not report whether a row existed.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ApiError> {
        self.store.delete_by_id(id).await?;
        info!(user_id = id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo::memory::{DownUserStore, MemoryUserStore};

    fn manager() -> (AccountManager, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::default());
        (AccountManager::new(store.clone()), store)
    }

    fn new_user(name: &str, email: &str, password: &str) -> NewUser {
        NewUser {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn register_then_find_by_email_round_trips() {
        let (accounts, _) = manager();
        let created = accounts
            .register(new_user("Max", "max@email.com", "123"))
            .await
            .unwrap();

        let found = accounts.find_by_email("max@email.com").await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn register_allows_duplicate_email() {
        let (accounts, store) = manager();
        let a = accounts.register(new_user("Max", "max@email.com", "1")).await.unwrap();
        let b = accounts.register(new_user("Max", "max@email.com", "2")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn unknown_email_is_absent() {
        let (accounts, _) = manager();
        assert_eq!(accounts.find_by_email("bob@email.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_preserves_identity() {
        let (accounts, _) = manager();
        let created = accounts
            .register(new_user("Max", "max@email.com", "123"))
            .await
            .unwrap();

        let changed = new_user("Neo", "neo@email.com", "789").with_id(created.id);
        let updated = accounts.update(changed.clone()).await.unwrap();
        assert_eq!(updated, Some(changed));

        assert_eq!(accounts.find_by_email("max@email.com").await.unwrap(), None);
        let found = accounts.find_by_email("neo@email.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn update_of_unknown_id_creates_nothing() {
        let (accounts, store) = manager();
        let ghost = new_user("Neo", "neo@email.com", "789").with_id(100);
        assert_eq!(accounts.update(ghost).await.unwrap(), None);
        assert_eq!(store.len(), 0);
        assert_eq!(accounts.find_by_email("neo@email.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (accounts, _) = manager();
        let created = accounts
            .register(new_user("Max", "max@email.com", "123"))
            .await
            .unwrap();

        accounts.delete_by_id(created.id).await.unwrap();
        accounts.delete_by_id(created.id).await.unwrap();
        assert_eq!(accounts.find_by_email("max@email.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_unavailable() {
        let accounts = AccountManager::new(Arc::new(DownUserStore));
        let err = accounts.find_by_email("max@email.com").await.unwrap_err();
        assert!(matches!(err, ApiError::StorageUnavailable(_)));
    }
}
