use std::collections::BTreeMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{parse_object_id, UserStore};
use crate::models::{NewUser, User, UserDocument, UserUpdate};
use crate::utils::StoreError;

/// Store em memória com a mesma semântica do MongoUserStore (testes)
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<BTreeMap<ObjectId, UserDocument>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let id = ObjectId::new();
        let mut document = user.into_document();
        document.id = Some(id);

        self.users.write().await.insert(id, document.clone());
        Ok(User::from(document))
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().map(User::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<User>, StoreError> {
        let object_id = parse_object_id(id)?;
        let users = self.users.read().await;
        Ok(users.get(&object_id).cloned().map(User::from))
    }

    async fn update(&self, id: &str, update: UserUpdate) -> Result<Option<User>, StoreError> {
        let object_id = parse_object_id(id)?;
        let mut users = self.users.write().await;

        Ok(users.get_mut(&object_id).map(|document| {
            document.merge(update);
            User::from(document.clone())
        }))
    }

    async fn delete(&self, id: &str) -> Result<Option<User>, StoreError> {
        let object_id = parse_object_id(id)?;
        let removed = self.users.write().await.remove(&object_id);
        Ok(removed.map(User::from))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Store cujas operações sempre falham (mapeamento 400/500)
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn create(&self, _user: NewUser) -> Result<User, StoreError> {
        Err(StoreError::Database("connection refused".into()))
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Err(StoreError::Database("connection refused".into()))
    }

    async fn get(&self, _id: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Database("connection refused".into()))
    }

    async fn update(&self, _id: &str, _update: UserUpdate) -> Result<Option<User>, StoreError> {
        Err(StoreError::Database("connection refused".into()))
    }

    async fn delete(&self, _id: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Database("connection refused".into()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Database("connection refused".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> NewUser {
        NewUser { name: "Ada".into(), email: Some("ada@example.com".into()), age: None }
    }

    #[tokio::test]
    async fn test_update_returns_merged_record() {
        let store = InMemoryUserStore::new();
        let created = store.create(ada()).await.unwrap();

        let updated = store
            .update(&created.id, UserUpdate { age: Some(Some(36)), ..Default::default() })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.age, Some(36));
        assert_eq!(updated.email.as_deref(), Some("ada@example.com"));
        assert_eq!(store.get(&created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_missing_record_is_none() {
        let store = InMemoryUserStore::new();
        let missing = ObjectId::new().to_hex();

        assert_eq!(store.get(&missing).await, Ok(None));
        assert_eq!(store.update(&missing, UserUpdate::default()).await, Ok(None));
        assert_eq!(store.delete(&missing).await, Ok(None));
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = InMemoryUserStore::new();
        let created = store.create(ada()).await.unwrap();

        let removed = store.delete(&created.id).await.unwrap();
        assert_eq!(removed.map(|u| u.name), Some("Ada".to_string()));
        assert!(store.list().await.unwrap().is_empty());
    }
}
