use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};

use super::{parse_object_id, UserStore};
use crate::models::{NewUser, User, UserDocument, UserUpdate};
use crate::utils::StoreError;

pub const USERS_COLLECTION: &str = "users";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Monta o client sem abrir conexão; use `ping` para verificar.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, mongodb::error::Error> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.app_name = Some("users-service".to_string());
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        Ok(Self { client, db })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

/// `UserStore` sobre a collection `users`
#[derive(Clone)]
pub struct MongoUserStore {
    db: MongoDB,
}

impl MongoUserStore {
    pub fn new(db: MongoDB) -> Self {
        Self { db }
    }

    fn users(&self) -> Collection<UserDocument> {
        self.db.collection::<UserDocument>(USERS_COLLECTION)
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut document = user.into_document();
        let result = self.users().insert_one(&document).await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Database("Inserted id is not an ObjectId".to_string()))?;
        document.id = Some(id);

        Ok(User::from(document))
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let cursor = self.users().find(doc! {}).await?;
        let documents: Vec<UserDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(User::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<User>, StoreError> {
        let object_id = parse_object_id(id)?;
        let found = self.users().find_one(doc! { "_id": object_id }).await?;
        Ok(found.map(User::from))
    }

    async fn update(&self, id: &str, update: UserUpdate) -> Result<Option<User>, StoreError> {
        let object_id = parse_object_id(id)?;

        // update sem operadores é rejeitado pelo servidor
        if update.is_empty() {
            let found = self.users().find_one(doc! { "_id": object_id }).await?;
            return Ok(found.map(User::from));
        }

        let updated = self
            .users()
            .find_one_and_update(doc! { "_id": object_id }, update_modifications(update))
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated.map(User::from))
    }

    async fn delete(&self, id: &str) -> Result<Option<User>, StoreError> {
        let object_id = parse_object_id(id)?;
        let removed = self
            .users()
            .find_one_and_delete(doc! { "_id": object_id })
            .await?;
        Ok(removed.map(User::from))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.ping().await.map_err(StoreError::from)
    }
}

/// `$set` para valores presentes, `$unset` para campos enviados como `null`
fn update_modifications(update: UserUpdate) -> Document {
    let mut set = Document::new();
    let mut unset = Document::new();

    if let Some(name) = update.name {
        set.insert("name", name);
    }
    match update.email {
        Some(Some(email)) => {
            set.insert("email", email);
        }
        Some(None) => {
            unset.insert("email", "");
        }
        None => {}
    }
    match update.age {
        Some(Some(age)) => {
            set.insert("age", age);
        }
        Some(None) => {
            unset.insert("age", "");
        }
        None => {}
    }

    let mut modifications = Document::new();
    if !set.is_empty() {
        modifications.insert("$set", set);
    }
    if !unset.is_empty() {
        modifications.insert("$unset", unset);
    }
    modifications
}
