mod mongo;
#[cfg(test)]
pub mod memory;

pub use mongo::{MongoDB, MongoUserStore};

use async_trait::async_trait;

use crate::models::{NewUser, User, UserUpdate};
use crate::utils::StoreError;

/// Operações sobre a collection de usuários.
///
/// Registro ausente é `Ok(None)`, nunca erro.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
    async fn list(&self) -> Result<Vec<User>, StoreError>;
    async fn get(&self, id: &str) -> Result<Option<User>, StoreError>;
    /// Retorna o registro já com o update aplicado
    async fn update(&self, id: &str, update: UserUpdate) -> Result<Option<User>, StoreError>;
    /// Retorna o registro removido
    async fn delete(&self, id: &str) -> Result<Option<User>, StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}

pub(crate) fn parse_object_id(id: &str) -> Result<mongodb::bson::oid::ObjectId, StoreError> {
    mongodb::bson::oid::ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Verifica o store na inicialização.
///
/// Falha de ping só é logada, a não ser que `require` esteja ligado.
pub async fn check_store(store: &dyn UserStore, require: bool) -> std::io::Result<()> {
    match store.ping().await {
        Ok(()) => {
            log::info!("✅ MongoDB connected");
            Ok(())
        }
        Err(e) => {
            log::error!("❌ MongoDB connection error: {}", e);
            if require {
                return Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e));
            }
            log::warn!("⚠️ Starting without database (REQUIRE_DATABASE=false)");
            Ok(())
        }
    }
}
