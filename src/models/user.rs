use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::StoreError;

pub const MAX_AGE: i32 = 150;

/// Documento de usuário (armazenado no MongoDB, collection `users`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl UserDocument {
    /// Aplica os campos presentes no update (merge raso)
    pub fn merge(&mut self, update: UserUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
    }
}

/// Request para criar usuário. Campos desconhecidos são ignorados.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewUser {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), StoreError> {
        validate_name(&self.name)?;
        validate_optional(self.email.as_deref(), self.age)
    }

    pub fn into_document(self) -> UserDocument {
        UserDocument {
            id: None,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

/// Request para atualizar usuário. Só os campos presentes são alterados.
///
/// `email` e `age` distinguem ausente (`None`) de `null` (`Some(None)`),
/// que remove o campo. `name` é obrigatório e `null` é ignorado.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UserUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, nullable)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>, nullable)]
    pub age: Option<Option<i32>>,
}

/// Campo presente no JSON, mesmo que `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UserUpdate {
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        validate_optional(
            self.email.as_ref().and_then(|e| e.as_deref()),
            self.age.flatten(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation("Path `name` is required.".into()));
    }
    Ok(())
}

fn validate_optional(email: Option<&str>, age: Option<i32>) -> Result<(), StoreError> {
    if let Some(email) = email {
        if !email.contains('@') {
            return Err(StoreError::Validation(format!(
                "Path `email` is invalid ({}).",
                email
            )));
        }
    }
    if let Some(age) = age {
        if !(0..=MAX_AGE).contains(&age) {
            return Err(StoreError::Validation(format!(
                "Path `age` ({}) is outside the range 0..={}.",
                age, MAX_AGE
            )));
        }
    }
    Ok(())
}

/// Response de usuário
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl From<UserDocument> for User {
    fn from(d: UserDocument) -> Self {
        User {
            id: d.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: d.name,
            email: d.email,
            age: d.age,
        }
    }
}

/// Confirmação de remoção
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteUserResponse {
    pub message: String,
    pub name: String,
}

impl DeleteUserResponse {
    pub fn for_user(user: &User) -> Self {
        DeleteUserResponse {
            message: "User Deleted Successfully".to_string(),
            name: user.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_requires_name() {
        let user = NewUser { name: "  ".into(), email: None, age: None };
        assert!(matches!(user.validate(), Err(StoreError::Validation(_))));

        let user = NewUser { name: "Ada".into(), email: None, age: None };
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_email_and_age_rules() {
        let bad_email = UserUpdate { email: Some(Some("ada.example.com".into())), ..Default::default() };
        assert!(bad_email.validate().is_err());

        let bad_age = UserUpdate { age: Some(Some(-1)), ..Default::default() };
        assert!(bad_age.validate().is_err());

        let ok = UserUpdate {
            email: Some(Some("ada@example.com".into())),
            age: Some(Some(36)),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let user: NewUser = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "role": "admin"
        }))
        .unwrap();
        assert_eq!(user.name, "Ada");
        assert!(user.email.is_none());
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let mut doc = NewUser {
            name: "Ada".into(),
            email: Some("ada@example.com".into()),
            age: None,
        }
        .into_document();

        doc.merge(UserUpdate { name: Some("Ada L.".into()), ..Default::default() });

        assert_eq!(doc.name, "Ada L.");
        assert_eq!(doc.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_null_clears_optional_fields() {
        let update: UserUpdate = serde_json::from_value(serde_json::json!({
            "email": null,
            "name": null
        }))
        .unwrap();
        assert_eq!(update.email, Some(None));
        assert_eq!(update.age, None);
        assert!(update.name.is_none());
        assert!(!update.is_empty());
        assert!(update.validate().is_ok());

        let mut doc = NewUser {
            name: "Ada".into(),
            email: Some("ada@example.com".into()),
            age: Some(36),
        }
        .into_document();
        doc.merge(update);

        assert_eq!(doc.email, None);
        assert_eq!(doc.age, Some(36));
        assert_eq!(doc.name, "Ada");
    }

    #[test]
    fn test_response_renders_hex_id() {
        let oid = ObjectId::new();
        let mut doc = NewUser { name: "Ada".into(), email: None, age: None }.into_document();
        doc.id = Some(oid);

        let user = User::from(doc);
        assert_eq!(user.id, oid.to_hex());

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({ "id": oid.to_hex(), "name": "Ada" }));
    }
}
