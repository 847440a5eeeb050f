use serde::Serialize;
use thiserror::Error;

/// Falhas retornadas pelo store de usuários.
///
/// "Não encontrado" não é um erro: as operações retornam `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Identificador que não é um ObjectId válido
    #[error("Cast to ObjectId failed for value \"{0}\"")]
    InvalidId(String),
    /// Documento rejeitado pelas regras do schema
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Database(String),
}

impl StoreError {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::InvalidId(_) => "CastError",
            StoreError::Validation(_) => "ValidationError",
            StoreError::Database(_) => "DatabaseError",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        // insert_one reporta como WriteError, find_one_and_update como Command
        match e.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(we)) => {
                StoreError::from_server_code(we.code, &we.message, &e)
            }
            ErrorKind::Command(ce) => StoreError::from_server_code(ce.code, &ce.message, &e),
            _ => StoreError::Database(e.to_string()),
        }
    }
}

/// DocumentValidationFailure (validator da collection)
pub const DOCUMENT_VALIDATION_FAILURE: i32 = 121;

impl StoreError {
    fn from_server_code(code: i32, message: &str, source: &impl std::fmt::Display) -> Self {
        if code == DOCUMENT_VALIDATION_FAILURE {
            StoreError::Validation(message.to_string())
        } else {
            StoreError::Database(source.to_string())
        }
    }
}

/// Corpo das respostas 400/500
#[derive(Debug, Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}
