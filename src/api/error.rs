// ==========================================
// Sistema de Liquidación Portuaria - Errores de la capa API
// ==========================================
// Responsabilidad: convertir errores de repositorio en mensajes
// accionables para la capa externa (reportes/formularios)
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Errores de la capa API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("entrada inválida: {0}")]
    InvalidInput(String),

    #[error("recurso no encontrado: {0}")]
    NotFound(String),

    #[error("regla en conflicto: {0}")]
    ReglaEnConflicto(String),

    #[error("error de base de datos: {0}")]
    DatabaseError(String),

    #[error("error interno: {0}")]
    InternalError(String),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entidad, id } => {
                ApiError::NotFound(format!("{} con id={}", entidad, id))
            }
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            RepositoryError::UniqueConstraintViolation(msg) => ApiError::ReglaEnConflicto(msg),
            RepositoryError::DatabaseConnectionError(msg)
            | RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::LockError(msg)
            | RepositoryError::ForeignKeyViolation(msg) => ApiError::DatabaseError(msg),
            RepositoryError::SerializationError { campo, mensaje } => {
                ApiError::InternalError(format!("serialización ({}): {}", campo, mensaje))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

/// Alias de resultado de la capa API
pub type ApiResult<T> = Result<T, ApiError>;
