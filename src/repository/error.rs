// ==========================================
// Sistema de Liquidación Portuaria - Errores de la capa de repositorio
// ==========================================
// Herramienta: macro derive de thiserror
// ==========================================

use thiserror::Error;

/// Errores de la capa de repositorio
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Errores de base de datos =====
    #[error("registro no encontrado: {entidad} con id={id}")]
    NotFound { entidad: String, id: String },

    #[error("fallo de conexión a base de datos: {0}")]
    DatabaseConnectionError(String),

    #[error("fallo al adquirir el candado de base de datos: {0}")]
    LockError(String),

    #[error("fallo de consulta a base de datos: {0}")]
    DatabaseQueryError(String),

    #[error("violación de restricción única: {0}")]
    UniqueConstraintViolation(String),

    #[error("violación de llave foránea: {0}")]
    ForeignKeyViolation(String),

    // ===== Errores de calidad de datos =====
    #[error("fallo de validación de datos: {0}")]
    ValidationError(String),

    #[error("fallo de serialización (campo={campo}): {mensaje}")]
    SerializationError { campo: String, mensaje: String },

    // ===== Errores genéricos =====
    #[error("error interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            otro => RepositoryError::DatabaseQueryError(otro.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError {
            campo: "json".to_string(),
            mensaje: err.to_string(),
        }
    }
}

/// Alias de resultado de la capa de repositorio
pub type RepositoryResult<T> = Result<T, RepositoryError>;
