// ==========================================
// Sistema de Liquidación Portuaria - Capa de repositorio
// ==========================================
// Acceso a datos; sin lógica de negocio
// ==========================================

pub mod error;
pub mod operacion_repo;
pub mod regla_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use operacion_repo::OperacionRepository;
pub use regla_repo::{MemReglaRepository, ReglaRepository, SqliteReglaRepository};
