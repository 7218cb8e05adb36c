// ==========================================
// Sistema de Liquidación Portuaria - Capa API
// ==========================================
// Interfaces de negocio para la capa externa (reportes/formularios)
// ==========================================

pub mod error;
pub mod operacion_api;
pub mod regla_api;
pub mod validator;

pub use error::{ApiError, ApiResult};
pub use operacion_api::OperacionApi;
pub use regla_api::ReglaApi;
