// ==========================================
// Sistema de Liquidación Portuaria - Capa de motor
// ==========================================
// Reglas de negocio puras + orquestación de liquidación
// ==========================================

pub mod duration;
pub mod liquidation;
pub mod matcher;
pub mod productivity;
pub mod range_filter;
pub mod resolver;
pub mod shift;

pub use matcher::{ConsultaAlcance, MatcherConfig, ModoDimension};
pub use productivity::{ContextoProductividad, TOLERANCIA_NORMAL_MIN};
pub use resolver::{ContextoTarifa, LiquidacionEngine};
pub use shift::VentanaDia;
