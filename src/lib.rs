// ==========================================
// Sistema de Liquidación Portuaria - Biblioteca núcleo
// ==========================================
// Motor de resolución de reglas y cómputo de tarifas: dada una
// operación (cliente, tipo de operación, tipo de producto, toneladas,
// ventana horaria, novedades) resuelve la regla aplicable más
// específica y deriva tarifa, duración operativa, indicador de
// productividad y totales de liquidación
// Línea roja: el motor es puro — mismas entradas, misma salida
// ==========================================

// ==========================================
// Declaración de módulos
// ==========================================

// Capa de dominio - entidades y tipos
pub mod domain;

// Capa de repositorio - acceso a datos
pub mod repository;

// Capa de motor - reglas de negocio
pub mod engine;

// Capa de configuración
pub mod config;

// Infraestructura de base de datos (conexión / PRAGMA unificado)
pub mod db;

// Sistema de logs
pub mod logging;

// Capa API - interfaces de negocio
pub mod api;

// ==========================================
// Reexportación de tipos núcleo
// ==========================================

// Tipos de dominio
pub use domain::types::{ColeccionRegla, Indicador, ScopeValue, TipoConcepto, Turno};

// Entidades de dominio
pub use domain::{
    Alcance, LineaLiquidacion, Novedad, Operacion, RangoToneladas, Regla, ResolucionConcepto,
    ResolucionResultado, ResumenLiquidacion, Tarifa, TarifaVehiculo, TotalConcepto,
};

// Motor
pub use engine::{
    ConsultaAlcance, ContextoProductividad, ContextoTarifa, LiquidacionEngine, MatcherConfig,
    VentanaDia,
};

// Configuración
pub use config::{ConfigLiquidacion, ConfigManager};

// API
pub use api::{OperacionApi, ReglaApi};

// ==========================================
// Constantes del sistema
// ==========================================

// Versión del sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nombre del sistema
pub const APP_NAME: &str = "Sistema de Liquidación Portuaria";
