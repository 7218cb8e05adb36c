// ==========================================
// Sistema de Liquidación Portuaria - Capa de dominio
// ==========================================

pub mod liquidacion;
pub mod operacion;
pub mod regla;
pub mod types;

pub use liquidacion::{
    LineaLiquidacion, ResolucionConcepto, ResolucionResultado, ResumenLiquidacion, TotalConcepto,
};
pub use operacion::{Novedad, Operacion};
pub use regla::{Alcance, RangoToneladas, Regla, Tarifa, TarifaVehiculo};
pub use types::{ColeccionRegla, Indicador, ScopeValue, TipoConcepto, Turno};
