// ==========================================
// Sistema de Liquidación Portuaria - Capa de configuración
// ==========================================

pub mod config_manager;

pub use config_manager::ConfigManager;

use crate::engine::matcher::MatcherConfig;
use crate::engine::shift::VentanaDia;
use crate::engine::productivity::TOLERANCIA_NORMAL_MIN;
use chrono::NaiveTime;

/// Instantánea de configuración consumida por el motor de liquidación
#[derive(Debug, Clone)]
pub struct ConfigLiquidacion {
    /// Ventana del turno día (puede cruzar medianoche)
    pub ventana_dia: VentanaDia,
    /// Tolerancia de la banda NORMAL en minutos sobre la base
    pub tolerancia_normal_min: f64,
    pub matcher: MatcherConfig,
}

impl Default for ConfigLiquidacion {
    fn default() -> Self {
        Self {
            ventana_dia: VentanaDia::new(
                NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            ),
            tolerancia_normal_min: TOLERANCIA_NORMAL_MIN,
            matcher: MatcherConfig::default(),
        }
    }
}
