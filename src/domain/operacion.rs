// ==========================================
// Sistema de Liquidación Portuaria - Entidad Operación
// ==========================================
// Registro operativo con sus novedades de tiempo muerto
// ==========================================

use crate::domain::types::{TipoConcepto, PESO_PENDIENTE};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// Novedad
// ==========================================

/// Evento de tiempo muerto registrado sobre una operación
///
/// Solo las novedades con `afecta_productividad = true` se descuentan
/// de la duración operativa; eliminar una novedad obliga a recalcular
/// la duración derivada de su operación (capa API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Novedad {
    pub id: String,
    pub tipo: String,
    pub minutos: i64,
    pub afecta_productividad: bool,
}

impl Novedad {
    pub fn new(tipo: impl Into<String>, minutos: i64, afecta_productividad: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tipo: tipo.into(),
            minutos: minutos.max(0),
            afecta_productividad,
        }
    }
}

// ==========================================
// Operación
// ==========================================

/// Registro operativo (motonave/vehículo atendido en muelle o patio)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operacion {
    pub id: String,
    pub cliente: String,
    pub tipo_operacion: String,
    pub tipo_producto: String,
    /// Toneladas; PESO_PENDIENTE (-1) mientras no se digite el peso bruto
    pub toneladas: f64,
    pub tipo_concepto: TipoConcepto,
    /// ¿Aplica cuadrilla? (condición del estado PENDIENTE_PESO)
    pub aplica_cuadrilla: bool,
    pub tipo_vehiculo: Option<String>,
    pub inicio: Option<NaiveDateTime>,
    pub fin: Option<NaiveDateTime>,
    pub novedades: Vec<Novedad>,
    /// Duración operativa derivada (minutos brutos menos novedades
    /// que afectan; None = no calculable)
    pub duracion_operativa: Option<i64>,
}

impl Operacion {
    /// ¿Ya se digitó el peso bruto?
    pub fn peso_digitado(&self) -> bool {
        (self.toneladas - PESO_PENDIENTE).abs() > f64::EPSILON && self.toneladas >= 0.0
    }

    /// Minutos transcurridos entre inicio y fin (None si falta alguno
    /// o si el fin precede al inicio)
    pub fn minutos_totales(&self) -> Option<i64> {
        match (self.inicio, self.fin) {
            (Some(i), Some(f)) if f >= i => Some((f - i).num_minutes()),
            _ => None,
        }
    }
}
