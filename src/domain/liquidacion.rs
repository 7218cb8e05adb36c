// ==========================================
// Sistema de Liquidación Portuaria - Objetos de liquidación
// ==========================================
// Resultados de resolución y agregados de liquidación
// ==========================================

use crate::domain::regla::Regla;
use crate::domain::types::Indicador;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Resultado de resolución
// ==========================================

/// Resultado de resolver una regla para una operación
///
/// La ausencia de coincidencia es un resultado normal (regla = None),
/// nunca un error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolucionResultado {
    pub regla: Option<Regla>,
    pub valor_tarifa: Option<f64>,
    /// Tier de la cascada que produjo la coincidencia (1..=8);
    /// 0 indica fallback por subcadena
    pub tier_usado: Option<u8>,
}

impl ResolucionResultado {
    /// Resultado sin coincidencia
    pub fn sin_coincidencia() -> Self {
        Self {
            regla: None,
            valor_tarifa: None,
            tier_usado: None,
        }
    }
}

// ==========================================
// Línea y resumen de liquidación
// ==========================================

/// Insumo del agregador: una resolución lista para liquidar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolucionConcepto {
    pub concepto: String,
    pub cantidad: f64,
    pub valor_unitario: f64,
}

/// Línea de liquidación por operación (salida del orquestador)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineaLiquidacion {
    pub operacion_id: String,
    pub concepto: Option<String>,
    pub cantidad: f64,
    pub valor_unitario: f64,
    pub valor_total: f64,
    pub indicador: Indicador,
    pub duracion_operativa: Option<i64>,
    pub tier_usado: Option<u8>,
}

/// Totales acumulados de un concepto
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TotalConcepto {
    pub cantidad: f64,
    pub total: f64,
}

/// Resumen de liquidación: totales por concepto y total general
///
/// BTreeMap: iteración determinista por nombre de concepto
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResumenLiquidacion {
    pub por_concepto: BTreeMap<String, TotalConcepto>,
    pub total_general: f64,
}
