// ==========================================
// Sistema de Liquidación Portuaria - Entidad Regla
// ==========================================
// Una Regla cubre tanto estándares operativos (minutos base)
// como conceptos de facturación (tarifas)
// ==========================================

use crate::domain::types::{ColeccionRegla, ScopeValue};
use serde::{Deserialize, Serialize};

// ==========================================
// Alcance de una regla
// ==========================================

/// Dimensiones de coincidencia de una regla
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alcance {
    pub cliente: ScopeValue,
    pub tipo_operacion: ScopeValue,
    pub tipo_producto: ScopeValue,
}

impl Alcance {
    pub fn new(cliente: ScopeValue, tipo_operacion: ScopeValue, tipo_producto: ScopeValue) -> Self {
        Self {
            cliente,
            tipo_operacion,
            tipo_producto,
        }
    }

    /// Alcance totalmente comodín (tier 8)
    pub fn comodin() -> Self {
        Self {
            cliente: ScopeValue::Cualquiera,
            tipo_operacion: ScopeValue::Cualquiera,
            tipo_producto: ScopeValue::Cualquiera,
        }
    }
}

// ==========================================
// Rango de toneladas
// ==========================================

/// Rango inclusivo en ambos extremos sobre la cantidad medida (toneladas)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangoToneladas {
    pub min: f64,
    pub max: f64,
}

impl RangoToneladas {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Un rango con max <= min nunca coincide (dato malformado;
    /// la validación en el guardado debe rechazarlo, el motor lo omite)
    pub fn es_malformado(&self) -> bool {
        self.max <= self.min
    }
}

// ==========================================
// Tarifa (payload de la regla)
// ==========================================

/// Tarifa por tipo de vehículo con valores diurno/nocturno
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TarifaVehiculo {
    pub tipo_vehiculo: String,
    pub valor_dia: f64,
    pub valor_noche: f64,
}

/// Payload de valor de una regla
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tarifa {
    /// Valor plano, independiente del turno
    Plana { valor: f64 },
    /// Valores diurno/nocturno; el turno se decide por hora de fin
    DiaNoche { valor_dia: f64, valor_noche: f64 },
    /// Sub-tarifas por tipo de vehículo; el turno se decide por
    /// ventana completa de la operación
    PorVehiculo { tarifas: Vec<TarifaVehiculo> },
}

// ==========================================
// Regla
// ==========================================

/// Regla de configuración: estándar operativo o concepto de facturación
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regla {
    pub id: String,
    pub coleccion: ColeccionRegla,
    /// Nombre del concepto (usado como llave de agregación en liquidación)
    pub concepto: String,
    pub alcance: Alcance,
    pub rango: RangoToneladas,
    pub tarifa: Tarifa,
    /// Minutos base del estándar (solo colección Estandar)
    pub minutos_base: Option<f64>,
}

impl Regla {
    /// Constructor para estándares operativos
    pub fn estandar(
        concepto: impl Into<String>,
        alcance: Alcance,
        rango: RangoToneladas,
        minutos_base: f64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            coleccion: ColeccionRegla::Estandar,
            concepto: concepto.into(),
            alcance,
            rango,
            tarifa: Tarifa::Plana { valor: 0.0 },
            minutos_base: Some(minutos_base),
        }
    }

    /// Constructor para conceptos de facturación
    pub fn concepto(
        concepto: impl Into<String>,
        alcance: Alcance,
        rango: RangoToneladas,
        tarifa: Tarifa,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            coleccion: ColeccionRegla::Concepto,
            concepto: concepto.into(),
            alcance,
            rango,
            tarifa,
            minutos_base: None,
        }
    }
}
