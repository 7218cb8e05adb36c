// ==========================================
// Sistema de Liquidación Portuaria - Tipos de dominio
// ==========================================
// Comodines: el origen de datos usa los centinelas "TODOS"/"TODAS";
// en memoria se modelan como variante etiquetada (ScopeValue)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Valor de alcance (Scope Value)
// ==========================================
// Línea roja: ningún módulo compara contra "TODOS" directamente;
// el centinela solo existe en la frontera de almacenamiento
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeValue {
    /// Coincide únicamente con el valor exacto
    Exacto(String),
    /// Comodín: coincide con cualquier valor
    Cualquiera,
}

/// Centinelas heredados del origen de datos
pub const COMODIN_TODOS: &str = "TODOS";
pub const COMODIN_TODAS: &str = "TODAS";

impl ScopeValue {
    /// Interpreta un valor textual de la capa de almacenamiento
    ///
    /// # Reglas
    /// - "TODOS" / "TODAS" (sin distinguir mayúsculas) → Cualquiera
    /// - cualquier otro texto → Exacto(texto)
    pub fn parse(raw: &str) -> Self {
        let limpio = raw.trim();
        if limpio.eq_ignore_ascii_case(COMODIN_TODOS) || limpio.eq_ignore_ascii_case(COMODIN_TODAS)
        {
            ScopeValue::Cualquiera
        } else {
            ScopeValue::Exacto(limpio.to_string())
        }
    }

    /// Representación para la capa de almacenamiento (centinela canónico)
    pub fn as_storage(&self) -> &str {
        match self {
            ScopeValue::Exacto(v) => v,
            ScopeValue::Cualquiera => COMODIN_TODOS,
        }
    }

    /// ¿Es comodín?
    pub fn es_comodin(&self) -> bool {
        matches!(self, ScopeValue::Cualquiera)
    }

    /// ¿Coincide exactamente con el valor consultado?
    pub fn coincide_exacto(&self, valor: &str) -> bool {
        matches!(self, ScopeValue::Exacto(v) if v == valor)
    }
}

impl fmt::Display for ScopeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeValue::Exacto(v) => write!(f, "{}", v),
            ScopeValue::Cualquiera => write!(f, "{}", COMODIN_TODOS),
        }
    }
}

// ==========================================
// Colección de reglas
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColeccionRegla {
    /// Estándar operativo (minutos base por rango de toneladas)
    Estandar,
    /// Concepto de facturación (tarifa monetaria)
    Concepto,
}

impl fmt::Display for ColeccionRegla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColeccionRegla::Estandar => write!(f, "ESTANDAR"),
            ColeccionRegla::Concepto => write!(f, "CONCEPTO"),
        }
    }
}

impl ColeccionRegla {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ESTANDAR" => Some(ColeccionRegla::Estandar),
            "CONCEPTO" => Some(ColeccionRegla::Concepto),
            _ => None,
        }
    }
}

// ==========================================
// Turno (día / noche)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Turno {
    Dia,
    Noche,
}

impl fmt::Display for Turno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turno::Dia => write!(f, "DIA"),
            Turno::Noche => write!(f, "NOCHE"),
        }
    }
}

// ==========================================
// Indicador de productividad
// ==========================================
// Orden de prioridad: el clasificador evalúa de arriba hacia abajo
// y devuelve el primer estado aplicable (función total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Indicador {
    /// El concepto no es de cargue/descargue
    NoAplica,
    /// Producto fijo con cuadrilla, peso bruto aún no digitado
    PendientePeso,
    /// Duración operativa desconocida o negativa
    SinCalcular,
    /// Ningún estándar coincide con la operación
    SinEstandar,
    /// duracion_operativa < minutos_base
    Optimo,
    /// minutos_base <= duracion_operativa <= minutos_base + tolerancia
    Normal,
    /// duracion_operativa > minutos_base + tolerancia
    Lento,
}

impl fmt::Display for Indicador {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indicador::NoAplica => write!(f, "NO_APLICA"),
            Indicador::PendientePeso => write!(f, "PENDIENTE_PESO"),
            Indicador::SinCalcular => write!(f, "SIN_CALCULAR"),
            Indicador::SinEstandar => write!(f, "SIN_ESTANDAR"),
            Indicador::Optimo => write!(f, "OPTIMO"),
            Indicador::Normal => write!(f, "NORMAL"),
            Indicador::Lento => write!(f, "LENTO"),
        }
    }
}

// ==========================================
// Tipo de concepto
// ==========================================
// Solo cargue/descargue participan del indicador de productividad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoConcepto {
    Cargue,
    Descargue,
    Otro,
}

impl TipoConcepto {
    /// ¿El concepto participa del indicador de productividad?
    pub fn es_cargue_descargue(&self) -> bool {
        matches!(self, TipoConcepto::Cargue | TipoConcepto::Descargue)
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CARGUE" => TipoConcepto::Cargue,
            "DESCARGUE" => TipoConcepto::Descargue,
            _ => TipoConcepto::Otro,
        }
    }
}

impl fmt::Display for TipoConcepto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipoConcepto::Cargue => write!(f, "CARGUE"),
            TipoConcepto::Descargue => write!(f, "DESCARGUE"),
            TipoConcepto::Otro => write!(f, "OTRO"),
        }
    }
}

// ==========================================
// Centinelas numéricos
// ==========================================

/// Toneladas aún no digitadas (peso bruto pendiente)
pub const PESO_PENDIENTE: f64 = -1.0;
