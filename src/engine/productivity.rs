// ==========================================
// Sistema de Liquidación Portuaria - Clasificador de productividad
// ==========================================
// Responsabilidad: ubicar la duración operativa frente a los minutos
// base del estándar en un indicador cualitativo
// Función total: toda combinación de entradas produce exactamente un
// estado; se evalúa en orden y gana el primer estado aplicable
// Línea roja: sin estado, sin efectos, sin I/O
// ==========================================

use crate::domain::regla::Regla;
use crate::domain::types::{Indicador, TipoConcepto};

/// Tolerancia por defecto de la banda NORMAL (minutos sobre la base)
pub const TOLERANCIA_NORMAL_MIN: f64 = 10.0;

/// Contexto de la operación clasificada
#[derive(Debug, Clone, Copy)]
pub struct ContextoProductividad {
    /// ¿Ya se digitó el peso bruto? (false + cuadrilla → PENDIENTE_PESO)
    pub peso_digitado: bool,
    /// ¿La operación aplica cuadrilla?
    pub aplica_cuadrilla: bool,
    pub tipo_concepto: TipoConcepto,
}

/// Clasifica la duración operativa contra el estándar
///
/// # Orden de estados (el primero aplicable gana)
/// 1. NO_APLICA: el concepto no es de cargue/descargue
/// 2. PENDIENTE_PESO: aplica cuadrilla y el peso bruto no está digitado
/// 3. SIN_CALCULAR: duración None o negativa
/// 4. SIN_ESTANDAR: no hubo estándar coincidente (o sin minutos base)
/// 5. OPTIMO: duracion < minutos_base (estricto)
/// 6. NORMAL: minutos_base <= duracion <= minutos_base + tolerancia
/// 7. LENTO: duracion > minutos_base + tolerancia
///
/// # Retorno
/// - (Indicador, Vec<String>): indicador + razones de la decisión
pub fn clasificar(
    duracion_operativa: Option<i64>,
    estandar: Option<&Regla>,
    contexto: &ContextoProductividad,
    tolerancia_min: f64,
) -> (Indicador, Vec<String>) {
    let mut razones = Vec::new();

    // Estado 1: concepto fuera del indicador
    if !contexto.tipo_concepto.es_cargue_descargue() {
        razones.push(format!("NO_APLICA: tipo_concepto={}", contexto.tipo_concepto));
        return (Indicador::NoAplica, razones);
    }

    // Estado 2: peso bruto pendiente
    if contexto.aplica_cuadrilla && !contexto.peso_digitado {
        razones.push("PENDIENTE_PESO: peso bruto sin digitar".to_string());
        return (Indicador::PendientePeso, razones);
    }

    // Estado 3: duración no calculable (None o negativa, nunca se fuerza a 0)
    let duracion = match duracion_operativa {
        Some(d) if d >= 0 => d as f64,
        Some(d) => {
            razones.push(format!("SIN_CALCULAR: duracion_operativa={} < 0", d));
            return (Indicador::SinCalcular, razones);
        }
        None => {
            razones.push("SIN_CALCULAR: duracion_operativa desconocida".to_string());
            return (Indicador::SinCalcular, razones);
        }
    };

    // Estado 4: sin estándar
    let minutos_base = match estandar.and_then(|e| e.minutos_base) {
        Some(base) => base,
        None => {
            razones.push("SIN_ESTANDAR: ningún estándar coincide".to_string());
            return (Indicador::SinEstandar, razones);
        }
    };

    // Estados 5-7: comparación contra la base
    if duracion < minutos_base {
        razones.push(format!("OPTIMO: {} < base={}", duracion, minutos_base));
        (Indicador::Optimo, razones)
    } else if duracion <= minutos_base + tolerancia_min {
        razones.push(format!(
            "NORMAL: base={} <= {} <= base+{}",
            minutos_base, duracion, tolerancia_min
        ));
        (Indicador::Normal, razones)
    } else {
        razones.push(format!(
            "LENTO: {} > base={} + {}",
            duracion, minutos_base, tolerancia_min
        ));
        (Indicador::Lento, razones)
    }
}
