// ==========================================
// Sistema de Liquidación Portuaria - Filtro por rango de toneladas
// ==========================================
// Responsabilidad: reducir el conjunto de reglas a las que cubren
// la cantidad consultada (rango inclusivo en ambos extremos)
// Línea roja: sin estado, sin efectos, sin I/O
// ==========================================

use crate::domain::regla::Regla;
use tracing::warn;

/// Decimales fijos de comparación de cantidades
const DECIMALES_COMPARACION: i32 = 2;

/// Redondea a 2 decimales antes de comparar
///
/// Evita que artefactos de punto flotante dejen un valor de frontera
/// fuera del rango al que fue destinado
pub fn redondear2(valor: f64) -> f64 {
    let factor = 10f64.powi(DECIMALES_COMPARACION);
    (valor * factor).round() / factor
}

/// Filtra las reglas cuyo rango contiene la cantidad
///
/// # Reglas
/// 1. Comparación inclusiva: min <= redondear2(cantidad) <= max
///    (ambos extremos del rango también redondeados)
/// 2. Rango malformado (max <= min): nunca coincide, se omite con un
///    warn; jamás se lanza error
/// 3. Resultado vacío es válido y se propaga como "sin coincidencia"
pub fn filtrar<'a>(reglas: &'a [Regla], cantidad: f64) -> Vec<&'a Regla> {
    let q = redondear2(cantidad);

    reglas
        .iter()
        .filter(|r| {
            if r.rango.es_malformado() {
                warn!(
                    regla_id = %r.id,
                    min = r.rango.min,
                    max = r.rango.max,
                    "rango malformado (max <= min), regla omitida"
                );
                return false;
            }
            let min = redondear2(r.rango.min);
            let max = redondear2(r.rango.max);
            q >= min && q <= max
        })
        .collect()
}
