// ==========================================
// Sistema de Liquidación Portuaria - Ajuste de duración
// ==========================================
// Responsabilidad: derivar la duración operativa descontando las
// novedades que afectan productividad
// Línea roja: None se propaga (desconocido nunca se convierte en 0);
// el resultado puede ser negativo y NO se recorta
// ==========================================

use crate::domain::operacion::Novedad;

/// Duración operativa = minutos totales − tiempo muerto justificado
///
/// # Reglas
/// 1. minutos_totales = None → None (desconocido se propaga)
/// 2. Solo se descuentan novedades con afecta_productividad = true
/// 3. El resultado puede ser negativo si el tiempo muerto excede la
///    duración; el clasificador aguas abajo lo trata como no calculable
pub fn ajustar(minutos_totales: Option<i64>, novedades: &[Novedad]) -> Option<i64> {
    let total = minutos_totales?;
    let descuento: i64 = novedades
        .iter()
        .filter(|n| n.afecta_productividad)
        .map(|n| n.minutos)
        .sum();
    Some(total - descuento)
}
