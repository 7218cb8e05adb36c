// ==========================================
// Sistema de Liquidación Portuaria - Cascada de especificidad
// ==========================================
// Responsabilidad: elegir la regla más específica entre reglas
// solapadas y parcialmente comodín
// Cascada: 8 tiers generados de las combinaciones 2×2×2
// (Exacto|Comodin) con el cliente como dimensión más significativa
// Línea roja: sin estado, sin efectos, sin I/O
// ==========================================

use crate::domain::regla::Regla;
use crate::domain::types::ScopeValue;
use tracing::{debug, warn};

// ==========================================
// Modos de dimensión y tiers
// ==========================================

/// Modo de coincidencia exigido a una dimensión dentro de un tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModoDimension {
    /// La regla debe tener el valor exacto de la consulta
    Exacto,
    /// La regla debe ser comodín en esta dimensión
    Comodin,
}

/// Tier de la cascada: modo exigido por dimensión
pub type Tier = (ModoDimension, ModoDimension, ModoDimension);

/// Genera los 8 tiers en orden de especificidad
///
/// Orden lexicográfico con Exacto antes que Comodin y el cliente como
/// dimensión más significativa, luego tipo de operación, luego tipo de
/// producto. Esto reproduce la cascada histórica:
///   1. E/E/E   2. E/E/C   3. E/C/E   4. E/C/C
///   5. C/E/E   6. C/E/C   7. C/C/E   8. C/C/C
/// y generaliza a N dimensiones sin enumerar 2^N ramas a mano
pub fn tiers() -> Vec<Tier> {
    const MODOS: [ModoDimension; 2] = [ModoDimension::Exacto, ModoDimension::Comodin];
    let mut resultado = Vec::with_capacity(8);
    for cliente in MODOS {
        for operacion in MODOS {
            for producto in MODOS {
                resultado.push((cliente, operacion, producto));
            }
        }
    }
    resultado
}

// ==========================================
// Consulta y configuración
// ==========================================

/// Dimensiones de la operación consultada
#[derive(Debug, Clone, PartialEq)]
pub struct ConsultaAlcance {
    pub cliente: String,
    pub tipo_operacion: String,
    pub tipo_producto: String,
}

impl ConsultaAlcance {
    pub fn new(
        cliente: impl Into<String>,
        tipo_operacion: impl Into<String>,
        tipo_producto: impl Into<String>,
    ) -> Self {
        Self {
            cliente: cliente.into(),
            tipo_operacion: tipo_operacion.into(),
            tipo_producto: tipo_producto.into(),
        }
    }
}

/// Configuración del matcher
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Heurística legada: si ningún tier coincide, aceptar reglas cuyo
    /// cliente exacto sea subcadena del cliente consultado. Ambigua por
    /// diseño (un cliente que contiene el nombre de otro coincide en
    /// falso); se conserva por compatibilidad y se advierte en el log
    pub habilitar_fallback_subcadena: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            habilitar_fallback_subcadena: true,
        }
    }
}

// ==========================================
// Coincidencia
// ==========================================

/// ¿La dimensión de la regla satisface el modo del tier?
fn dimension_coincide(modo: ModoDimension, valor_regla: &ScopeValue, valor_consulta: &str) -> bool {
    match modo {
        ModoDimension::Exacto => valor_regla.coincide_exacto(valor_consulta),
        ModoDimension::Comodin => valor_regla.es_comodin(),
    }
}

/// ¿La regla satisface el tier completo para la consulta?
fn regla_coincide_tier(regla: &Regla, tier: Tier, consulta: &ConsultaAlcance) -> bool {
    let (mc, mo, mp) = tier;
    dimension_coincide(mc, &regla.alcance.cliente, &consulta.cliente)
        && dimension_coincide(mo, &regla.alcance.tipo_operacion, &consulta.tipo_operacion)
        && dimension_coincide(mp, &regla.alcance.tipo_producto, &consulta.tipo_producto)
}

/// Fallback por subcadena: cliente exacto de la regla contenido en el
/// cliente consultado; operación y producto exactos o comodín
fn regla_coincide_subcadena(regla: &Regla, consulta: &ConsultaAlcance) -> bool {
    let cliente_ok = match &regla.alcance.cliente {
        ScopeValue::Exacto(c) => !c.is_empty() && consulta.cliente.contains(c.as_str()),
        ScopeValue::Cualquiera => false,
    };
    let operacion_ok = regla.alcance.tipo_operacion.es_comodin()
        || regla
            .alcance
            .tipo_operacion
            .coincide_exacto(&consulta.tipo_operacion);
    let producto_ok = regla.alcance.tipo_producto.es_comodin()
        || regla
            .alcance
            .tipo_producto
            .coincide_exacto(&consulta.tipo_producto);

    cliente_ok && operacion_ok && producto_ok
}

/// Resuelve la regla más específica para la consulta
///
/// # Reglas
/// 1. Se evalúan los 8 tiers en orden; el primer tier con alguna
///    coincidencia decide
/// 2. Dentro de un tier, gana la primera regla en orden de entrada
///    (desempate determinista; la calidad del dato es responsabilidad
///    de la validación en el guardado)
/// 3. Sin coincidencia en ningún tier: fallback por subcadena si está
///    habilitado (tier reportado = 0)
/// 4. Nada coincide: None — resultado normal, nunca error
///
/// # Retorno
/// - Some((regla, tier)): tier 1..=8, o 0 para el fallback
pub fn resolver<'a>(
    candidatas: &[&'a Regla],
    consulta: &ConsultaAlcance,
    config: &MatcherConfig,
) -> Option<(&'a Regla, u8)> {
    for (indice, tier) in tiers().into_iter().enumerate() {
        let numero_tier = (indice + 1) as u8;
        if let Some(regla) = candidatas
            .iter()
            .copied()
            .find(|r| regla_coincide_tier(r, tier, consulta))
        {
            debug!(
                regla_id = %regla.id,
                tier = numero_tier,
                cliente = %consulta.cliente,
                "regla resuelta por cascada"
            );
            return Some((regla, numero_tier));
        }
    }

    if config.habilitar_fallback_subcadena {
        if let Some(regla) = candidatas
            .iter()
            .copied()
            .find(|r| regla_coincide_subcadena(r, consulta))
        {
            warn!(
                regla_id = %regla.id,
                cliente_consulta = %consulta.cliente,
                cliente_regla = %regla.alcance.cliente,
                "coincidencia por fallback de subcadena (heurística legada)"
            );
            return Some((regla, 0));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::regla::{Alcance, RangoToneladas, Regla};
    use crate::domain::types::ScopeValue;

    fn exacto(v: &str) -> ScopeValue {
        ScopeValue::Exacto(v.to_string())
    }

    fn regla_con_alcance(cliente: ScopeValue, op: ScopeValue, prod: ScopeValue) -> Regla {
        Regla::estandar(
            "PRUEBA",
            Alcance::new(cliente, op, prod),
            RangoToneladas::new(0.0, 100.0),
            30.0,
        )
    }

    #[test]
    fn test_orden_de_tiers() {
        use ModoDimension::*;
        let t = tiers();
        assert_eq!(t.len(), 8);
        assert_eq!(t[0], (Exacto, Exacto, Exacto));
        assert_eq!(t[1], (Exacto, Exacto, Comodin));
        assert_eq!(t[2], (Exacto, Comodin, Exacto));
        assert_eq!(t[3], (Exacto, Comodin, Comodin));
        assert_eq!(t[4], (Comodin, Exacto, Exacto));
        assert_eq!(t[5], (Comodin, Exacto, Comodin));
        assert_eq!(t[6], (Comodin, Comodin, Exacto));
        assert_eq!(t[7], (Comodin, Comodin, Comodin));
    }

    #[test]
    fn test_especifica_gana_sobre_comodin() {
        let especifica = regla_con_alcance(
            exacto("ACME"),
            exacto("despacho"),
            ScopeValue::Cualquiera,
        );
        let generica = regla_con_alcance(
            ScopeValue::Cualquiera,
            ScopeValue::Cualquiera,
            ScopeValue::Cualquiera,
        );
        // La genérica primero en la lista: el tier decide, no el orden
        let candidatas = vec![&generica, &especifica];
        let consulta = ConsultaAlcance::new("ACME", "despacho", "fijo");

        let (regla, tier) = resolver(&candidatas, &consulta, &MatcherConfig::default()).unwrap();
        assert_eq!(regla.id, especifica.id);
        assert_eq!(tier, 2); // E/E/C
    }

    #[test]
    fn test_desempate_primera_en_orden() {
        let a = regla_con_alcance(exacto("ACME"), exacto("despacho"), exacto("fijo"));
        let b = regla_con_alcance(exacto("ACME"), exacto("despacho"), exacto("fijo"));
        let candidatas = vec![&a, &b];
        let consulta = ConsultaAlcance::new("ACME", "despacho", "fijo");

        let (regla, tier) = resolver(&candidatas, &consulta, &MatcherConfig::default()).unwrap();
        assert_eq!(regla.id, a.id);
        assert_eq!(tier, 1);
    }

    #[test]
    fn test_fallback_subcadena() {
        let regla = regla_con_alcance(exacto("ACME"), ScopeValue::Cualquiera, ScopeValue::Cualquiera);
        let candidatas = vec![&regla];
        // "ACME CARTAGENA" contiene "ACME" pero no coincide en ningún tier
        let consulta = ConsultaAlcance::new("ACME CARTAGENA", "despacho", "fijo");

        let (r, tier) = resolver(&candidatas, &consulta, &MatcherConfig::default()).unwrap();
        assert_eq!(r.id, regla.id);
        assert_eq!(tier, 0);
    }

    #[test]
    fn test_fallback_deshabilitado() {
        let regla = regla_con_alcance(exacto("ACME"), ScopeValue::Cualquiera, ScopeValue::Cualquiera);
        let candidatas = vec![&regla];
        let consulta = ConsultaAlcance::new("ACME CARTAGENA", "despacho", "fijo");
        let config = MatcherConfig {
            habilitar_fallback_subcadena: false,
        };

        assert!(resolver(&candidatas, &consulta, &config).is_none());
    }

    #[test]
    fn test_sin_coincidencia_devuelve_none() {
        let regla = regla_con_alcance(exacto("OTRO"), exacto("cargue"), exacto("granel"));
        let candidatas = vec![&regla];
        let consulta = ConsultaAlcance::new("ACME", "despacho", "fijo");

        assert!(resolver(&candidatas, &consulta, &MatcherConfig::default()).is_none());
    }

    #[test]
    fn test_tier_4_gana_sobre_tier_5() {
        // E/C/C (tier 4) por encima de C/E/E (tier 5): el cliente pesa
        // más que operación y producto juntos
        let cliente_exacto = regla_con_alcance(
            exacto("ACME"),
            ScopeValue::Cualquiera,
            ScopeValue::Cualquiera,
        );
        let dims_exactas = regla_con_alcance(
            ScopeValue::Cualquiera,
            exacto("despacho"),
            exacto("fijo"),
        );
        let candidatas = vec![&dims_exactas, &cliente_exacto];
        let consulta = ConsultaAlcance::new("ACME", "despacho", "fijo");

        let (regla, tier) = resolver(&candidatas, &consulta, &MatcherConfig::default()).unwrap();
        assert_eq!(regla.id, cliente_exacto.id);
        assert_eq!(tier, 4);
    }
}
