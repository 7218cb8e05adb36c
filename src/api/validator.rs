// ==========================================
// Sistema de Liquidación Portuaria - Validación de reglas
// ==========================================
// Responsabilidad: rechazar en el guardado los datos que el motor
// toleraría en silencio (rangos malformados, rangos solapados para el
// mismo alcance exacto). El motor nunca falla por estos datos; este
// módulo evita que entren
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::regla::{Regla, Tarifa};
use crate::domain::types::ColeccionRegla;

/// Valida una regla aislada
///
/// # Reglas
/// 1. Rango malformado (max <= min) → rechazo
/// 2. min negativo → rechazo
/// 3. Estándar sin minutos base (o base <= 0) → rechazo
/// 4. Tarifas con valores negativos → rechazo
/// 5. Concepto vacío → rechazo
pub fn validar_regla(regla: &Regla) -> ApiResult<()> {
    if regla.concepto.trim().is_empty() {
        return Err(ApiError::InvalidInput("el concepto es obligatorio".into()));
    }

    if regla.rango.es_malformado() {
        return Err(ApiError::InvalidInput(format!(
            "rango malformado: max ({}) <= min ({})",
            regla.rango.max, regla.rango.min
        )));
    }
    if regla.rango.min < 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "rango inválido: min ({}) negativo",
            regla.rango.min
        )));
    }

    if regla.coleccion == ColeccionRegla::Estandar {
        match regla.minutos_base {
            Some(base) if base > 0.0 => {}
            _ => {
                return Err(ApiError::InvalidInput(
                    "un estándar requiere minutos base positivos".into(),
                ))
            }
        }
    }

    let valores: Vec<f64> = match &regla.tarifa {
        Tarifa::Plana { valor } => vec![*valor],
        Tarifa::DiaNoche {
            valor_dia,
            valor_noche,
        } => vec![*valor_dia, *valor_noche],
        Tarifa::PorVehiculo { tarifas } => tarifas
            .iter()
            .flat_map(|t| [t.valor_dia, t.valor_noche])
            .collect(),
    };
    if valores.iter().any(|v| *v < 0.0) {
        return Err(ApiError::InvalidInput(
            "las tarifas no admiten valores negativos".into(),
        ));
    }

    Ok(())
}

/// Rechaza rangos solapados para el mismo alcance exacto
///
/// Dentro de una colección, dos reglas con la misma tripleta
/// (cliente, operación, producto) no pueden tener rangos que se
/// intersecten: de lo contrario el desempate por orden de entrada
/// decide en silencio cuál aplica
pub fn validar_solapamiento(nueva: &Regla, existentes: &[Regla]) -> ApiResult<()> {
    for existente in existentes {
        if existente.id == nueva.id
            || existente.coleccion != nueva.coleccion
            || existente.alcance != nueva.alcance
        {
            continue;
        }
        let se_solapan =
            nueva.rango.min <= existente.rango.max && existente.rango.min <= nueva.rango.max;
        if se_solapan {
            return Err(ApiError::ReglaEnConflicto(format!(
                "el rango [{}, {}] se solapa con la regla {} ([{}, {}]) para el mismo alcance",
                nueva.rango.min,
                nueva.rango.max,
                existente.id,
                existente.rango.min,
                existente.rango.max
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::regla::{Alcance, RangoToneladas};
    use crate::domain::types::ScopeValue;

    fn estandar(min: f64, max: f64) -> Regla {
        Regla::estandar(
            "DESCARGUE",
            Alcance::new(
                ScopeValue::Exacto("ACME".into()),
                ScopeValue::Cualquiera,
                ScopeValue::Cualquiera,
            ),
            RangoToneladas::new(min, max),
            30.0,
        )
    }

    #[test]
    fn test_rango_malformado_rechazado() {
        assert!(validar_regla(&estandar(100.0, 50.0)).is_err());
        assert!(validar_regla(&estandar(50.0, 50.0)).is_err());
        assert!(validar_regla(&estandar(0.0, 100.0)).is_ok());
    }

    #[test]
    fn test_min_negativo_rechazado() {
        assert!(validar_regla(&estandar(-5.0, 100.0)).is_err());
    }

    #[test]
    fn test_estandar_sin_base_rechazado() {
        let mut r = estandar(0.0, 100.0);
        r.minutos_base = None;
        assert!(validar_regla(&r).is_err());
        r.minutos_base = Some(0.0);
        assert!(validar_regla(&r).is_err());
    }

    #[test]
    fn test_solapamiento_mismo_alcance_rechazado() {
        let existente = estandar(0.0, 100.0);
        let nueva = estandar(100.0, 200.0); // comparte la frontera 100
        assert!(validar_solapamiento(&nueva, &[existente]).is_err());
    }

    #[test]
    fn test_rangos_disjuntos_aceptados() {
        let existente = estandar(0.0, 100.0);
        let nueva = estandar(100.01, 200.0);
        assert!(validar_solapamiento(&nueva, &[existente]).is_ok());
    }

    #[test]
    fn test_alcance_distinto_no_conflictua() {
        let existente = estandar(0.0, 100.0);
        let mut nueva = estandar(50.0, 150.0);
        nueva.alcance.cliente = ScopeValue::Exacto("OTRO".into());
        assert!(validar_solapamiento(&nueva, &[existente]).is_ok());
    }
}
