// ==========================================
// Sistema de Liquidación Portuaria - Agregador de liquidación
// ==========================================
// Responsabilidad: plegar resoluciones (concepto, cantidad, valor
// unitario) en totales por concepto y total general
// Pliegue puro e independiente del orden de entrada
// Línea roja: sin estado, sin efectos, sin I/O
// ==========================================

use crate::domain::liquidacion::{ResolucionConcepto, ResumenLiquidacion, TotalConcepto};

/// Agrega resoluciones en totales por concepto y total general
///
/// # Reglas
/// 1. Por concepto: suma de cantidad y de cantidad × valor_unitario
/// 2. valor_unitario == 0 (tarifa sin resolver): la cantidad cuenta,
///    el aporte monetario es nulo
/// 3. El total general se deriva de los subtotales por concepto en
///    orden de llave (BTreeMap), no del orden del arreglo de entrada
pub fn agregar(resoluciones: &[ResolucionConcepto]) -> ResumenLiquidacion {
    let mut resumen = ResumenLiquidacion::default();

    for r in resoluciones {
        let entrada = resumen
            .por_concepto
            .entry(r.concepto.clone())
            .or_insert_with(TotalConcepto::default);
        entrada.cantidad += r.cantidad;
        entrada.total += r.cantidad * r.valor_unitario;
    }

    resumen.total_general = resumen.por_concepto.values().map(|t| t.total).sum();
    resumen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(concepto: &str, cantidad: f64, valor: f64) -> ResolucionConcepto {
        ResolucionConcepto {
            concepto: concepto.to_string(),
            cantidad,
            valor_unitario: valor,
        }
    }

    #[test]
    fn test_totales_por_concepto() {
        let resumen = agregar(&[
            res("DESCARGUE", 10.0, 1200.0),
            res("DESCARGUE", 5.0, 1200.0),
            res("USO MUELLE", 15.0, 800.0),
        ]);

        let descargue = &resumen.por_concepto["DESCARGUE"];
        assert_eq!(descargue.cantidad, 15.0);
        assert_eq!(descargue.total, 18_000.0);

        let muelle = &resumen.por_concepto["USO MUELLE"];
        assert_eq!(muelle.cantidad, 15.0);
        assert_eq!(muelle.total, 12_000.0);

        assert_eq!(resumen.total_general, 30_000.0);
    }

    #[test]
    fn test_valor_cero_cuenta_cantidad_sin_dinero() {
        let resumen = agregar(&[res("PESAJE", 20.0, 0.0), res("PESAJE", 5.0, 0.0)]);
        let pesaje = &resumen.por_concepto["PESAJE"];
        assert_eq!(pesaje.cantidad, 25.0);
        assert_eq!(pesaje.total, 0.0);
        assert_eq!(resumen.total_general, 0.0);
    }

    #[test]
    fn test_independiente_del_orden() {
        let a = vec![
            res("A", 1.0, 10.0),
            res("B", 2.0, 20.0),
            res("C", 3.0, 30.0),
        ];
        let mut b = a.clone();
        b.reverse();

        assert_eq!(agregar(&a), agregar(&b));
    }

    #[test]
    fn test_vacio() {
        let resumen = agregar(&[]);
        assert!(resumen.por_concepto.is_empty());
        assert_eq!(resumen.total_general, 0.0);
    }
}
