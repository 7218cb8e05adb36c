// ==========================================
// Pruebas de duración operativa e indicador de productividad
// ==========================================

use liquidacion_portuaria::domain::operacion::Novedad;
use liquidacion_portuaria::domain::regla::{Alcance, RangoToneladas, Regla};
use liquidacion_portuaria::domain::types::{Indicador, TipoConcepto};
use liquidacion_portuaria::engine::duration::ajustar;
use liquidacion_portuaria::engine::productivity::{
    clasificar, ContextoProductividad, TOLERANCIA_NORMAL_MIN,
};

fn estandar(base: f64) -> Regla {
    Regla::estandar(
        "DESCARGUE",
        Alcance::comodin(),
        RangoToneladas::new(0.0, 100.0),
        base,
    )
}

fn contexto() -> ContextoProductividad {
    ContextoProductividad {
        peso_digitado: true,
        aplica_cuadrilla: true,
        tipo_concepto: TipoConcepto::Descargue,
    }
}

#[test]
fn test_ajuste_solo_descuenta_novedades_que_afectan() {
    // total=120, novedades: 20 min (afecta) y 15 min (no afecta) → 100
    let novedades = vec![
        Novedad::new("LLUVIA", 20, true),
        Novedad::new("CAMBIO DE TURNO", 15, false),
    ];
    assert_eq!(ajustar(Some(120), &novedades), Some(100));
}

#[test]
fn test_desconocido_nunca_se_vuelve_cero() {
    let novedades = vec![Novedad::new("LLUVIA", 20, true)];
    assert_eq!(ajustar(None, &novedades), None);

    // None fluye hasta el clasificador como SIN_CALCULAR
    let e = estandar(30.0);
    let (ind, _) = clasificar(None, Some(&e), &contexto(), TOLERANCIA_NORMAL_MIN);
    assert_eq!(ind, Indicador::SinCalcular);
}

#[test]
fn test_duracion_negativa_no_revienta() {
    // Tiempo muerto mayor que la duración: se conserva el negativo y
    // el clasificador lo trata como no calculable
    let novedades = vec![Novedad::new("DANO EQUIPO", 200, true)];
    let duracion = ajustar(Some(120), &novedades);
    assert_eq!(duracion, Some(-80));

    let e = estandar(30.0);
    let (ind, _) = clasificar(duracion, Some(&e), &contexto(), TOLERANCIA_NORMAL_MIN);
    assert_eq!(ind, Indicador::SinCalcular);
}

#[test]
fn test_sin_estandar() {
    let (ind, _) = clasificar(Some(45), None, &contexto(), TOLERANCIA_NORMAL_MIN);
    assert_eq!(ind, Indicador::SinEstandar);
}

#[test]
fn test_bandas_del_indicador() {
    let e = estandar(30.0);
    let casos = [
        (29, Indicador::Optimo),
        (30, Indicador::Normal), // exactamente la base: NORMAL, no OPTIMO
        (35, Indicador::Normal),
        (40, Indicador::Normal), // base + tolerancia inclusive
        (41, Indicador::Lento),
    ];
    for (duracion, esperado) in casos {
        let (ind, razones) =
            clasificar(Some(duracion), Some(&e), &contexto(), TOLERANCIA_NORMAL_MIN);
        assert_eq!(ind, esperado, "duracion={} razones={:?}", duracion, razones);
    }
}

#[test]
fn test_prioridad_de_estados() {
    // NO_APLICA por encima de todo, incluso con datos completos
    let ctx = ContextoProductividad {
        tipo_concepto: TipoConcepto::Otro,
        ..contexto()
    };
    let e = estandar(30.0);
    let (ind, _) = clasificar(Some(20), Some(&e), &ctx, TOLERANCIA_NORMAL_MIN);
    assert_eq!(ind, Indicador::NoAplica);

    // PENDIENTE_PESO por encima de SIN_CALCULAR y SIN_ESTANDAR
    let ctx = ContextoProductividad {
        peso_digitado: false,
        ..contexto()
    };
    let (ind, _) = clasificar(None, None, &ctx, TOLERANCIA_NORMAL_MIN);
    assert_eq!(ind, Indicador::PendientePeso);
}
