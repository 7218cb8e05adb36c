// ==========================================
// Pruebas de validación de reglas en el guardado
// ==========================================

use liquidacion_portuaria::api::validator::{validar_regla, validar_solapamiento};
use liquidacion_portuaria::api::ApiError;
use liquidacion_portuaria::domain::regla::{Alcance, RangoToneladas, Regla, Tarifa};
use liquidacion_portuaria::domain::types::ScopeValue;

fn alcance_acme() -> Alcance {
    Alcance::new(
        ScopeValue::Exacto("ACME".into()),
        ScopeValue::Exacto("despacho".into()),
        ScopeValue::Cualquiera,
    )
}

#[test]
fn test_rango_invertido_rechazado() {
    let r = Regla::estandar("DESCARGUE", alcance_acme(), RangoToneladas::new(50.0, 10.0), 30.0);
    assert!(matches!(validar_regla(&r), Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_tarifa_negativa_rechazada() {
    let r = Regla::concepto(
        "DESCARGUE",
        alcance_acme(),
        RangoToneladas::new(0.0, 100.0),
        Tarifa::DiaNoche {
            valor_dia: 1000.0,
            valor_noche: -1.0,
        },
    );
    assert!(validar_regla(&r).is_err());
}

#[test]
fn test_concepto_vacio_rechazado() {
    let r = Regla::estandar("  ", alcance_acme(), RangoToneladas::new(0.0, 100.0), 30.0);
    assert!(validar_regla(&r).is_err());
}

#[test]
fn test_solapamiento_detectado_por_alcance_exacto() {
    let existente = Regla::estandar(
        "DESCARGUE",
        alcance_acme(),
        RangoToneladas::new(0.0, 100.0),
        30.0,
    );
    let nueva = Regla::estandar(
        "DESCARGUE",
        alcance_acme(),
        RangoToneladas::new(50.0, 150.0),
        45.0,
    );
    let resultado = validar_solapamiento(&nueva, &[existente]);
    assert!(matches!(resultado, Err(ApiError::ReglaEnConflicto(_))));
}

#[test]
fn test_colecciones_distintas_no_conflictuan() {
    // Un estándar y un concepto pueden compartir alcance y rango
    let estandar = Regla::estandar(
        "DESCARGUE",
        alcance_acme(),
        RangoToneladas::new(0.0, 100.0),
        30.0,
    );
    let concepto = Regla::concepto(
        "DESCARGUE",
        alcance_acme(),
        RangoToneladas::new(0.0, 100.0),
        Tarifa::Plana { valor: 1200.0 },
    );
    assert!(validar_solapamiento(&concepto, &[estandar]).is_ok());
}

#[test]
fn test_misma_regla_no_conflictua_consigo_misma() {
    let r = Regla::estandar(
        "DESCARGUE",
        alcance_acme(),
        RangoToneladas::new(0.0, 100.0),
        30.0,
    );
    assert!(validar_solapamiento(&r, std::slice::from_ref(&r)).is_ok());
}
