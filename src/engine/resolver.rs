// ==========================================
// Sistema de Liquidación Portuaria - Resolutor y orquestador
// ==========================================
// Responsabilidad: superficie pública del motor
// - resolver_regla: filtro por rango + cascada de especificidad
// - resolver_tarifa: valor según payload (plana / día-noche / vehículo)
// - LiquidacionEngine: orquesta repositorio → resolución → duración →
//   indicador → agregación
// El conjunto de reglas se relee del repositorio en CADA resolución;
// el motor nunca escribe sobre el almacén de reglas
// ==========================================

use std::sync::Arc;

use chrono::NaiveTime;
use tracing::{debug, info, warn};

use crate::config::ConfigLiquidacion;
use crate::domain::liquidacion::{
    LineaLiquidacion, ResolucionConcepto, ResolucionResultado, ResumenLiquidacion,
};
use crate::domain::operacion::Operacion;
use crate::domain::regla::{Regla, Tarifa};
use crate::domain::types::{ColeccionRegla, Turno};
use crate::engine::duration;
use crate::engine::liquidation;
use crate::engine::matcher::{self, ConsultaAlcance, MatcherConfig};
use crate::engine::productivity::{self, ContextoProductividad};
use crate::engine::range_filter;
use crate::engine::shift::{self, VentanaDia};
use crate::repository::error::RepositoryResult;
use crate::repository::regla_repo::ReglaRepository;

// ==========================================
// Resolución pura
// ==========================================

/// Resuelve la regla aplicable a una consulta sobre un conjunto dado
///
/// # Pasos
/// 1. Filtro por rango de toneladas (inclusivo, redondeo a 2 decimales)
/// 2. Cascada de especificidad de 8 tiers + fallback por subcadena
///
/// La ausencia de coincidencia es un resultado normal, nunca un error
pub fn resolver_regla(
    reglas: &[Regla],
    consulta: &ConsultaAlcance,
    toneladas: f64,
    config: &MatcherConfig,
) -> ResolucionResultado {
    let candidatas = range_filter::filtrar(reglas, toneladas);
    match matcher::resolver(&candidatas, consulta, config) {
        Some((regla, tier)) => ResolucionResultado {
            regla: Some(regla.clone()),
            valor_tarifa: None,
            tier_usado: Some(tier),
        },
        None => ResolucionResultado::sin_coincidencia(),
    }
}

/// Contexto temporal/vehicular de la resolución de tarifa
#[derive(Debug, Clone, Default)]
pub struct ContextoTarifa {
    pub inicio: Option<NaiveTime>,
    pub fin: Option<NaiveTime>,
    pub tipo_vehiculo: Option<String>,
}

/// Resuelve el valor de tarifa de una regla ya coincidente
///
/// # Reglas
/// 1. Plana: el valor, sin importar el turno
/// 2. DiaNoche: turno por hora de FIN de la operación (variante simple);
///    sin hora de fin se asume turno día
/// 3. PorVehiculo: turno por ventana completa; tipo de vehículo ausente
///    o sin sub-tarifa → 0.0 (la agregación ya excluye valores cero del
///    total monetario)
///
/// Función total: nunca lanza error
pub fn resolver_tarifa(regla: &Regla, contexto: &ContextoTarifa, ventana: &VentanaDia) -> f64 {
    match &regla.tarifa {
        Tarifa::Plana { valor } => *valor,
        Tarifa::DiaNoche {
            valor_dia,
            valor_noche,
        } => {
            let turno = match contexto.fin {
                Some(fin) => shift::clasificar_por_fin(fin, ventana),
                None => {
                    debug!(regla_id = %regla.id, "sin hora de fin, se asume turno día");
                    Turno::Dia
                }
            };
            match turno {
                Turno::Dia => *valor_dia,
                Turno::Noche => *valor_noche,
            }
        }
        Tarifa::PorVehiculo { tarifas } => {
            let Some(tipo) = contexto.tipo_vehiculo.as_deref() else {
                warn!(regla_id = %regla.id, "tarifa por vehículo sin tipo de vehículo, valor 0");
                return 0.0;
            };
            let Some(tv) = tarifas
                .iter()
                .find(|t| t.tipo_vehiculo.eq_ignore_ascii_case(tipo))
            else {
                warn!(
                    regla_id = %regla.id,
                    tipo_vehiculo = tipo,
                    "sin sub-tarifa para el tipo de vehículo, valor 0"
                );
                return 0.0;
            };
            let turno = match (contexto.inicio, contexto.fin) {
                (Some(i), Some(f)) => shift::clasificar_intervalo(i, f, ventana),
                (_, Some(f)) => shift::clasificar_por_fin(f, ventana),
                _ => Turno::Dia,
            };
            match turno {
                Turno::Dia => tv.valor_dia,
                Turno::Noche => tv.valor_noche,
            }
        }
    }
}

// ==========================================
// LiquidacionEngine - orquestador
// ==========================================

/// Motor de liquidación sobre un repositorio de reglas inyectado
///
/// Cada resolución relee el conjunto completo de reglas (sin caché
/// entre llamadas); resoluciones concurrentes contra un conjunto en
/// edición pueden observar instantáneas distintas, lo cual es aceptado
pub struct LiquidacionEngine {
    repo: Arc<dyn ReglaRepository>,
    config: ConfigLiquidacion,
}

impl LiquidacionEngine {
    pub fn new(repo: Arc<dyn ReglaRepository>, config: ConfigLiquidacion) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &ConfigLiquidacion {
        &self.config
    }

    /// Consulta de alcance derivada de una operación
    fn consulta_de(op: &Operacion) -> ConsultaAlcance {
        ConsultaAlcance::new(
            op.cliente.clone(),
            op.tipo_operacion.clone(),
            op.tipo_producto.clone(),
        )
    }

    /// Resuelve el estándar operativo aplicable a una operación
    pub fn resolver_estandar(&self, op: &Operacion) -> RepositoryResult<ResolucionResultado> {
        let estandares = self.repo.listar(ColeccionRegla::Estandar)?;
        Ok(resolver_regla(
            &estandares,
            &Self::consulta_de(op),
            op.toneladas,
            &self.config.matcher,
        ))
    }

    /// Resuelve el concepto de facturación y su valor de tarifa
    pub fn resolver_concepto(&self, op: &Operacion) -> RepositoryResult<ResolucionResultado> {
        let conceptos = self.repo.listar(ColeccionRegla::Concepto)?;
        let mut resultado = resolver_regla(
            &conceptos,
            &Self::consulta_de(op),
            op.toneladas,
            &self.config.matcher,
        );

        if let Some(regla) = &resultado.regla {
            let contexto = ContextoTarifa {
                inicio: op.inicio.map(|t| t.time()),
                fin: op.fin.map(|t| t.time()),
                tipo_vehiculo: op.tipo_vehiculo.clone(),
            };
            resultado.valor_tarifa =
                Some(resolver_tarifa(regla, &contexto, &self.config.ventana_dia));
        }
        Ok(resultado)
    }

    /// Liquida una operación: estándar, tarifa, duración e indicador
    pub fn liquidar_operacion(&self, op: &Operacion) -> RepositoryResult<LineaLiquidacion> {
        let estandar = self.resolver_estandar(op)?;
        let concepto = self.resolver_concepto(op)?;

        let duracion = duration::ajustar(op.minutos_totales(), &op.novedades);

        let contexto = ContextoProductividad {
            peso_digitado: op.peso_digitado(),
            aplica_cuadrilla: op.aplica_cuadrilla,
            tipo_concepto: op.tipo_concepto,
        };
        let (indicador, razones) = productivity::clasificar(
            duracion,
            estandar.regla.as_ref(),
            &contexto,
            self.config.tolerancia_normal_min,
        );
        debug!(operacion_id = %op.id, indicador = %indicador, razones = ?razones, "operación clasificada");

        let cantidad = if op.peso_digitado() { op.toneladas } else { 0.0 };
        let valor_unitario = concepto.valor_tarifa.unwrap_or(0.0);

        Ok(LineaLiquidacion {
            operacion_id: op.id.clone(),
            concepto: concepto.regla.as_ref().map(|r| r.concepto.clone()),
            cantidad,
            valor_unitario,
            valor_total: cantidad * valor_unitario,
            indicador,
            duracion_operativa: duracion,
            tier_usado: concepto.tier_usado,
        })
    }

    /// Liquida un lote de operaciones y agrega los totales
    pub fn liquidar(
        &self,
        operaciones: &[Operacion],
    ) -> RepositoryResult<(Vec<LineaLiquidacion>, ResumenLiquidacion)> {
        info!(operaciones = operaciones.len(), "liquidando lote de operaciones");

        let mut lineas = Vec::with_capacity(operaciones.len());
        for op in operaciones {
            lineas.push(self.liquidar_operacion(op)?);
        }

        let resoluciones: Vec<ResolucionConcepto> = lineas
            .iter()
            .filter_map(|l| {
                l.concepto.as_ref().map(|c| ResolucionConcepto {
                    concepto: c.clone(),
                    cantidad: l.cantidad,
                    valor_unitario: l.valor_unitario,
                })
            })
            .collect();

        let resumen = liquidation::agregar(&resoluciones);
        info!(
            conceptos = resumen.por_concepto.len(),
            total_general = resumen.total_general,
            "liquidación completada"
        );
        Ok((lineas, resumen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::regla::{Alcance, RangoToneladas, TarifaVehiculo};
    use crate::domain::types::ScopeValue;

    fn hora(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn ventana() -> VentanaDia {
        VentanaDia::new(hora(7, 0), hora(19, 0))
    }

    #[test]
    fn test_resolver_tarifa_plana() {
        let regla = Regla::concepto(
            "PESAJE",
            Alcance::comodin(),
            RangoToneladas::new(0.0, 100.0),
            Tarifa::Plana { valor: 500.0 },
        );
        let valor = resolver_tarifa(&regla, &ContextoTarifa::default(), &ventana());
        assert_eq!(valor, 500.0);
    }

    #[test]
    fn test_resolver_tarifa_dia_noche_por_fin() {
        let regla = Regla::concepto(
            "DESCARGUE",
            Alcance::comodin(),
            RangoToneladas::new(0.0, 100.0),
            Tarifa::DiaNoche {
                valor_dia: 1000.0,
                valor_noche: 1400.0,
            },
        );
        let ctx_dia = ContextoTarifa {
            fin: Some(hora(18, 59)),
            ..Default::default()
        };
        assert_eq!(resolver_tarifa(&regla, &ctx_dia, &ventana()), 1000.0);

        // Fin exactamente en la frontera → noche
        let ctx_noche = ContextoTarifa {
            fin: Some(hora(19, 0)),
            ..Default::default()
        };
        assert_eq!(resolver_tarifa(&regla, &ctx_noche, &ventana()), 1400.0);
    }

    #[test]
    fn test_resolver_tarifa_por_vehiculo_ventana_completa() {
        let regla = Regla::concepto(
            "CARGUE VEHICULO",
            Alcance::comodin(),
            RangoToneladas::new(0.0, 100.0),
            Tarifa::PorVehiculo {
                tarifas: vec![TarifaVehiculo {
                    tipo_vehiculo: "TRACTOMULA".to_string(),
                    valor_dia: 300.0,
                    valor_noche: 450.0,
                }],
            },
        );
        // Intervalo entero dentro del día
        let ctx = ContextoTarifa {
            inicio: Some(hora(8, 0)),
            fin: Some(hora(12, 0)),
            tipo_vehiculo: Some("tractomula".to_string()),
        };
        assert_eq!(resolver_tarifa(&regla, &ctx, &ventana()), 300.0);

        // Toca la noche → nocturna
        let ctx = ContextoTarifa {
            inicio: Some(hora(17, 0)),
            fin: Some(hora(20, 0)),
            tipo_vehiculo: Some("TRACTOMULA".to_string()),
        };
        assert_eq!(resolver_tarifa(&regla, &ctx, &ventana()), 450.0);

        // Sin tipo de vehículo → 0
        let ctx = ContextoTarifa {
            inicio: Some(hora(8, 0)),
            fin: Some(hora(12, 0)),
            tipo_vehiculo: None,
        };
        assert_eq!(resolver_tarifa(&regla, &ctx, &ventana()), 0.0);
    }

    #[test]
    fn test_resolver_regla_ejemplo_acme() {
        // Ejemplo de referencia: ACME/despacho/fijo/50t → tier 2, base 30
        let reglas = vec![
            Regla::estandar(
                "DESCARGUE",
                Alcance::new(
                    ScopeValue::Exacto("ACME".into()),
                    ScopeValue::Exacto("despacho".into()),
                    ScopeValue::Cualquiera,
                ),
                RangoToneladas::new(0.0, 100.0),
                30.0,
            ),
            Regla::estandar(
                "DESCARGUE",
                Alcance::comodin(),
                RangoToneladas::new(0.0, 100.0),
                999.0,
            ),
        ];
        let consulta = ConsultaAlcance::new("ACME", "despacho", "fijo");
        let resultado = resolver_regla(&reglas, &consulta, 50.0, &MatcherConfig::default());

        let regla = resultado.regla.unwrap();
        assert_eq!(regla.minutos_base, Some(30.0));
        assert_eq!(resultado.tier_usado, Some(2));
    }

    #[test]
    fn test_resolver_regla_idempotente() {
        let reglas = vec![Regla::estandar(
            "DESCARGUE",
            Alcance::comodin(),
            RangoToneladas::new(0.0, 100.0),
            30.0,
        )];
        let consulta = ConsultaAlcance::new("ACME", "despacho", "fijo");
        let cfg = MatcherConfig::default();

        let r1 = resolver_regla(&reglas, &consulta, 50.0, &cfg);
        let r2 = resolver_regla(&reglas, &consulta, 50.0, &cfg);
        assert_eq!(r1, r2);
    }
}
