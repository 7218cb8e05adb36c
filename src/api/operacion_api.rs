// ==========================================
// Sistema de Liquidación Portuaria - API de operaciones
// ==========================================
// Responsabilidad: registro de operaciones y novedades, y recálculo
// de la duración operativa derivada. Eliminar una novedad SIEMPRE
// dispara el recálculo de duracion_operativa de su operación
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::liquidacion::{LineaLiquidacion, ResumenLiquidacion};
use crate::domain::operacion::{Novedad, Operacion};
use crate::engine::duration;
use crate::engine::resolver::LiquidacionEngine;
use crate::repository::operacion_repo::OperacionRepository;
use std::sync::Arc;
use tracing::info;

/// API de operaciones y liquidación
pub struct OperacionApi {
    repo: Arc<OperacionRepository>,
    engine: Arc<LiquidacionEngine>,
}

impl OperacionApi {
    pub fn new(repo: Arc<OperacionRepository>, engine: Arc<LiquidacionEngine>) -> Self {
        Self { repo, engine }
    }

    /// Registra una operación, derivando su duración operativa
    pub fn registrar(&self, mut operacion: Operacion) -> ApiResult<String> {
        operacion.duracion_operativa =
            duration::ajustar(operacion.minutos_totales(), &operacion.novedades);
        self.repo.insertar(&operacion)?;
        info!(operacion_id = %operacion.id, "operación registrada");
        Ok(operacion.id)
    }

    /// Agrega una novedad y recalcula la duración operativa
    pub fn agregar_novedad(&self, operacion_id: &str, novedad: Novedad) -> ApiResult<()> {
        self.repo.agregar_novedad(operacion_id, &novedad)?;
        self.recalcular_duracion(operacion_id)
    }

    /// Elimina una novedad y recalcula la duración operativa de su
    /// operación (obligatorio: la duración derivada quedaría obsoleta)
    pub fn eliminar_novedad(&self, operacion_id: &str, novedad_id: &str) -> ApiResult<()> {
        self.repo.eliminar_novedad(novedad_id)?;
        info!(operacion_id, novedad_id, "novedad eliminada, recalculando duración");
        self.recalcular_duracion(operacion_id)
    }

    /// Recalcula y persiste duracion_operativa de una operación
    pub fn recalcular_duracion(&self, operacion_id: &str) -> ApiResult<()> {
        let operacion = self
            .repo
            .buscar_por_id(operacion_id)?
            .ok_or_else(|| ApiError::NotFound(format!("operacion con id={}", operacion_id)))?;

        let duracion = duration::ajustar(operacion.minutos_totales(), &operacion.novedades);
        self.repo.actualizar_duracion(operacion_id, duracion)?;
        Ok(())
    }

    /// Busca una operación con sus novedades
    pub fn buscar(&self, operacion_id: &str) -> ApiResult<Operacion> {
        self.repo
            .buscar_por_id(operacion_id)?
            .ok_or_else(|| ApiError::NotFound(format!("operacion con id={}", operacion_id)))
    }

    /// Liquida todas las operaciones almacenadas
    pub fn liquidar_todas(&self) -> ApiResult<(Vec<LineaLiquidacion>, ResumenLiquidacion)> {
        let operaciones = self.repo.listar()?;
        Ok(self.engine.liquidar(&operaciones)?)
    }
}
