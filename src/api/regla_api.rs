// ==========================================
// Sistema de Liquidación Portuaria - API de reglas
// ==========================================
// Responsabilidad: escritura validada sobre el almacén de reglas
// (el motor solo lee; esta capa es el único camino de escritura)
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator;
use crate::domain::regla::Regla;
use crate::repository::regla_repo::SqliteReglaRepository;
use std::sync::Arc;
use tracing::info;

/// API de administración de reglas
pub struct ReglaApi {
    repo: Arc<SqliteReglaRepository>,
}

impl ReglaApi {
    pub fn new(repo: Arc<SqliteReglaRepository>) -> Self {
        Self { repo }
    }

    /// Crea una regla tras validarla contra sí misma y contra el
    /// conjunto existente (rangos solapados por alcance exacto)
    pub fn crear(&self, regla: Regla) -> ApiResult<String> {
        validator::validar_regla(&regla)?;
        let existentes = self.repo.listar_todas()?;
        validator::validar_solapamiento(&regla, &existentes)?;

        self.repo.insertar(&regla)?;
        info!(regla_id = %regla.id, coleccion = %regla.coleccion, "regla creada");
        Ok(regla.id)
    }

    /// Lista todas las reglas
    pub fn listar(&self) -> ApiResult<Vec<Regla>> {
        Ok(self.repo.listar_todas()?)
    }

    /// Elimina una regla por id
    pub fn eliminar(&self, id: &str) -> ApiResult<()> {
        self.repo.eliminar(id)?;
        info!(regla_id = %id, "regla eliminada");
        Ok(())
    }
}
