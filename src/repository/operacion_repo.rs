// ==========================================
// Sistema de Liquidación Portuaria - Repositorio de operaciones
// ==========================================
// Línea roja: el repositorio no contiene lógica de negocio.
// El recálculo de duracion_operativa tras eliminar una novedad lo
// coordina la capa API (OperacionApi), no este módulo
// ==========================================

use crate::db::configurar_conexion;
use crate::domain::operacion::{Novedad, Operacion};
use crate::domain::types::TipoConcepto;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

/// Formato de fecha-hora persistido
const FORMATO_FECHA_HORA: &str = "%Y-%m-%dT%H:%M:%S";

/// Repositorio de operaciones y novedades sobre SQLite
pub struct OperacionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OperacionRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::abrir_conexion(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Crea el repositorio desde una conexión existente (PRAGMA idempotente)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configurar_conexion(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn formatear_fecha(f: Option<NaiveDateTime>) -> Option<String> {
        f.map(|v| v.format(FORMATO_FECHA_HORA).to_string())
    }

    fn parsear_fecha(raw: Option<String>) -> Option<NaiveDateTime> {
        raw.and_then(|v| NaiveDateTime::parse_from_str(&v, FORMATO_FECHA_HORA).ok())
    }

    fn mapear_operacion(row: &Row<'_>) -> Result<Operacion, rusqlite::Error> {
        let tipo_concepto_raw: String = row.get(5)?;
        Ok(Operacion {
            id: row.get(0)?,
            cliente: row.get(1)?,
            tipo_operacion: row.get(2)?,
            tipo_producto: row.get(3)?,
            toneladas: row.get(4)?,
            tipo_concepto: TipoConcepto::parse(&tipo_concepto_raw),
            aplica_cuadrilla: row.get::<_, i64>(6)? != 0,
            tipo_vehiculo: row.get(7)?,
            inicio: Self::parsear_fecha(row.get(8)?),
            fin: Self::parsear_fecha(row.get(9)?),
            novedades: Vec::new(), // se adjuntan en una segunda consulta
            duracion_operativa: row.get(10)?,
        })
    }

    fn mapear_novedad(row: &Row<'_>) -> Result<Novedad, rusqlite::Error> {
        Ok(Novedad {
            id: row.get(0)?,
            tipo: row.get(1)?,
            minutos: row.get(2)?,
            afecta_productividad: row.get::<_, i64>(3)? != 0,
        })
    }

    /// Inserta una operación con sus novedades
    pub fn insertar(&self, op: &Operacion) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO operaciones (
                id, cliente, tipo_operacion, tipo_producto, toneladas,
                tipo_concepto, aplica_cuadrilla, tipo_vehiculo,
                inicio, fin, duracion_operativa
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                op.id,
                op.cliente,
                op.tipo_operacion,
                op.tipo_producto,
                op.toneladas,
                op.tipo_concepto.to_string(),
                op.aplica_cuadrilla as i64,
                op.tipo_vehiculo,
                Self::formatear_fecha(op.inicio),
                Self::formatear_fecha(op.fin),
                op.duracion_operativa,
            ],
        )?;
        for novedad in &op.novedades {
            conn.execute(
                r#"
                INSERT INTO novedades (id, operacion_id, tipo, minutos, afecta_productividad)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    novedad.id,
                    op.id,
                    novedad.tipo,
                    novedad.minutos,
                    novedad.afecta_productividad as i64,
                ],
            )?;
        }
        Ok(())
    }

    /// Busca una operación por id (con novedades adjuntas)
    pub fn buscar_por_id(&self, id: &str) -> RepositoryResult<Option<Operacion>> {
        let op = {
            let conn = self.get_conn()?;
            let mut stmt = conn.prepare(
                r#"
                SELECT id, cliente, tipo_operacion, tipo_producto, toneladas,
                       tipo_concepto, aplica_cuadrilla, tipo_vehiculo,
                       inicio, fin, duracion_operativa
                FROM operaciones WHERE id = ?1
                "#,
            )?;
            stmt.query_row(params![id], Self::mapear_operacion)
                .optional()?
        };

        match op {
            Some(mut op) => {
                op.novedades = self.listar_novedades(&op.id)?;
                Ok(Some(op))
            }
            None => Ok(None),
        }
    }

    /// Lista todas las operaciones (con novedades adjuntas)
    pub fn listar(&self) -> RepositoryResult<Vec<Operacion>> {
        let mut operaciones = {
            let conn = self.get_conn()?;
            let mut stmt = conn.prepare(
                r#"
                SELECT id, cliente, tipo_operacion, tipo_producto, toneladas,
                       tipo_concepto, aplica_cuadrilla, tipo_vehiculo,
                       inicio, fin, duracion_operativa
                FROM operaciones ORDER BY rowid
                "#,
            )?;
            let iter = stmt.query_map([], Self::mapear_operacion)?;
            iter.collect::<Result<Vec<_>, _>>()?
        };

        for op in &mut operaciones {
            op.novedades = self.listar_novedades(&op.id)?;
        }
        Ok(operaciones)
    }

    /// Lista las novedades de una operación
    pub fn listar_novedades(&self, operacion_id: &str) -> RepositoryResult<Vec<Novedad>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, tipo, minutos, afecta_productividad
            FROM novedades WHERE operacion_id = ?1 ORDER BY rowid
            "#,
        )?;
        let iter = stmt.query_map(params![operacion_id], Self::mapear_novedad)?;
        Ok(iter.collect::<Result<Vec<_>, _>>()?)
    }

    /// Agrega una novedad a una operación existente
    pub fn agregar_novedad(&self, operacion_id: &str, novedad: &Novedad) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO novedades (id, operacion_id, tipo, minutos, afecta_productividad)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                novedad.id,
                operacion_id,
                novedad.tipo,
                novedad.minutos,
                novedad.afecta_productividad as i64,
            ],
        )?;
        Ok(())
    }

    /// Elimina una novedad por id
    pub fn eliminar_novedad(&self, novedad_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let afectadas = conn.execute("DELETE FROM novedades WHERE id = ?1", params![novedad_id])?;
        if afectadas == 0 {
            return Err(RepositoryError::NotFound {
                entidad: "novedad".to_string(),
                id: novedad_id.to_string(),
            });
        }
        Ok(())
    }

    /// Actualiza la duración operativa derivada de una operación
    pub fn actualizar_duracion(
        &self,
        operacion_id: &str,
        duracion: Option<i64>,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let afectadas = conn.execute(
            "UPDATE operaciones SET duracion_operativa = ?1 WHERE id = ?2",
            params![duracion, operacion_id],
        )?;
        if afectadas == 0 {
            return Err(RepositoryError::NotFound {
                entidad: "operacion".to_string(),
                id: operacion_id.to_string(),
            });
        }
        Ok(())
    }
}
