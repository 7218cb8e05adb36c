// ==========================================
// Sistema de Liquidación Portuaria - Repositorio de reglas
// ==========================================
// Línea roja: el repositorio no contiene lógica de negocio
// El motor consume el trait de solo lectura ReglaRepository; la
// escritura pasa por la capa API (validación previa)
// ==========================================

use crate::db::configurar_conexion;
use crate::domain::regla::{Alcance, RangoToneladas, Regla, Tarifa};
use crate::domain::types::{ColeccionRegla, ScopeValue};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// Trait de lectura inyectado en el motor
// ==========================================

/// Repositorio de reglas de solo lectura
///
/// El motor relee el conjunto completo en cada resolución; el orden de
/// retorno ES el orden de desempate dentro de un tier, por lo que las
/// implementaciones deben devolver un orden estable (orden de inserción)
pub trait ReglaRepository: Send + Sync {
    fn listar(&self, coleccion: ColeccionRegla) -> RepositoryResult<Vec<Regla>>;
}

// ==========================================
// Implementación SQLite
// ==========================================

/// Fila cruda de la tabla `reglas` (la conversión a dominio se hace
/// fuera del mapeo rusqlite para no mezclar errores serde)
struct FilaRegla {
    id: String,
    coleccion: String,
    concepto: String,
    cliente: String,
    tipo_operacion: String,
    tipo_producto: String,
    ton_min: f64,
    ton_max: f64,
    tarifa_json: String,
    minutos_base: Option<f64>,
}

impl FilaRegla {
    fn a_dominio(self) -> RepositoryResult<Regla> {
        let coleccion = ColeccionRegla::parse(&self.coleccion).ok_or_else(|| {
            RepositoryError::ValidationError(format!("colección desconocida: {}", self.coleccion))
        })?;
        let tarifa: Tarifa = serde_json::from_str(&self.tarifa_json)?;
        Ok(Regla {
            id: self.id,
            coleccion,
            concepto: self.concepto,
            alcance: Alcance::new(
                ScopeValue::parse(&self.cliente),
                ScopeValue::parse(&self.tipo_operacion),
                ScopeValue::parse(&self.tipo_producto),
            ),
            rango: RangoToneladas::new(self.ton_min, self.ton_max),
            tarifa,
            minutos_base: self.minutos_base,
        })
    }
}

/// Repositorio de reglas sobre SQLite
pub struct SqliteReglaRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteReglaRepository {
    /// Crea el repositorio abriendo la ruta indicada
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::abrir_conexion(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Crea el repositorio desde una conexión existente
    ///
    /// Reaplica los PRAGMA unificados (idempotente)
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

    fn mapear_fila(row: &Row<'_>) -> Result<FilaRegla, rusqlite::Error> {
        Ok(FilaRegla {
            id: row.get(0)?,
            coleccion: row.get(1)?,
            concepto: row.get(2)?,
            cliente: row.get(3)?,
            tipo_operacion: row.get(4)?,
            tipo_producto: row.get(5)?,
            ton_min: row.get(6)?,
            ton_max: row.get(7)?,
            tarifa_json: row.get(8)?,
            minutos_base: row.get(9)?,
        })
    }

    /// Inserta una regla (la validación ocurre en la capa API)
    pub fn insertar(&self, regla: &Regla) -> RepositoryResult<()> {
        let tarifa_json = serde_json::to_string(&regla.tarifa)?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO reglas (
                id, coleccion, concepto, cliente, tipo_operacion,
                tipo_producto, ton_min, ton_max, tarifa, minutos_base
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                regla.id,
                regla.coleccion.to_string(),
                regla.concepto,
                regla.alcance.cliente.as_storage(),
                regla.alcance.tipo_operacion.as_storage(),
                regla.alcance.tipo_producto.as_storage(),
                regla.rango.min,
                regla.rango.max,
                tarifa_json,
                regla.minutos_base,
            ],
        )?;
        Ok(())
    }

    /// Elimina una regla por id
    pub fn eliminar(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let afectadas = conn.execute("DELETE FROM reglas WHERE id = ?1", params![id])?;
        if afectadas == 0 {
            return Err(RepositoryError::NotFound {
                entidad: "regla".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Busca una regla por id
    pub fn buscar_por_id(&self, id: &str) -> RepositoryResult<Option<Regla>> {
        let todas = self.listar_todas()?;
        Ok(todas.into_iter().find(|r| r.id == id))
    }

    /// Lista todas las reglas sin filtrar por colección
    pub fn listar_todas(&self) -> RepositoryResult<Vec<Regla>> {
        self.listar_internas(None)
    }

    fn listar_internas(&self, coleccion: Option<ColeccionRegla>) -> RepositoryResult<Vec<Regla>> {
        let conn = self.get_conn()?;
        // ORDER BY rowid: el orden de inserción es el desempate documentado
        let sql_base = r#"
            SELECT id, coleccion, concepto, cliente, tipo_operacion,
                   tipo_producto, ton_min, ton_max, tarifa, minutos_base
            FROM reglas
        "#;

        let filas: Vec<FilaRegla> = match coleccion {
            Some(c) => {
                let mut stmt =
                    conn.prepare(&format!("{} WHERE coleccion = ?1 ORDER BY rowid", sql_base))?;
                let iter = stmt.query_map(params![c.to_string()], Self::mapear_fila)?;
                iter.collect::<Result<_, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(&format!("{} ORDER BY rowid", sql_base))?;
                let iter = stmt.query_map([], Self::mapear_fila)?;
                iter.collect::<Result<_, _>>()?
            }
        };

        filas.into_iter().map(FilaRegla::a_dominio).collect()
    }
}

impl ReglaRepository for SqliteReglaRepository {
    fn listar(&self, coleccion: ColeccionRegla) -> RepositoryResult<Vec<Regla>> {
        self.listar_internas(Some(coleccion))
    }
}

// ==========================================
// Implementación en memoria (tests / host sin SQLite)
// ==========================================

/// Repositorio de reglas en memoria
///
/// Conserva el orden de inserción (desempate dentro de un tier)
#[derive(Default)]
pub struct MemReglaRepository {
    reglas: Mutex<Vec<Regla>>,
}

impl MemReglaRepository {
    pub fn new(reglas: Vec<Regla>) -> Self {
        Self {
            reglas: Mutex::new(reglas),
        }
    }

    pub fn insertar(&self, regla: Regla) -> RepositoryResult<()> {
        self.reglas
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?
            .push(regla);
        Ok(())
    }
}

impl ReglaRepository for MemReglaRepository {
    fn listar(&self, coleccion: ColeccionRegla) -> RepositoryResult<Vec<Regla>> {
        let reglas = self
            .reglas
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(reglas
            .iter()
            .filter(|r| r.coleccion == coleccion)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::regla::Alcance;

    #[test]
    fn test_mem_repo_conserva_orden() {
        let repo = MemReglaRepository::default();
        let a = Regla::estandar("A", Alcance::comodin(), RangoToneladas::new(0.0, 10.0), 1.0);
        let b = Regla::estandar("B", Alcance::comodin(), RangoToneladas::new(0.0, 10.0), 2.0);
        let id_a = a.id.clone();
        repo.insertar(a).unwrap();
        repo.insertar(b).unwrap();

        let lista = repo.listar(ColeccionRegla::Estandar).unwrap();
        assert_eq!(lista.len(), 2);
        assert_eq!(lista[0].id, id_a);
    }

    #[test]
    fn test_mem_repo_filtra_coleccion() {
        let repo = MemReglaRepository::default();
        repo.insertar(Regla::estandar(
            "A",
            Alcance::comodin(),
            RangoToneladas::new(0.0, 10.0),
            1.0,
        ))
        .unwrap();
        repo.insertar(Regla::concepto(
            "B",
            Alcance::comodin(),
            RangoToneladas::new(0.0, 10.0),
            Tarifa::Plana { valor: 5.0 },
        ))
        .unwrap();

        assert_eq!(repo.listar(ColeccionRegla::Estandar).unwrap().len(), 1);
        assert_eq!(repo.listar(ColeccionRegla::Concepto).unwrap().len(), 1);
    }
}
