// ==========================================
// Sistema de Liquidación Portuaria - Gestor de configuración
// ==========================================
// Responsabilidad: carga, consulta y sobreescritura de configuración
// Almacenamiento: tabla config_kv (llave-valor, scope global)
// ==========================================

use crate::config::ConfigLiquidacion;
use crate::db::configurar_conexion;
use crate::engine::matcher::MatcherConfig;
use crate::engine::shift::VentanaDia;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveTime;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

// Llaves de configuración
pub const LLAVE_TURNO_DIA_INICIO: &str = "turno_dia_inicio";
pub const LLAVE_TURNO_DIA_FIN: &str = "turno_dia_fin";
pub const LLAVE_TOLERANCIA_NORMAL: &str = "tolerancia_normal_min";
pub const LLAVE_FALLBACK_SUBCADENA: &str = "fallback_subcadena";

/// Formato de hora persistido ("HH:MM")
const FORMATO_HORA: &str = "%H:%M";

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::abrir_conexion(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Crea el gestor desde una conexión existente (PRAGMA idempotente)
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

    /// Lee un valor del scope global
    pub fn obtener(&self, llave: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let resultado = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![llave],
            |row| row.get::<_, String>(0),
        );
        match resultado {
            Ok(valor) => Ok(Some(valor)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Escribe (upsert) un valor en el scope global
    pub fn establecer(&self, llave: &str, valor: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
            ON CONFLICT(scope_id, key) DO UPDATE SET value = excluded.value
            "#,
            params![llave, valor],
        )?;
        Ok(())
    }

    fn obtener_hora(&self, llave: &str, por_defecto: NaiveTime) -> RepositoryResult<NaiveTime> {
        Ok(match self.obtener(llave)? {
            Some(crudo) => match NaiveTime::parse_from_str(&crudo, FORMATO_HORA) {
                Ok(hora) => hora,
                Err(_) => {
                    warn!(llave, valor = %crudo, "hora de configuración inválida, se usa el valor por defecto");
                    por_defecto
                }
            },
            None => por_defecto,
        })
    }

    /// Construye la instantánea de configuración del motor
    ///
    /// Valores ausentes o inválidos caen al Default de ConfigLiquidacion
    pub fn snapshot(&self) -> RepositoryResult<ConfigLiquidacion> {
        let defecto = ConfigLiquidacion::default();

        let inicio = self.obtener_hora(LLAVE_TURNO_DIA_INICIO, defecto.ventana_dia.inicio)?;
        let fin = self.obtener_hora(LLAVE_TURNO_DIA_FIN, defecto.ventana_dia.fin)?;

        let tolerancia = match self.obtener(LLAVE_TOLERANCIA_NORMAL)? {
            Some(crudo) => crudo.parse::<f64>().unwrap_or_else(|_| {
                warn!(valor = %crudo, "tolerancia inválida, se usa el valor por defecto");
                defecto.tolerancia_normal_min
            }),
            None => defecto.tolerancia_normal_min,
        };

        let fallback = match self.obtener(LLAVE_FALLBACK_SUBCADENA)? {
            Some(crudo) => crudo == "1" || crudo.eq_ignore_ascii_case("true"),
            None => defecto.matcher.habilitar_fallback_subcadena,
        };

        Ok(ConfigLiquidacion {
            ventana_dia: VentanaDia::new(inicio, fin),
            tolerancia_normal_min: tolerancia,
            matcher: MatcherConfig {
                habilitar_fallback_subcadena: fallback,
            },
        })
    }
}
