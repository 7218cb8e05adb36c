// ==========================================
// Sistema de Liquidación Portuaria - Inicialización SQLite
// ==========================================
// Objetivo:
// - Unificar el comportamiento de PRAGMA en todos los Connection::open
// - Unificar busy_timeout para reducir errores busy bajo escritura
//   concurrente
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// busy_timeout por defecto (milisegundos)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Configura los PRAGMA unificados de una conexión SQLite
///
/// foreign_keys y busy_timeout deben configurarse por conexión
pub fn configurar_conexion(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Abre una conexión SQLite con la configuración unificada
pub fn abrir_conexion(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configurar_conexion(&conn)?;
    Ok(conn)
}

/// Crea el esquema si no existe
///
/// Tablas:
/// - reglas: estándares y conceptos (alcance con centinelas TODOS/TODAS,
///   tarifa serializada como JSON)
/// - operaciones / novedades: registros operativos y sus tiempos muertos
/// - config_kv: configuración global llave-valor
pub fn inicializar_esquema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS reglas (
            id              TEXT PRIMARY KEY,
            coleccion       TEXT NOT NULL,
            concepto        TEXT NOT NULL,
            cliente         TEXT NOT NULL,
            tipo_operacion  TEXT NOT NULL,
            tipo_producto   TEXT NOT NULL,
            ton_min         REAL NOT NULL,
            ton_max         REAL NOT NULL,
            tarifa          TEXT NOT NULL,
            minutos_base    REAL
        );

        CREATE TABLE IF NOT EXISTS operaciones (
            id                  TEXT PRIMARY KEY,
            cliente             TEXT NOT NULL,
            tipo_operacion      TEXT NOT NULL,
            tipo_producto       TEXT NOT NULL,
            toneladas           REAL NOT NULL,
            tipo_concepto       TEXT NOT NULL,
            aplica_cuadrilla    INTEGER NOT NULL DEFAULT 0,
            tipo_vehiculo       TEXT,
            inicio              TEXT,
            fin                 TEXT,
            duracion_operativa  INTEGER
        );

        CREATE TABLE IF NOT EXISTS novedades (
            id                    TEXT PRIMARY KEY,
            operacion_id          TEXT NOT NULL
                                  REFERENCES operaciones(id) ON DELETE CASCADE,
            tipo                  TEXT NOT NULL,
            minutos               INTEGER NOT NULL DEFAULT 0,
            afecta_productividad  INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_reglas_coleccion ON reglas(coleccion);
        CREATE INDEX IF NOT EXISTS idx_novedades_operacion ON novedades(operacion_id);

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id  TEXT NOT NULL,
            key       TEXT NOT NULL,
            value     TEXT NOT NULL,
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )
}
