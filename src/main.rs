// ==========================================
// Sistema de Liquidación Portuaria - Punto de entrada CLI
// ==========================================
// Abre (o crea) la base de datos local, liquida las operaciones
// almacenadas y reporta los totales por concepto
// ==========================================

use std::sync::Arc;

use liquidacion_portuaria::api::OperacionApi;
use liquidacion_portuaria::config::ConfigManager;
use liquidacion_portuaria::engine::LiquidacionEngine;
use liquidacion_portuaria::repository::{OperacionRepository, SqliteReglaRepository};
use liquidacion_portuaria::{db, logging};

/// Ruta por defecto de la base de datos
fn ruta_db_por_defecto() -> String {
    let base = dirs::data_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    base.join("liquidacion-portuaria")
        .join("liquidacion.db")
        .to_string_lossy()
        .to_string()
}

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", liquidacion_portuaria::APP_NAME);
    tracing::info!("Versión: {}", liquidacion_portuaria::VERSION);
    tracing::info!("==================================================");

    let db_path = std::env::args().nth(1).unwrap_or_else(ruta_db_por_defecto);
    tracing::info!("Base de datos: {}", db_path);

    if let Some(padre) = std::path::Path::new(&db_path).parent() {
        std::fs::create_dir_all(padre)?;
    }

    {
        let conn = db::abrir_conexion(&db_path)?;
        db::inicializar_esquema(&conn)?;
    }

    let regla_repo = Arc::new(SqliteReglaRepository::new(&db_path)?);
    let operacion_repo = Arc::new(OperacionRepository::new(&db_path)?);
    let config = ConfigManager::new(&db_path)?.snapshot()?;

    let engine = Arc::new(LiquidacionEngine::new(regla_repo, config));
    let api = OperacionApi::new(operacion_repo, engine);

    let (lineas, resumen) = api.liquidar_todas()?;
    tracing::info!("Operaciones liquidadas: {}", lineas.len());
    for (concepto, total) in &resumen.por_concepto {
        tracing::info!(
            "  {:<30} cantidad={:>10.2} total={:>14.2}",
            concepto,
            total.cantidad,
            total.total
        );
    }
    tracing::info!("Total general: {:.2}", resumen.total_general);

    Ok(())
}
