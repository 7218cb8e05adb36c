// ==========================================
// Sistema de Liquidación Portuaria - Clasificador de turno
// ==========================================
// Responsabilidad: clasificar una operación como diurna o nocturna
// frente a una ventana de turno día que puede cruzar medianoche
// Intervalo semiabierto: [inicio_dia, fin_dia) — exactamente fin_dia
// es noche, exactamente inicio_dia es día
// Línea roja: sin estado, sin efectos, sin I/O
// ==========================================

use crate::domain::types::Turno;
use chrono::{NaiveTime, Timelike};

/// Ventana configurada del turno día
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VentanaDia {
    pub inicio: NaiveTime,
    pub fin: NaiveTime,
}

impl VentanaDia {
    pub fn new(inicio: NaiveTime, fin: NaiveTime) -> Self {
        Self { inicio, fin }
    }

    /// Minutos desde medianoche
    fn minutos(t: NaiveTime) -> i64 {
        (t.hour() as i64) * 60 + t.minute() as i64
    }

    /// Posición de `t` relativa al inicio de la ventana, módulo 24h
    fn relativo(&self, t: NaiveTime) -> i64 {
        (Self::minutos(t) - Self::minutos(self.inicio)).rem_euclid(24 * 60)
    }

    /// Longitud de la ventana en minutos, módulo 24h
    ///
    /// Si fin < inicio la ventana cruza medianoche; si fin == inicio la
    /// ventana es vacía (todo es noche)
    fn longitud(&self) -> i64 {
        (Self::minutos(self.fin) - Self::minutos(self.inicio)).rem_euclid(24 * 60)
    }

    /// ¿El instante cae dentro de la ventana? (semiabierto)
    pub fn contiene(&self, t: NaiveTime) -> bool {
        self.relativo(t) < self.longitud()
    }
}

/// Clasifica un instante puntual
///
/// # Reglas
/// - t == inicio_dia → Dia; t == fin_dia → Noche (semiabierto)
/// - fin_dia < inicio_dia: la ventana cruza medianoche y la
///   contención se calcula módulo 24h
pub fn clasificar_instante(t: NaiveTime, ventana: &VentanaDia) -> Turno {
    if ventana.contiene(t) {
        Turno::Dia
    } else {
        Turno::Noche
    }
}

/// Variante simple: clasifica por la hora de FIN de la operación
///
/// Usada por los conceptos con tarifa día/noche: el turno lo decide
/// el momento en que la operación termina
pub fn clasificar_por_fin(fin: NaiveTime, ventana: &VentanaDia) -> Turno {
    clasificar_instante(fin, ventana)
}

/// Variante de ventana completa: Dia solo si TODO el intervalo
/// [inicio, fin] cae dentro de la ventana diurna
///
/// Usada por las tarifas por rango (vehículos): basta que la operación
/// toque la noche para tarificar como nocturna
pub fn clasificar_intervalo(inicio: NaiveTime, fin: NaiveTime, ventana: &VentanaDia) -> Turno {
    let rel_inicio = ventana.relativo(inicio);
    let rel_fin = ventana.relativo(fin);
    let dentro = rel_inicio < ventana.longitud()
        && rel_fin < ventana.longitud()
        && rel_inicio <= rel_fin;

    if dentro {
        Turno::Dia
    } else {
        Turno::Noche
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hora(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn ventana_estandar() -> VentanaDia {
        VentanaDia::new(hora(7, 0), hora(19, 0))
    }

    #[test]
    fn test_fin_exacto_en_frontera_es_noche() {
        let v = ventana_estandar();
        assert_eq!(clasificar_por_fin(hora(19, 0), &v), Turno::Noche);
        assert_eq!(clasificar_por_fin(hora(18, 59), &v), Turno::Dia);
    }

    #[test]
    fn test_inicio_exacto_es_dia() {
        let v = ventana_estandar();
        assert_eq!(clasificar_instante(hora(7, 0), &v), Turno::Dia);
        assert_eq!(clasificar_instante(hora(6, 59), &v), Turno::Noche);
    }

    #[test]
    fn test_ventana_cruza_medianoche() {
        // Turno "día" configurado de 22:00 a 06:00
        let v = VentanaDia::new(hora(22, 0), hora(6, 0));
        assert_eq!(clasificar_instante(hora(2, 0), &v), Turno::Dia);
        assert_eq!(clasificar_instante(hora(23, 30), &v), Turno::Dia);
        assert_eq!(clasificar_instante(hora(6, 0), &v), Turno::Noche);
        assert_eq!(clasificar_instante(hora(12, 0), &v), Turno::Noche);
        assert_eq!(clasificar_instante(hora(22, 0), &v), Turno::Dia);
    }

    #[test]
    fn test_intervalo_completo_dentro() {
        let v = ventana_estandar();
        assert_eq!(
            clasificar_intervalo(hora(8, 0), hora(17, 0), &v),
            Turno::Dia
        );
    }

    #[test]
    fn test_intervalo_que_toca_la_noche() {
        let v = ventana_estandar();
        // Termina después del fin del turno día
        assert_eq!(
            clasificar_intervalo(hora(16, 0), hora(20, 0), &v),
            Turno::Noche
        );
        // Empieza antes del turno día
        assert_eq!(
            clasificar_intervalo(hora(5, 0), hora(10, 0), &v),
            Turno::Noche
        );
        // Termina exactamente en la frontera: fuera (semiabierto)
        assert_eq!(
            clasificar_intervalo(hora(10, 0), hora(19, 0), &v),
            Turno::Noche
        );
    }

    #[test]
    fn test_intervalo_en_ventana_nocturna_invertida() {
        let v = VentanaDia::new(hora(22, 0), hora(6, 0));
        // 23:00 → 02:00 cruza medianoche pero cae entero en la ventana
        assert_eq!(
            clasificar_intervalo(hora(23, 0), hora(2, 0), &v),
            Turno::Dia
        );
        // 23:00 → 08:00 sale de la ventana
        assert_eq!(
            clasificar_intervalo(hora(23, 0), hora(8, 0), &v),
            Turno::Noche
        );
    }

    #[test]
    fn test_ventana_vacia_todo_es_noche() {
        let v = VentanaDia::new(hora(7, 0), hora(7, 0));
        assert_eq!(clasificar_instante(hora(7, 0), &v), Turno::Noche);
        assert_eq!(clasificar_instante(hora(12, 0), &v), Turno::Noche);
    }
}
