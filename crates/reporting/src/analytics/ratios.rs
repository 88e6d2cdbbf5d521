//! Razones derivadas con denominador protegido.
//!
//! Toda división del sistema pasa por acá: con denominador cero o con
//! operandos inválidos el resultado es exactamente 0, nunca NaN ni infinito.

/// Ticket promedio: ingresos / ventas
pub fn ticket_promedio(ingresos: f64, ventas: i64) -> f64 {
    if ventas > 0 && ingresos.is_finite() {
        ingresos / ventas as f64
    } else {
        0.0
    }
}

/// Margen porcentual: ganancia / ingresos × 100
pub fn margen_porcentual(ganancia: f64, ingresos: f64) -> f64 {
    if ingresos > 0.0 && ganancia.is_finite() {
        ganancia / ingresos * 100.0
    } else {
        0.0
    }
}

/// Participación: valor / suma × 100
pub fn participacion(valor: f64, suma: f64) -> f64 {
    if suma > 0.0 && valor.is_finite() {
        valor / suma * 100.0
    } else {
        0.0
    }
}
