use serde::{Deserialize, Serialize};

use crate::shared::numeric::{flexible_f64, flexible_i64};

// Los nombres de campo son el contrato de wire con la API de finanzas:
// no renombrar sin migrar el servidor.

/// Resumen financiero del período (tarjetas principales del tablero).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumenFinanciero {
    #[serde(default)]
    pub ventas: ResumenVentas,
    #[serde(default)]
    pub ganancias: ResumenGanancias,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumenVentas {
    #[serde(default, deserialize_with = "flexible_i64")]
    pub total_ventas: i64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ingresos_totales: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ticket_promedio: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumenGanancias {
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ganancia_estimada: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub margen_promedio: f64,
}

/// Fila de la serie temporal de ganancias detalladas
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GananciaPeriodo {
    /// Etiqueta del bucket temporal según el filtro `periodo`
    #[serde(default)]
    pub periodo: String,
    #[serde(default, deserialize_with = "flexible_i64")]
    pub total_ventas: i64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ingresos_totales: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ganancia_estimada: f64,
}

/// Agregados que acompañan a las ganancias detalladas
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GananciasTotales {
    #[serde(default, deserialize_with = "flexible_i64")]
    pub total_ventas: i64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ingresos_totales: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ganancia_estimada: f64,
}

/// Fila de ganancias por producto
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GananciaProducto {
    #[serde(default, deserialize_with = "flexible_i64")]
    pub producto_id: i64,
    #[serde(default)]
    pub producto_nombre: String,
    #[serde(default, deserialize_with = "flexible_i64")]
    pub cantidad_total_vendida: i64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub precio_promedio: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ingresos_producto: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ganancia_estimada: f64,
    /// Margen ya calculado por el servidor, en puntos porcentuales
    #[serde(default, deserialize_with = "flexible_f64")]
    pub margen_porcentaje: f64,
}

/// Fila del ranking de productos más rentables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductoRentable {
    #[serde(default, deserialize_with = "flexible_i64")]
    pub producto_id: i64,
    #[serde(default)]
    pub producto_nombre: String,
    #[serde(default, deserialize_with = "flexible_i64")]
    pub cantidad_vendida: i64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ganancia_total: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub margen_porcentaje: f64,
}

/// Fila del ranking de productos más vendidos (por unidades)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductoVendido {
    #[serde(default, deserialize_with = "flexible_i64")]
    pub producto_id: i64,
    #[serde(default)]
    pub producto_nombre: String,
    #[serde(default, deserialize_with = "flexible_i64")]
    pub total_vendida: i64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ingresos_totales: f64,
}

/// Fila de ganancias por empleado
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GananciaEmpleado {
    #[serde(default, deserialize_with = "flexible_i64")]
    pub empleado_id: i64,
    #[serde(default)]
    pub empleado_nombre: String,
    #[serde(default, deserialize_with = "flexible_i64")]
    pub cantidad_ventas: i64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ingresos_generados: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ganancia_generada: f64,
}

/// Fila de ganancias por ciudad. `provincia` puede faltar: la agregación
/// geográfica la manda al bucket "Sin Provincia".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GananciaCiudad {
    #[serde(default)]
    pub ciudad: String,
    #[serde(default)]
    pub provincia: Option<String>,
    #[serde(default, deserialize_with = "flexible_i64")]
    pub total_ventas: i64,
    #[serde(default, deserialize_with = "flexible_i64")]
    pub clientes_unicos: i64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ingresos_totales: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ganancia_estimada: f64,
}

/// Fila de ventas por vendedor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VentaVendedor {
    #[serde(default, deserialize_with = "flexible_i64")]
    pub empleado_id: i64,
    #[serde(default)]
    pub empleado_nombre: String,
    #[serde(default, deserialize_with = "flexible_i64")]
    pub cantidad_ventas: i64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub total_vendido: f64,
}

/// Fila del balance general
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceCuenta {
    #[serde(default)]
    pub cuenta: String,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub debe: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub haber: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub saldo: f64,
}

/// Fila del balance por cuenta
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaldoCuenta {
    #[serde(default)]
    pub cuenta: String,
    #[serde(default, deserialize_with = "flexible_i64")]
    pub movimientos: i64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub saldo: f64,
}

/// Fila del flujo de fondos
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlujoFondos {
    #[serde(default)]
    pub periodo: String,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub ingresos: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub egresos: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub flujo_neto: f64,
}

/// Fila de la distribución de ingresos por categoría
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistribucionIngreso {
    #[serde(default)]
    pub categoria: String,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub monto: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub porcentaje: f64,
}

/// Fila de gastos por categoría
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GastoCategoria {
    #[serde(default)]
    pub categoria: String,
    #[serde(default, deserialize_with = "flexible_i64")]
    pub cantidad: i64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub monto: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ciudad_con_montos_string() {
        // el servidor serializa los agregados de SQL como strings
        let fila: GananciaCiudad = serde_json::from_value(json!({
            "ciudad": "Rosario",
            "provincia": "Santa Fe",
            "total_ventas": "41",
            "clientes_unicos": "18",
            "ingresos_totales": "125300.50",
            "ganancia_estimada": "37600.20"
        }))
        .unwrap();

        assert_eq!(fila.total_ventas, 41);
        assert_eq!(fila.clientes_unicos, 18);
        assert_eq!(fila.ingresos_totales, 125300.50);
        assert_eq!(fila.ganancia_estimada, 37600.20);
    }

    #[test]
    fn test_resumen_anidado_con_faltantes() {
        let resumen: ResumenFinanciero = serde_json::from_value(json!({
            "ventas": { "total_ventas": 10, "ingresos_totales": 5000 }
        }))
        .unwrap();

        assert_eq!(resumen.ventas.total_ventas, 10);
        assert_eq!(resumen.ventas.ticket_promedio, 0.0);
        assert_eq!(resumen.ganancias.ganancia_estimada, 0.0);
    }

    #[test]
    fn test_producto_con_margen_invalido() {
        let fila: GananciaProducto = serde_json::from_value(json!({
            "producto_id": 7,
            "producto_nombre": "Yerba 1kg",
            "margen_porcentaje": "N/A"
        }))
        .unwrap();

        assert_eq!(fila.margen_porcentaje, 0.0);
    }
}
