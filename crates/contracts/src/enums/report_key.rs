use serde::{Deserialize, Serialize};

/// Identificador de los reportes de finanzas disponibles.
///
/// Cada clave nombra a la vez la función de fetch que la resuelve y el
/// slot del estado donde se guarda su último resultado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKey {
    ResumenFinanciero,
    GananciasDetalladas,
    GananciasPorProducto,
    GananciasPorEmpleado,
    GananciasPorCiudad,
    ProductosMasRentables,
    ProductosMasVendidos,
    BalanceGeneral,
    BalancePorCuenta,
    FlujoDeFondos,
    VentasPorVendedor,
    DistribucionIngresos,
    GastosPorCategoria,
    AniosDisponibles,
}

impl ReportKey {
    /// Código camelCase usado en el estado y en la UI
    pub fn code(&self) -> &'static str {
        match self {
            ReportKey::ResumenFinanciero => "resumenFinanciero",
            ReportKey::GananciasDetalladas => "gananciasDetalladas",
            ReportKey::GananciasPorProducto => "gananciasPorProducto",
            ReportKey::GananciasPorEmpleado => "gananciasPorEmpleado",
            ReportKey::GananciasPorCiudad => "gananciasPorCiudad",
            ReportKey::ProductosMasRentables => "productosMasRentables",
            ReportKey::ProductosMasVendidos => "productosMasVendidos",
            ReportKey::BalanceGeneral => "balanceGeneral",
            ReportKey::BalancePorCuenta => "balancePorCuenta",
            ReportKey::FlujoDeFondos => "flujoDeFondos",
            ReportKey::VentasPorVendedor => "ventasPorVendedor",
            ReportKey::DistribucionIngresos => "distribucionIngresos",
            ReportKey::GastosPorCategoria => "gastosPorCategoria",
            ReportKey::AniosDisponibles => "aniosDisponibles",
        }
    }

    /// Path fijo del endpoint que sirve este reporte
    pub fn endpoint(&self) -> &'static str {
        match self {
            ReportKey::ResumenFinanciero => "/finanzas/resumen-financiero",
            ReportKey::GananciasDetalladas => "/finanzas/ganancias-detalladas",
            ReportKey::GananciasPorProducto => "/finanzas/ganancias-por-producto",
            ReportKey::GananciasPorEmpleado => "/finanzas/ganancias-por-empleado",
            ReportKey::GananciasPorCiudad => "/finanzas/ganancias-por-ciudad",
            ReportKey::ProductosMasRentables => "/finanzas/productos-mas-rentables",
            ReportKey::ProductosMasVendidos => "/finanzas/ventas-productos",
            ReportKey::BalanceGeneral => "/finanzas/balance-general",
            ReportKey::BalancePorCuenta => "/finanzas/balance-cuenta",
            ReportKey::FlujoDeFondos => "/finanzas/flujo-fondos",
            ReportKey::VentasPorVendedor => "/finanzas/ventas-vendedores",
            ReportKey::DistribucionIngresos => "/finanzas/distribucion-ingresos",
            ReportKey::GastosPorCategoria => "/finanzas/gastos-categoria",
            ReportKey::AniosDisponibles => "/finanzas/anios-disponibles",
        }
    }

    /// Nombre legible para mensajes de error y títulos
    pub fn display_name(&self) -> &'static str {
        match self {
            ReportKey::ResumenFinanciero => "Resumen financiero",
            ReportKey::GananciasDetalladas => "Ganancias detalladas",
            ReportKey::GananciasPorProducto => "Ganancias por producto",
            ReportKey::GananciasPorEmpleado => "Ganancias por empleado",
            ReportKey::GananciasPorCiudad => "Ganancias por ciudad",
            ReportKey::ProductosMasRentables => "Productos más rentables",
            ReportKey::ProductosMasVendidos => "Productos más vendidos",
            ReportKey::BalanceGeneral => "Balance general",
            ReportKey::BalancePorCuenta => "Balance por cuenta",
            ReportKey::FlujoDeFondos => "Flujo de fondos",
            ReportKey::VentasPorVendedor => "Ventas por vendedor",
            ReportKey::DistribucionIngresos => "Distribución de ingresos",
            ReportKey::GastosPorCategoria => "Gastos por categoría",
            ReportKey::AniosDisponibles => "Años disponibles",
        }
    }

    /// Todas las claves, en el orden del estado inicial
    pub fn all() -> Vec<ReportKey> {
        vec![
            ReportKey::ResumenFinanciero,
            ReportKey::GananciasDetalladas,
            ReportKey::GananciasPorProducto,
            ReportKey::GananciasPorEmpleado,
            ReportKey::GananciasPorCiudad,
            ReportKey::ProductosMasRentables,
            ReportKey::ProductosMasVendidos,
            ReportKey::BalanceGeneral,
            ReportKey::BalancePorCuenta,
            ReportKey::FlujoDeFondos,
            ReportKey::VentasPorVendedor,
            ReportKey::DistribucionIngresos,
            ReportKey::GastosPorCategoria,
            ReportKey::AniosDisponibles,
        ]
    }

    /// Parseo desde el código camelCase
    pub fn from_code(code: &str) -> Option<Self> {
        ReportKey::all().into_iter().find(|key| key.code() == code)
    }
}

impl std::fmt::Display for ReportKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
