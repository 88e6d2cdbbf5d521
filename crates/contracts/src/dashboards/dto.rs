use serde::{Deserialize, Serialize};

use crate::reports::dto::{
    BalanceCuenta, GananciaCiudad, GananciaEmpleado, GananciaPeriodo, GananciaProducto,
    ProductoVendido, ResumenFinanciero, VentaVendedor,
};
use crate::reports::result::ReportResult;

/// Composición fija de reportes que alimenta la vista principal del tablero.
///
/// Cada slice es independiente: un fetch fallido deja su slot en `None` y el
/// resto se renderiza normalmente. Un bundle parcial es un estado terminal
/// válido, no una falla del conjunto.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardBundle {
    pub resumen: Option<ReportResult<ResumenFinanciero>>,
    pub ganancias: Option<ReportResult<Vec<GananciaPeriodo>>>,
    pub top_productos: Option<ReportResult<Vec<GananciaProducto>>>,
    pub empleados: Option<ReportResult<Vec<GananciaEmpleado>>>,
    pub ciudades: Option<ReportResult<Vec<GananciaCiudad>>>,
    pub vendedores: Option<ReportResult<Vec<VentaVendedor>>>,
    pub balance: Option<ReportResult<Vec<BalanceCuenta>>>,
    pub top_vendidos: Option<ReportResult<Vec<ProductoVendido>>>,
}

impl DashboardBundle {
    /// Cantidad de slots con datos
    pub fn slots_cargados(&self) -> usize {
        [
            self.resumen.is_some(),
            self.ganancias.is_some(),
            self.top_productos.is_some(),
            self.empleados.is_some(),
            self.ciudades.is_some(),
            self.vendedores.is_some(),
            self.balance.is_some(),
            self.top_vendidos.is_some(),
        ]
        .iter()
        .filter(|cargado| **cargado)
        .count()
    }
}

/// Resultado de una carga de tablero: el bundle (posiblemente parcial) más
/// los motivos de falla de los slots que no llegaron.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOutcome {
    pub success: bool,
    pub bundle: DashboardBundle,
    pub errores: Vec<String>,
}
