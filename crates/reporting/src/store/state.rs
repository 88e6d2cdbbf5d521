use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use contracts::dashboards::DashboardBundle;
use contracts::enums::ReportKey;
use contracts::reports::dto::{
    BalanceCuenta, DistribucionIngreso, FlujoFondos, GananciaCiudad, GananciaEmpleado,
    GananciaPeriodo, GananciaProducto, GastoCategoria, ProductoRentable, ProductoVendido,
    ResumenFinanciero, SaldoCuenta, VentaVendedor,
};
use contracts::reports::result::ReportResult;

/// Resultado tipado guardado en el slot de su clave.
#[derive(Debug, Clone)]
pub enum ReportData {
    ResumenFinanciero(ReportResult<ResumenFinanciero>),
    GananciasDetalladas(ReportResult<Vec<GananciaPeriodo>>),
    GananciasPorProducto(ReportResult<Vec<GananciaProducto>>),
    GananciasPorEmpleado(ReportResult<Vec<GananciaEmpleado>>),
    GananciasPorCiudad(ReportResult<Vec<GananciaCiudad>>),
    ProductosMasRentables(ReportResult<Vec<ProductoRentable>>),
    ProductosMasVendidos(ReportResult<Vec<ProductoVendido>>),
    BalanceGeneral(ReportResult<Vec<BalanceCuenta>>),
    BalancePorCuenta(ReportResult<Vec<SaldoCuenta>>),
    FlujoDeFondos(ReportResult<Vec<FlujoFondos>>),
    VentasPorVendedor(ReportResult<Vec<VentaVendedor>>),
    DistribucionIngresos(ReportResult<Vec<DistribucionIngreso>>),
    GastosPorCategoria(ReportResult<Vec<GastoCategoria>>),
    AniosDisponibles(ReportResult<Vec<i64>>),
}

impl ReportData {
    /// Clave del slot al que pertenece este resultado
    pub fn key(&self) -> ReportKey {
        match self {
            ReportData::ResumenFinanciero(_) => ReportKey::ResumenFinanciero,
            ReportData::GananciasDetalladas(_) => ReportKey::GananciasDetalladas,
            ReportData::GananciasPorProducto(_) => ReportKey::GananciasPorProducto,
            ReportData::GananciasPorEmpleado(_) => ReportKey::GananciasPorEmpleado,
            ReportData::GananciasPorCiudad(_) => ReportKey::GananciasPorCiudad,
            ReportData::ProductosMasRentables(_) => ReportKey::ProductosMasRentables,
            ReportData::ProductosMasVendidos(_) => ReportKey::ProductosMasVendidos,
            ReportData::BalanceGeneral(_) => ReportKey::BalanceGeneral,
            ReportData::BalancePorCuenta(_) => ReportKey::BalancePorCuenta,
            ReportData::FlujoDeFondos(_) => ReportKey::FlujoDeFondos,
            ReportData::VentasPorVendedor(_) => ReportKey::VentasPorVendedor,
            ReportData::DistribucionIngresos(_) => ReportKey::DistribucionIngresos,
            ReportData::GastosPorCategoria(_) => ReportKey::GastosPorCategoria,
            ReportData::AniosDisponibles(_) => ReportKey::AniosDisponibles,
        }
    }

    /// (success, error, totales) del resultado subyacente, sin importar el tipo
    fn meta(&self) -> (bool, Option<&str>, Option<&Value>) {
        match self {
            ReportData::ResumenFinanciero(r) => (r.success, r.error.as_deref(), r.totales.as_ref()),
            ReportData::GananciasDetalladas(r) => {
                (r.success, r.error.as_deref(), r.totales.as_ref())
            }
            ReportData::GananciasPorProducto(r) => {
                (r.success, r.error.as_deref(), r.totales.as_ref())
            }
            ReportData::GananciasPorEmpleado(r) => {
                (r.success, r.error.as_deref(), r.totales.as_ref())
            }
            ReportData::GananciasPorCiudad(r) => {
                (r.success, r.error.as_deref(), r.totales.as_ref())
            }
            ReportData::ProductosMasRentables(r) => {
                (r.success, r.error.as_deref(), r.totales.as_ref())
            }
            ReportData::ProductosMasVendidos(r) => {
                (r.success, r.error.as_deref(), r.totales.as_ref())
            }
            ReportData::BalanceGeneral(r) => (r.success, r.error.as_deref(), r.totales.as_ref()),
            ReportData::BalancePorCuenta(r) => (r.success, r.error.as_deref(), r.totales.as_ref()),
            ReportData::FlujoDeFondos(r) => (r.success, r.error.as_deref(), r.totales.as_ref()),
            ReportData::VentasPorVendedor(r) => {
                (r.success, r.error.as_deref(), r.totales.as_ref())
            }
            ReportData::DistribucionIngresos(r) => {
                (r.success, r.error.as_deref(), r.totales.as_ref())
            }
            ReportData::GastosPorCategoria(r) => {
                (r.success, r.error.as_deref(), r.totales.as_ref())
            }
            ReportData::AniosDisponibles(r) => (r.success, r.error.as_deref(), r.totales.as_ref()),
        }
    }

    pub fn success(&self) -> bool {
        self.meta().0
    }

    pub fn error(&self) -> Option<&str> {
        self.meta().1
    }

    pub fn totales(&self) -> Option<&Value> {
        self.meta().2
    }
}

/// Snapshot completo del estado de reportes.
///
/// Sólo lo mutan las transiciones del reducer; los lectores reciben copias.
#[derive(Debug, Clone, Default)]
pub struct ReportesState {
    /// Último resultado por clave; ausente = nunca cargado (o limpiado)
    pub data: HashMap<ReportKey, ReportData>,
    /// Flag de carga por clave
    pub loading: HashMap<ReportKey, bool>,
    /// Último error global
    pub error: Option<String>,
    /// Bundle del tablero, posiblemente parcial
    pub dashboard_data: Option<DashboardBundle>,
    /// Refresh de tablero en curso
    pub refreshing: bool,
    pub last_update: Option<DateTime<Utc>>,
    pub last_refresh: Option<DateTime<Utc>>,
}
