use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::task::JoinHandle;

use contracts::dashboards::{DashboardBundle, DashboardOutcome};
use contracts::enums::ReportKey;
use contracts::reports::result::ReportResult;
use contracts::reports::{FilterOverrides, ReportFilters};

use super::reducer::{reduce, ReportesAction};
use super::state::{ReportData, ReportesState};
use crate::reports::FinanzasApi;

/// Orquestador de reportes: estado por clave + carga del tablero.
///
/// Todas las mutaciones pasan por `dispatch`, que aplica el reducer sobre el
/// snapshot actual. Los fetches nunca devuelven `Err`: toda falla queda
/// capturada en el resultado y en el error global.
///
/// No hay deduplicación ni cancelación de requests en vuelo: dos cargas
/// concurrentes de la misma clave compiten y gana la que escribe última.
pub struct ReportesStore {
    api: FinanzasApi,
    filtros: RwLock<ReportFilters>,
    state: RwLock<ReportesState>,
}

impl ReportesStore {
    pub fn new(api: FinanzasApi) -> Self {
        Self::with_filters(api, ReportFilters::default())
    }

    pub fn with_filters(api: FinanzasApi, filtros: ReportFilters) -> Self {
        Self {
            api,
            filtros: RwLock::new(filtros),
            state: RwLock::new(ReportesState::default()),
        }
    }

    fn dispatch(&self, action: ReportesAction) {
        let mut state = self.state.write().unwrap();
        *state = reduce(&state, action);
    }

    // ------------------------------------------------------------------
    // Filtros
    // ------------------------------------------------------------------

    pub fn filters(&self) -> ReportFilters {
        self.filtros.read().unwrap().clone()
    }

    pub fn set_filters(&self, filtros: ReportFilters) {
        *self.filtros.write().unwrap() = filtros;
    }

    pub fn update_filters(&self, overrides: &FilterOverrides) {
        let mut filtros = self.filtros.write().unwrap();
        *filtros = filtros.merged(overrides);
    }

    pub fn reset_filters(&self) {
        *self.filtros.write().unwrap() = ReportFilters::default();
    }

    // ------------------------------------------------------------------
    // Cargas
    // ------------------------------------------------------------------

    /// Carga un reporte puntual y guarda el resultado en su slot, haya
    /// salido bien o mal. Devuelve el resultado para el llamador directo.
    pub async fn load_report(&self, key: ReportKey, overrides: &FilterOverrides) -> ReportData {
        self.dispatch(ReportesAction::SetLoading { key, loading: true });
        self.dispatch(ReportesAction::ClearError);

        let filtros = self.filters().merged(overrides);
        let data = fetch_report(self.api.clone(), key, filtros).await;

        self.dispatch(ReportesAction::SetData(data.clone()));
        if let Some(message) = data.error() {
            self.dispatch(ReportesAction::SetError(message.to_string()));
        }
        self.dispatch(ReportesAction::SetLoading {
            key,
            loading: false,
        });
        data
    }

    /// Carga el tablero completo: ocho fetches concurrentes e
    /// independientes. Un slot que falla queda en `None` sin frenar a los
    /// demás; el bundle parcial se compromete igual, con un único error
    /// agregado que junta todos los motivos.
    pub async fn load_dashboard(&self, overrides: &FilterOverrides) -> DashboardOutcome {
        self.dispatch(ReportesAction::RefreshData);

        let filtros = self.filters().merged(overrides);
        let top5 = filtros.merged(&FilterOverrides::limite(5));

        let api = self.api.clone();
        let f = filtros.clone();
        let h_resumen = tokio::spawn(async move { api.fetch_resumen_financiero(&f).await });

        let api = self.api.clone();
        let f = filtros.clone();
        let h_ganancias = tokio::spawn(async move { api.fetch_ganancias_detalladas(&f).await });

        let api = self.api.clone();
        let f = top5.clone();
        let h_top_productos =
            tokio::spawn(async move { api.fetch_ganancias_por_producto(&f).await });

        let api = self.api.clone();
        let f = filtros.clone();
        let h_empleados = tokio::spawn(async move { api.fetch_ganancias_por_empleado(&f).await });

        let api = self.api.clone();
        let f = top5.clone();
        let h_ciudades = tokio::spawn(async move { api.fetch_ganancias_por_ciudad(&f).await });

        let api = self.api.clone();
        let f = filtros.clone();
        let h_vendedores = tokio::spawn(async move { api.fetch_ventas_por_vendedor(&f).await });

        let api = self.api.clone();
        let f = filtros.clone();
        let h_balance = tokio::spawn(async move { api.fetch_balance_general(&f).await });

        let api = self.api.clone();
        let f = top5.clone();
        let h_top_vendidos =
            tokio::spawn(async move { api.fetch_productos_mas_vendidos(&f).await });

        let mut errores = Vec::new();
        let bundle = DashboardBundle {
            resumen: slot(h_resumen.await, ReportKey::ResumenFinanciero, &mut errores),
            ganancias: slot(
                h_ganancias.await,
                ReportKey::GananciasDetalladas,
                &mut errores,
            ),
            top_productos: slot(
                h_top_productos.await,
                ReportKey::GananciasPorProducto,
                &mut errores,
            ),
            empleados: slot(
                h_empleados.await,
                ReportKey::GananciasPorEmpleado,
                &mut errores,
            ),
            ciudades: slot(h_ciudades.await, ReportKey::GananciasPorCiudad, &mut errores),
            vendedores: slot(
                h_vendedores.await,
                ReportKey::VentasPorVendedor,
                &mut errores,
            ),
            balance: slot(h_balance.await, ReportKey::BalanceGeneral, &mut errores),
            top_vendidos: slot(
                h_top_vendidos.await,
                ReportKey::ProductosMasVendidos,
                &mut errores,
            ),
        };

        if !errores.is_empty() {
            tracing::warn!("Dashboard loaded with {} failed slices", errores.len());
            self.dispatch(ReportesAction::SetError(format!(
                "Errores cargando: {}",
                errores.join(", ")
            )));
        }

        // un bundle parcial también se compromete y sella last_update
        self.dispatch(ReportesAction::SetDashboardData(bundle.clone()));
        self.dispatch(ReportesAction::RefreshComplete);

        DashboardOutcome {
            success: true,
            bundle,
            errores,
        }
    }

    /// Valida los filtros y recién entonces carga el tablero. Con un
    /// período inválido no se emite ningún request.
    pub async fn refresh_all(&self) -> anyhow::Result<DashboardOutcome> {
        let filtros = self.filters();
        filtros.validar()?;
        if filtros.dias_en_periodo() > 365 {
            tracing::warn!(
                "Período de {} días, la carga puede demorar",
                filtros.dias_en_periodo()
            );
        }
        Ok(self.load_dashboard(&FilterOverrides::default()).await)
    }

    /// Recarga extendida: los trece reportes filtrables en paralelo, cada
    /// resultado a su slot. Devuelve los motivos de falla.
    pub async fn refresh_extended(&self, overrides: &FilterOverrides) -> Vec<String> {
        self.dispatch(ReportesAction::ClearError);

        let filtros = self.filters().merged(overrides);
        let top15 = filtros.merged(&FilterOverrides::limite(15));

        // los rankings van con límite 15, el resto con los filtros base
        let plan = [
            (ReportKey::ResumenFinanciero, &filtros),
            (ReportKey::GananciasDetalladas, &filtros),
            (ReportKey::GananciasPorProducto, &top15),
            (ReportKey::GananciasPorEmpleado, &filtros),
            (ReportKey::GananciasPorCiudad, &top15),
            (ReportKey::ProductosMasRentables, &top15),
            (ReportKey::ProductosMasVendidos, &top15),
            (ReportKey::BalanceGeneral, &filtros),
            (ReportKey::BalancePorCuenta, &filtros),
            (ReportKey::FlujoDeFondos, &filtros),
            (ReportKey::VentasPorVendedor, &filtros),
            (ReportKey::DistribucionIngresos, &filtros),
            (ReportKey::GastosPorCategoria, &filtros),
        ];

        let handles: Vec<(ReportKey, JoinHandle<ReportData>)> = plan
            .into_iter()
            .map(|(key, filtros)| {
                let api = self.api.clone();
                let filtros = filtros.clone();
                let handle = tokio::spawn(async move { fetch_report(api, key, filtros).await });
                (key, handle)
            })
            .collect();

        let mut errores = Vec::new();
        for (key, handle) in handles {
            match handle.await {
                Ok(data) => {
                    if let Some(message) = data.error() {
                        errores.push(message.to_string());
                    }
                    self.dispatch(ReportesAction::SetData(data));
                }
                Err(e) => {
                    errores.push(format!("Error al cargar {}: {}", key.display_name(), e));
                }
            }
        }

        if !errores.is_empty() {
            self.dispatch(ReportesAction::SetError(format!(
                "Errores cargando: {}",
                errores.join(", ")
            )));
        }
        errores
    }

    /// Vacía todos los slots de datos y el error global. Los flags de
    /// loading no se tocan; no invocar con una carga en vuelo.
    pub fn clear_data(&self) {
        self.dispatch(ReportesAction::ClearData);
    }

    // ------------------------------------------------------------------
    // Consultas derivadas
    // ------------------------------------------------------------------

    pub fn is_loading(&self, key: ReportKey) -> bool {
        self.state
            .read()
            .unwrap()
            .loading
            .get(&key)
            .copied()
            .unwrap_or(false)
    }

    /// Alguna carga puntual o un refresh de tablero en curso
    pub fn is_any_loading(&self) -> bool {
        let state = self.state.read().unwrap();
        state.loading.values().any(|flag| *flag) || state.refreshing
    }

    /// `true` sólo si el slot tiene un resultado exitoso
    pub fn has_data(&self, key: ReportKey) -> bool {
        self.state
            .read()
            .unwrap()
            .data
            .get(&key)
            .map(|data| data.success())
            .unwrap_or(false)
    }

    pub fn get_data(&self, key: ReportKey) -> Option<ReportData> {
        self.state.read().unwrap().data.get(&key).cloned()
    }

    pub fn get_totales(&self, key: ReportKey) -> Option<Value> {
        self.state
            .read()
            .unwrap()
            .data
            .get(&key)
            .and_then(|data| data.totales().cloned())
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.read().unwrap().error.clone()
    }

    pub fn dashboard_data(&self) -> Option<DashboardBundle> {
        self.state.read().unwrap().dashboard_data.clone()
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.state.read().unwrap().last_update
    }

    /// Hora de la última actualización, `Nunca` si todavía no hubo
    pub fn last_update_formatted(&self) -> String {
        match self.last_update() {
            Some(momento) => momento.format("%H:%M:%S").to_string(),
            None => "Nunca".to_string(),
        }
    }

    /// Copia del snapshot completo, para consumidores que leen varias cosas
    pub fn snapshot(&self) -> ReportesState {
        self.state.read().unwrap().clone()
    }
}

/// Resuelve la clave contra su función de fetch y tipa el resultado.
async fn fetch_report(api: FinanzasApi, key: ReportKey, filtros: ReportFilters) -> ReportData {
    match key {
        ReportKey::ResumenFinanciero => {
            ReportData::ResumenFinanciero(api.fetch_resumen_financiero(&filtros).await)
        }
        ReportKey::GananciasDetalladas => {
            ReportData::GananciasDetalladas(api.fetch_ganancias_detalladas(&filtros).await)
        }
        ReportKey::GananciasPorProducto => {
            ReportData::GananciasPorProducto(api.fetch_ganancias_por_producto(&filtros).await)
        }
        ReportKey::GananciasPorEmpleado => {
            ReportData::GananciasPorEmpleado(api.fetch_ganancias_por_empleado(&filtros).await)
        }
        ReportKey::GananciasPorCiudad => {
            ReportData::GananciasPorCiudad(api.fetch_ganancias_por_ciudad(&filtros).await)
        }
        ReportKey::ProductosMasRentables => {
            ReportData::ProductosMasRentables(api.fetch_productos_mas_rentables(&filtros).await)
        }
        ReportKey::ProductosMasVendidos => {
            ReportData::ProductosMasVendidos(api.fetch_productos_mas_vendidos(&filtros).await)
        }
        ReportKey::BalanceGeneral => {
            ReportData::BalanceGeneral(api.fetch_balance_general(&filtros).await)
        }
        ReportKey::BalancePorCuenta => {
            ReportData::BalancePorCuenta(api.fetch_balance_por_cuenta(&filtros).await)
        }
        ReportKey::FlujoDeFondos => {
            ReportData::FlujoDeFondos(api.fetch_flujo_de_fondos(&filtros).await)
        }
        ReportKey::VentasPorVendedor => {
            ReportData::VentasPorVendedor(api.fetch_ventas_por_vendedor(&filtros).await)
        }
        ReportKey::DistribucionIngresos => {
            ReportData::DistribucionIngresos(api.fetch_distribucion_ingresos(&filtros).await)
        }
        ReportKey::GastosPorCategoria => {
            ReportData::GastosPorCategoria(api.fetch_gastos_por_categoria(&filtros).await)
        }
        ReportKey::AniosDisponibles => {
            ReportData::AniosDisponibles(api.fetch_anios_disponibles().await)
        }
    }
}

/// Convierte el desenlace de una rama del fan-out en su slot: `Some` si el
/// fetch terminó bien, `None` (más el motivo) si falló o si la task murió.
fn slot<T>(
    joined: Result<ReportResult<T>, tokio::task::JoinError>,
    key: ReportKey,
    errores: &mut Vec<String>,
) -> Option<ReportResult<T>> {
    match joined {
        Ok(result) if result.success => Some(result),
        Ok(result) => {
            errores.push(
                result
                    .error
                    .unwrap_or_else(|| format!("Error al cargar {}", key.display_name())),
            );
            None
        }
        Err(e) => {
            errores.push(format!("Error al cargar {}: {}", key.display_name(), e));
            None
        }
    }
}
