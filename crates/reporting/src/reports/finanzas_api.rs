use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde_json::Value;

use contracts::enums::ReportKey;
use contracts::reports::dto::{
    BalanceCuenta, DistribucionIngreso, FlujoFondos, GananciaCiudad, GananciaEmpleado,
    GananciaPeriodo, GananciaProducto, GastoCategoria, ProductoRentable, ProductoVendido,
    ResumenFinanciero, SaldoCuenta, VentaVendedor,
};
use contracts::reports::result::{ApiEnvelope, ReportResult};
use contracts::reports::ReportFilters;
use contracts::shared::numeric::coerce_f64;

use crate::api::FinanzasTransport;

/// Funciones de fetch de reportes, una por [`ReportKey`].
///
/// Cada fetch prende su flag de loading antes del request y lo apaga en
/// todos los caminos de salida (guard con Drop), limpia el error global al
/// arrancar y lo setea si el request falla. Ningún error escapa como `Err`:
/// siempre vuelve un [`ReportResult`] normalizado.
#[derive(Clone)]
pub struct FinanzasApi {
    transport: Arc<dyn FinanzasTransport>,
    loading: Arc<RwLock<HashMap<ReportKey, bool>>>,
    error: Arc<RwLock<Option<String>>>,
}

/// Mantiene el flag de loading en true mientras vive; lo apaga al soltarse,
/// falle o no el request.
struct LoadingGuard {
    loading: Arc<RwLock<HashMap<ReportKey, bool>>>,
    key: ReportKey,
}

impl LoadingGuard {
    fn acquire(loading: &Arc<RwLock<HashMap<ReportKey, bool>>>, key: ReportKey) -> Self {
        loading.write().unwrap().insert(key, true);
        Self {
            loading: Arc::clone(loading),
            key,
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if let Ok(mut map) = self.loading.write() {
            map.insert(self.key, false);
        }
    }
}

impl FinanzasApi {
    pub fn new(transport: Arc<dyn FinanzasTransport>) -> Self {
        Self {
            transport,
            loading: Arc::new(RwLock::new(HashMap::new())),
            error: Arc::new(RwLock::new(None)),
        }
    }

    pub fn is_loading(&self, key: ReportKey) -> bool {
        self.loading
            .read()
            .unwrap()
            .get(&key)
            .copied()
            .unwrap_or(false)
    }

    pub fn is_any_loading(&self) -> bool {
        self.loading.read().unwrap().values().any(|flag| *flag)
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.read().unwrap().clone()
    }

    pub fn clear_error(&self) {
        *self.error.write().unwrap() = None;
    }

    fn set_error(&self, message: &str) {
        *self.error.write().unwrap() = Some(message.to_string());
    }

    /// GET crudo + chequeo del flag `success` del envelope
    async fn fetch_envelope(
        &self,
        key: ReportKey,
        query: &[(String, String)],
    ) -> Result<ApiEnvelope, String> {
        match self.transport.get(key.endpoint(), query).await {
            Ok(envelope) if envelope.success => Ok(envelope),
            Ok(envelope) => {
                let message = envelope
                    .message
                    .unwrap_or_else(|| format!("Error al cargar {}", key.display_name()));
                tracing::error!("Finanzas API rejected {}: {}", key.code(), message);
                Err(message)
            }
            Err(e) => {
                tracing::error!("Request failed for {}: {}", key.code(), e);
                Err(e.to_string())
            }
        }
    }

    /// Normalización común de los reportes que devuelven filas
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        key: ReportKey,
        query: &[(String, String)],
    ) -> ReportResult<Vec<T>> {
        let _guard = LoadingGuard::acquire(&self.loading, key);
        self.clear_error();

        match self.fetch_envelope(key, query).await {
            Ok(envelope) => {
                let (rows, format_error) = rows_from_value::<T>(key, envelope.data);
                if let Some(message) = &format_error {
                    self.set_error(message);
                }
                ReportResult {
                    success: true,
                    data: Some(rows),
                    totales: envelope.totales,
                    total: envelope.total.as_ref().map(coerce_f64),
                    periodo: envelope.periodo,
                    error: format_error,
                }
            }
            Err(message) => {
                self.set_error(&message);
                ReportResult::failed(message)
            }
        }
    }

    /// Normalización de los reportes que devuelven un objeto único
    async fn fetch_object<T: DeserializeOwned + Default>(
        &self,
        key: ReportKey,
        query: &[(String, String)],
    ) -> ReportResult<T> {
        let _guard = LoadingGuard::acquire(&self.loading, key);
        self.clear_error();

        match self.fetch_envelope(key, query).await {
            Ok(envelope) => {
                let (data, format_error) = object_from_value::<T>(key, envelope.data);
                if let Some(message) = &format_error {
                    self.set_error(message);
                }
                ReportResult {
                    success: true,
                    data: Some(data),
                    totales: envelope.totales,
                    total: envelope.total.as_ref().map(coerce_f64),
                    periodo: envelope.periodo,
                    error: format_error,
                }
            }
            Err(message) => {
                self.set_error(&message);
                ReportResult::failed(message)
            }
        }
    }

    pub async fn fetch_resumen_financiero(
        &self,
        filtros: &ReportFilters,
    ) -> ReportResult<ResumenFinanciero> {
        self.fetch_object(ReportKey::ResumenFinanciero, &filtros.query_pairs())
            .await
    }

    pub async fn fetch_ganancias_detalladas(
        &self,
        filtros: &ReportFilters,
    ) -> ReportResult<Vec<GananciaPeriodo>> {
        self.fetch_rows(ReportKey::GananciasDetalladas, &filtros.query_pairs())
            .await
    }

    pub async fn fetch_ganancias_por_producto(
        &self,
        filtros: &ReportFilters,
    ) -> ReportResult<Vec<GananciaProducto>> {
        self.fetch_rows(ReportKey::GananciasPorProducto, &filtros.query_pairs())
            .await
    }

    pub async fn fetch_ganancias_por_empleado(
        &self,
        filtros: &ReportFilters,
    ) -> ReportResult<Vec<GananciaEmpleado>> {
        self.fetch_rows(ReportKey::GananciasPorEmpleado, &filtros.query_pairs())
            .await
    }

    pub async fn fetch_ganancias_por_ciudad(
        &self,
        filtros: &ReportFilters,
    ) -> ReportResult<Vec<GananciaCiudad>> {
        self.fetch_rows(ReportKey::GananciasPorCiudad, &filtros.query_pairs())
            .await
    }

    pub async fn fetch_productos_mas_rentables(
        &self,
        filtros: &ReportFilters,
    ) -> ReportResult<Vec<ProductoRentable>> {
        self.fetch_rows(ReportKey::ProductosMasRentables, &filtros.query_pairs())
            .await
    }

    pub async fn fetch_productos_mas_vendidos(
        &self,
        filtros: &ReportFilters,
    ) -> ReportResult<Vec<ProductoVendido>> {
        self.fetch_rows(ReportKey::ProductosMasVendidos, &filtros.query_pairs())
            .await
    }

    pub async fn fetch_balance_general(
        &self,
        filtros: &ReportFilters,
    ) -> ReportResult<Vec<BalanceCuenta>> {
        self.fetch_rows(ReportKey::BalanceGeneral, &filtros.query_pairs())
            .await
    }

    pub async fn fetch_balance_por_cuenta(
        &self,
        filtros: &ReportFilters,
    ) -> ReportResult<Vec<SaldoCuenta>> {
        self.fetch_rows(ReportKey::BalancePorCuenta, &filtros.query_pairs())
            .await
    }

    pub async fn fetch_flujo_de_fondos(
        &self,
        filtros: &ReportFilters,
    ) -> ReportResult<Vec<FlujoFondos>> {
        self.fetch_rows(ReportKey::FlujoDeFondos, &filtros.query_pairs())
            .await
    }

    pub async fn fetch_ventas_por_vendedor(
        &self,
        filtros: &ReportFilters,
    ) -> ReportResult<Vec<VentaVendedor>> {
        self.fetch_rows(ReportKey::VentasPorVendedor, &filtros.query_pairs())
            .await
    }

    pub async fn fetch_distribucion_ingresos(
        &self,
        filtros: &ReportFilters,
    ) -> ReportResult<Vec<DistribucionIngreso>> {
        self.fetch_rows(ReportKey::DistribucionIngresos, &filtros.query_pairs())
            .await
    }

    pub async fn fetch_gastos_por_categoria(
        &self,
        filtros: &ReportFilters,
    ) -> ReportResult<Vec<GastoCategoria>> {
        self.fetch_rows(ReportKey::GastosPorCategoria, &filtros.query_pairs())
            .await
    }

    /// Años con datos cargados; es el único reporte sin filtros
    pub async fn fetch_anios_disponibles(&self) -> ReportResult<Vec<i64>> {
        self.fetch_rows(ReportKey::AniosDisponibles, &[]).await
    }
}

/// `data` debería ser un array de filas; si no lo es, degrada a vacío con un
/// mensaje de formato en vez de tirar abajo la página completa.
fn rows_from_value<T: DeserializeOwned>(
    key: ReportKey,
    data: Option<Value>,
) -> (Vec<T>, Option<String>) {
    match data {
        Some(value @ Value::Array(_)) => match serde_json::from_value::<Vec<T>>(value) {
            Ok(rows) => (rows, None),
            Err(e) => {
                tracing::warn!("Unexpected row shape in {}: {}", key.code(), e);
                (Vec::new(), Some(mensaje_formato(key)))
            }
        },
        Some(otro) => {
            tracing::warn!(
                "Expected an array in {} response, got {}",
                key.code(),
                tipo_json(&otro)
            );
            (Vec::new(), Some(mensaje_formato(key)))
        }
        // success sin data: lista vacía, sin error
        None => (Vec::new(), None),
    }
}

fn object_from_value<T: DeserializeOwned + Default>(
    key: ReportKey,
    data: Option<Value>,
) -> (T, Option<String>) {
    match data {
        Some(value) => match serde_json::from_value::<T>(value) {
            Ok(objeto) => (objeto, None),
            Err(e) => {
                tracing::warn!("Unexpected object shape in {}: {}", key.code(), e);
                (T::default(), Some(mensaje_formato(key)))
            }
        },
        None => (T::default(), None),
    }
}

fn mensaje_formato(key: ReportKey) -> String {
    format!("Formato de datos inesperado en {}", key.display_name())
}

fn tipo_json(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::StubTransport;
    use serde_json::json;

    fn filtros() -> ReportFilters {
        ReportFilters {
            desde: "2025-07-01".to_string(),
            hasta: "2025-07-31".to_string(),
            ..ReportFilters::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_filas_ok() {
        let stub = StubTransport::new().with_success(
            ReportKey::GananciasPorCiudad,
            json!([
                {
                    "ciudad": "Córdoba",
                    "provincia": "Córdoba",
                    "total_ventas": "12",
                    "clientes_unicos": 8,
                    "ingresos_totales": "54000.50",
                    "ganancia_estimada": 15000
                }
            ]),
        );
        let api = FinanzasApi::new(Arc::new(stub));

        let result = api.fetch_ganancias_por_ciudad(&filtros()).await;
        assert!(result.success);
        let filas = result.data.unwrap();
        assert_eq!(filas.len(), 1);
        assert_eq!(filas[0].total_ventas, 12);
        assert_eq!(filas[0].ingresos_totales, 54000.50);
        assert!(api.last_error().is_none());
        assert!(!api.is_loading(ReportKey::GananciasPorCiudad));
    }

    #[tokio::test]
    async fn test_error_del_servidor_usa_su_mensaje() {
        let stub = StubTransport::new()
            .with_api_error(ReportKey::BalanceGeneral, "Cuenta contable inexistente");
        let api = FinanzasApi::new(Arc::new(stub));

        let result = api.fetch_balance_general(&filtros()).await;
        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.error.as_deref(), Some("Cuenta contable inexistente"));
        assert_eq!(
            api.last_error().as_deref(),
            Some("Cuenta contable inexistente")
        );
    }

    #[tokio::test]
    async fn test_error_sin_mensaje_usa_fallback() {
        let stub = StubTransport::new().with_envelope(
            ReportKey::FlujoDeFondos,
            ApiEnvelope {
                success: false,
                ..Default::default()
            },
        );
        let api = FinanzasApi::new(Arc::new(stub));

        let result = api.fetch_flujo_de_fondos(&filtros()).await;
        assert_eq!(
            result.error.as_deref(),
            Some("Error al cargar Flujo de fondos")
        );
    }

    #[tokio::test]
    async fn test_falla_de_transporte_no_escapa() {
        let stub = StubTransport::new().with_transport_failure(ReportKey::VentasPorVendedor);
        let api = FinanzasApi::new(Arc::new(stub));

        let result = api.fetch_ventas_por_vendedor(&filtros()).await;
        assert!(!result.success);
        assert!(result.error.is_some());
        // el flag quedó apagado aunque el request falló
        assert!(!api.is_loading(ReportKey::VentasPorVendedor));
    }

    #[tokio::test]
    async fn test_sesion_expirada_distinguible() {
        let stub = StubTransport::new().with_session_expired(ReportKey::ResumenFinanciero);
        let api = FinanzasApi::new(Arc::new(stub));

        let result = api.fetch_resumen_financiero(&filtros()).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Sesión expirada"));
    }

    #[tokio::test]
    async fn test_data_no_array_degrada_a_vacio() {
        let stub = StubTransport::new().with_success(
            ReportKey::GananciasPorProducto,
            json!({ "esto": "no es un array" }),
        );
        let api = FinanzasApi::new(Arc::new(stub));

        let result = api.fetch_ganancias_por_producto(&filtros()).await;
        assert!(result.success);
        assert_eq!(result.data.unwrap().len(), 0);
        assert!(result.error.unwrap().contains("Formato de datos inesperado"));
    }

    #[tokio::test]
    async fn test_totales_y_periodo_pasan_enteros() {
        let stub = StubTransport::new().with_envelope(
            ReportKey::GananciasDetalladas,
            ApiEnvelope {
                success: true,
                data: Some(json!([])),
                totales: Some(json!({
                    "total_ventas": 9,
                    "ingresos_totales": "81000",
                    "ganancia_estimada": 20000
                })),
                periodo: Some("mensual".to_string()),
                ..Default::default()
            },
        );
        let api = FinanzasApi::new(Arc::new(stub));

        let result = api.fetch_ganancias_detalladas(&filtros()).await;
        assert_eq!(result.periodo.as_deref(), Some("mensual"));
        let totales: contracts::reports::dto::GananciasTotales = result.totales_as().unwrap();
        assert_eq!(totales.ingresos_totales, 81000.0);
    }

    #[tokio::test]
    async fn test_total_coercionado_a_numero() {
        let stub = StubTransport::new().with_envelope(
            ReportKey::DistribucionIngresos,
            ApiEnvelope {
                success: true,
                data: Some(json!([])),
                total: Some(json!("125000.75")),
                ..Default::default()
            },
        );
        let api = FinanzasApi::new(Arc::new(stub));

        let result = api.fetch_distribucion_ingresos(&filtros()).await;
        assert_eq!(result.total, Some(125000.75));
    }
}
