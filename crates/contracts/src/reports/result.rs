use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cuerpo crudo que devuelven todos los endpoints de finanzas.
///
/// `data` queda como JSON sin tipar: cada fetch sabe qué forma espera y la
/// degrada a vacío si no coincide, sin tirar abajo la página completa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub totales: Option<Value>,
    #[serde(default)]
    pub total: Option<Value>,
    #[serde(default)]
    pub periodo: Option<String>,
}

/// Resultado normalizado de un fetch de reporte. Inmutable una vez guardado
/// en el estado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResult<T> {
    pub success: bool,
    pub data: Option<T>,
    /// Agregados del período, sólo en los reportes que los publican
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totales: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periodo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ReportResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            totales: None,
            total: None,
            periodo: None,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            totales: None,
            total: None,
            periodo: None,
            error: Some(error.into()),
        }
    }

    /// Vista tipada de `totales` para los consumidores que conocen su forma
    pub fn totales_as<A: DeserializeOwned>(&self) -> Option<A> {
        self.totales
            .clone()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}
