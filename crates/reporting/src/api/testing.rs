//! Stub del transporte para tests: respuestas programadas por endpoint,
//! sin servidor de por medio.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use contracts::enums::ReportKey;
use contracts::reports::result::ApiEnvelope;
use serde_json::{json, Value};

use super::client::FinanzasTransport;
use super::error::ApiError;

pub struct StubTransport {
    responses: HashMap<&'static str, ApiEnvelope>,
    transport_failures: HashSet<&'static str>,
    expired_sessions: HashSet<&'static str>,
    calls: AtomicUsize,
}

impl StubTransport {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            transport_failures: HashSet::new(),
            expired_sessions: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Respuesta exitosa con el `data` dado
    pub fn with_success(mut self, key: ReportKey, data: Value) -> Self {
        self.responses.insert(
            key.endpoint(),
            ApiEnvelope {
                success: true,
                data: Some(data),
                ..Default::default()
            },
        );
        self
    }

    /// Envelope arbitrario, para controlar totales/total/periodo
    pub fn with_envelope(mut self, key: ReportKey, envelope: ApiEnvelope) -> Self {
        self.responses.insert(key.endpoint(), envelope);
        self
    }

    /// `success: false` con mensaje del servidor
    pub fn with_api_error(mut self, key: ReportKey, message: &str) -> Self {
        self.responses.insert(
            key.endpoint(),
            ApiEnvelope {
                success: false,
                message: Some(message.to_string()),
                ..Default::default()
            },
        );
        self
    }

    /// El request ni llega: error de conexión
    pub fn with_transport_failure(mut self, key: ReportKey) -> Self {
        self.transport_failures.insert(key.endpoint());
        self
    }

    pub fn with_session_expired(mut self, key: ReportKey) -> Self {
        self.expired_sessions.insert(key.endpoint());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for StubTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FinanzasTransport for StubTransport {
    async fn get(
        &self,
        path: &str,
        _query: &[(String, String)],
    ) -> Result<ApiEnvelope, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.transport_failures.contains(path) {
            return Err(ApiError::Transport("conexión rechazada".to_string()));
        }
        if self.expired_sessions.contains(path) {
            return Err(ApiError::SessionExpired);
        }
        if let Some(envelope) = self.responses.get(path) {
            return Ok(envelope.clone());
        }

        // endpoints no programados responden vacío y exitoso
        Ok(ApiEnvelope {
            success: true,
            data: Some(json!([])),
            ..Default::default()
        })
    }
}
