use async_trait::async_trait;
use contracts::reports::result::ApiEnvelope;

use super::error::ApiError;
use crate::shared::config::ApiConfig;

/// Transporte hacia la API de finanzas.
///
/// Es un trait para que los tests puedan stubear la API sin levantar un
/// servidor; la implementación real es [`ApiClient`].
#[async_trait]
pub trait FinanzasTransport: Send + Sync {
    /// GET a un path relativo con los query params ya filtrados
    async fn get(&self, path: &str, query: &[(String, String)])
        -> Result<ApiEnvelope, ApiError>;
}

/// Cliente HTTP real sobre reqwest, con token de sesión y timeout fijo.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    fn build_url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let params: Vec<String> = query
                .iter()
                .map(|(clave, valor)| format!("{}={}", clave, urlencoding::encode(valor)))
                .collect();
            url.push('?');
            url.push_str(&params.join("&"));
        }
        url
    }
}

#[async_trait]
impl FinanzasTransport for ApiClient {
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<ApiEnvelope, ApiError> {
        let url = self.build_url(path, query);
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status.as_u16() == 401 {
            tracing::warn!("Session expired (401) on {}", path);
            return Err(ApiError::SessionExpired);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Finanzas API returned status {} on {}: {}", status, path, body);
            return Err(ApiError::Api(format!(
                "El servidor respondió con estado {}",
                status
            )));
        }

        let body = response.text().await.map_err(ApiError::from)?;
        match serde_json::from_str::<ApiEnvelope>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(e) => {
                let preview: String = body.chars().take(200).collect();
                tracing::error!(
                    "Failed to parse finanzas response on {}: {}. Body: {}",
                    path,
                    e,
                    preview
                );
                Err(ApiError::Format(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cliente() -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: "http://localhost:3001/api/".to_string(),
            token: None,
            timeout_secs: 30,
        })
    }

    #[test]
    fn test_build_url_sin_query() {
        let url = cliente().build_url("/finanzas/anios-disponibles", &[]);
        assert_eq!(url, "http://localhost:3001/api/finanzas/anios-disponibles");
    }

    #[test]
    fn test_build_url_codifica_valores() {
        let query = vec![
            ("desde".to_string(), "2025-07-01".to_string()),
            ("ciudad".to_string(), "San Miguel de Tucumán".to_string()),
        ];
        let url = cliente().build_url("/finanzas/ganancias-por-ciudad", &query);
        assert_eq!(
            url,
            "http://localhost:3001/api/finanzas/ganancias-por-ciudad?desde=2025-07-01&ciudad=San%20Miguel%20de%20Tucum%C3%A1n"
        );
    }
}
