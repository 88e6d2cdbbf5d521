use thiserror::Error;

/// Errores del cliente HTTP de finanzas.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Falla de red, DNS o timeout: nunca llegó una respuesta
    #[error("Error de conexión con el servidor: {0}")]
    Transport(String),

    /// HTTP 401, distinguible del resto para que la UI pida re-login
    #[error("Sesión expirada, volvé a iniciar sesión")]
    SessionExpired,

    /// El servidor respondió con estado de error o `success: false`
    #[error("{0}")]
    Api(String),

    /// El cuerpo no tiene la forma esperada
    #[error("Formato de respuesta inesperado: {0}")]
    Format(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport("el servidor no respondió a tiempo".to_string())
        } else if err.is_connect() {
            ApiError::Transport(format!("no se pudo conectar: {}", err))
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mensajes_distinguibles() {
        let sesion = ApiError::SessionExpired.to_string();
        let transporte = ApiError::Transport("sin red".to_string()).to_string();
        assert!(sesion.contains("Sesión expirada"));
        assert!(transporte.contains("sin red"));
        assert_ne!(sesion, transporte);
    }
}
