//! Typed failures of every front-end operation.
//!
//! Each async handler returns `Result<_, AppError>` so the calling view can
//! branch on the variant instead of reading the console.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Token missing, invalid or expired (HTTP 401). Tears the session down.
    #[error("sesión no válida: {0}")]
    Authentication(String),

    /// Role does not allow the action (HTTP 403)
    #[error("acceso denegado: {0}")]
    Authorization(String),

    /// Required input missing; detected before any request is sent
    #[error("{0}")]
    Validation(String),

    /// Server answered with a non-2xx status
    #[error("error del servidor ({status}): {detail}")]
    Remote { status: u16, detail: String },

    /// Request never reached the server
    #[error("error de red: {0}")]
    Network(String),

    /// Body could not be (de)serialized
    #[error("respuesta inválida: {0}")]
    Decode(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// "Field X is required" in the wording used across forms
    pub fn required(field: &str) -> Self {
        AppError::Validation(format!("El campo \"{}\" es obligatorio", field))
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, AppError::Authentication(_))
    }

    /// Text shown in toasts and inline alerts
    pub fn user_message(&self) -> String {
        match self {
            AppError::Authentication(_) => {
                "Tu sesión ha expirado. Inicia sesión nuevamente.".to_string()
            }
            AppError::Authorization(_) => {
                "No tienes permisos para realizar esta acción.".to_string()
            }
            AppError::Validation(msg) => msg.clone(),
            AppError::Remote { detail, .. } if !detail.is_empty() => detail.clone(),
            AppError::Remote { status, .. } => {
                format!("El servidor respondió con un error ({}).", status)
            }
            AppError::Network(_) => {
                "No se pudo conectar con el servidor. Verifica tu conexión e inténtalo de nuevo."
                    .to_string()
            }
            AppError::Decode(_) => "El servidor devolvió una respuesta inesperada.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_detail_is_preferred() {
        let err = AppError::Remote {
            status: 404,
            detail: "Producto no encontrado".to_string(),
        };
        assert_eq!(err.user_message(), "Producto no encontrado");

        let err = AppError::Remote {
            status: 500,
            detail: String::new(),
        };
        assert_eq!(err.user_message(), "El servidor respondió con un error (500).");
    }

    #[test]
    fn test_required_field_message() {
        let err = AppError::required("Cliente");
        assert_eq!(err.user_message(), "El campo \"Cliente\" es obligatorio");
        assert!(!err.is_authentication());
    }
}
