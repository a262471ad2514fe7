//! Error Types
//!
//! Failures of network and browser calls. Validation problems are not
//! errors here; they live in `validation::FieldErrors`.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("falha de conexão: {0}")]
    Network(String),

    #[error("o servidor respondeu {status}")]
    Status { status: u16 },

    #[error("resposta inesperada do servidor: {0}")]
    Decode(String),

    /// `success: false` from the API
    #[error("{0}")]
    Rejected(String),

    #[error("falha no envio da imagem: {0}")]
    Upload(String),

    #[error("não foi possível copiar: {0}")]
    Clipboard(String),

    #[error("configuração ausente: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::Status { status: status.as_u16() }
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_shows_server_message() {
        let err = ApiError::Rejected("Projeto não encontrado".into());
        assert_eq!(err.to_string(), "Projeto não encontrado");
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: ApiError = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
