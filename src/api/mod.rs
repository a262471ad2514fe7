//! REST API Bindings
//!
//! Frontend calls to the proposals backend, organized by domain.
//! Every endpoint answers with the `{ success, data, error }` envelope.

mod account;
mod links;
mod projects;
mod upload;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use leptos::prelude::*;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::ApiEnvelope;

// Re-export all public items
pub use account::*;
pub use links::*;
pub use projects::*;
pub use upload::*;

const UNKNOWN_ERROR: &str = "Erro desconhecido";

/// Handle to the backend, provided through context
#[derive(Clone)]
pub struct ApiClient {
    config: AppConfig,
    http: reqwest::Client,
    link_cache: Arc<Mutex<HashMap<String, String>>>,
}

impl ApiClient {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            link_cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        self.config.url(path)
    }
}

pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}

/// Decode an envelope, using the HTTP status when the body is not one
pub(crate) fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<ApiEnvelope<T>> {
    match serde_json::from_str::<ApiEnvelope<T>>(body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !(200..300).contains(&status) => Err(ApiError::Status { status }),
        Err(err) => Err(err.into()),
    }
}

/// `success: true` with data, or the server's error message
pub(crate) fn into_data<T>(envelope: ApiEnvelope<T>) -> ApiResult<T> {
    if !envelope.success {
        return Err(ApiError::Rejected(envelope.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string())));
    }
    envelope.data.ok_or_else(|| ApiError::Decode("resposta sem dados".into()))
}

/// `success: true`, ignoring any data
pub(crate) fn into_unit<T>(envelope: ApiEnvelope<T>) -> ApiResult<()> {
    if envelope.success {
        Ok(())
    } else {
        Err(ApiError::Rejected(envelope.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string())))
    }
}

pub(crate) async fn read_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<ApiEnvelope<T>> {
    let status = resp.status().as_u16();
    let body = resp.text().await?;
    parse_envelope(status, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Project;

    #[test]
    fn test_rejected_envelope_carries_message() {
        let env = parse_envelope::<Vec<Project>>(200, r#"{"success":false,"error":"Sem permissão"}"#).unwrap();
        assert_eq!(into_data(env).unwrap_err(), ApiError::Rejected("Sem permissão".into()));
    }

    #[test]
    fn test_rejected_without_message() {
        let env = parse_envelope::<serde_json::Value>(200, r#"{"success":false}"#).unwrap();
        assert_eq!(into_unit(env).unwrap_err(), ApiError::Rejected(UNKNOWN_ERROR.into()));
    }

    #[test]
    fn test_non_json_error_body_uses_status() {
        let err = parse_envelope::<serde_json::Value>(502, "<html>Bad gateway</html>").unwrap_err();
        assert_eq!(err, ApiError::Status { status: 502 });
    }

    #[test]
    fn test_non_json_success_body_is_decode_error() {
        let err = parse_envelope::<serde_json::Value>(200, "ok").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_clones_share_client_state() {
        let cfg = AppConfig::resolve(Some("https://api.exemplo.com/"), None, None, None).unwrap();
        let api = ApiClient::new(cfg);
        let copy = api.clone();
        assert!(std::ptr::eq(api.http(), api.http()));
        assert!(Arc::ptr_eq(&api.link_cache, &copy.link_cache));
        assert_eq!(copy.url("/api/projects"), "https://api.exemplo.com/api/projects");
    }

    #[test]
    fn test_success_without_data() {
        let env = parse_envelope::<Vec<Project>>(200, r#"{"success":true}"#).unwrap();
        assert!(matches!(into_data(env), Err(ApiError::Decode(_))));
    }
}
