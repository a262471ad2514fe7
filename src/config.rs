//! Runtime Configuration
//!
//! Values baked in at build time through environment variables, with the
//! page origin as the fallback API host.

use crate::error::ApiError;

pub const DEFAULT_PROJECTS_LIMIT: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Origin of the REST API, without trailing slash
    pub api_base: String,
    /// `limit` sent when listing projects
    pub projects_limit: u32,
    /// Origin used to build public proposal links
    pub public_base: String,
}

impl AppConfig {
    /// Resolve from build-time overrides and the current page origin
    pub fn load() -> Result<Self, ApiError> {
        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        Self::resolve(
            option_env!("PROPOSTAS_API_BASE"),
            option_env!("PROPOSTAS_PROJECTS_LIMIT"),
            option_env!("PROPOSTAS_PUBLIC_BASE"),
            origin,
        )
    }

    pub fn resolve(
        api_base: Option<&str>,
        projects_limit: Option<&str>,
        public_base: Option<&str>,
        origin: Option<String>,
    ) -> Result<Self, ApiError> {
        let api_base = api_base
            .map(str::to_string)
            .filter(|s| !s.trim().is_empty())
            .or(origin)
            .ok_or_else(|| ApiError::Config("PROPOSTAS_API_BASE".into()))?;
        let api_base = api_base.trim().trim_end_matches('/').to_string();

        let projects_limit = projects_limit
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_PROJECTS_LIMIT);

        let public_base = public_base
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| api_base.clone());

        Ok(Self { api_base, projects_limit, public_base })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_fallback() {
        let cfg = AppConfig::resolve(None, None, None, Some("https://app.exemplo.com".into())).unwrap();
        assert_eq!(cfg.api_base, "https://app.exemplo.com");
        assert_eq!(cfg.public_base, "https://app.exemplo.com");
        assert_eq!(cfg.projects_limit, DEFAULT_PROJECTS_LIMIT);
        assert_eq!(cfg.url("/api/projects"), "https://app.exemplo.com/api/projects");
    }

    #[test]
    fn test_overrides_win() {
        let cfg = AppConfig::resolve(
            Some("http://localhost:3000/"),
            Some("25"),
            Some("https://propostas.exemplo.com/"),
            Some("https://ignored".into()),
        )
        .unwrap();
        assert_eq!(cfg.api_base, "http://localhost:3000");
        assert_eq!(cfg.projects_limit, 25);
        assert_eq!(cfg.public_base, "https://propostas.exemplo.com");
    }

    #[test]
    fn test_bad_limit_falls_back() {
        let cfg = AppConfig::resolve(Some("http://x"), Some("zero"), None, None).unwrap();
        assert_eq!(cfg.projects_limit, DEFAULT_PROJECTS_LIMIT);
        let cfg = AppConfig::resolve(Some("http://x"), Some("0"), None, None).unwrap();
        assert_eq!(cfg.projects_limit, DEFAULT_PROJECTS_LIMIT);
    }

    #[test]
    fn test_missing_everything_is_config_error() {
        let err = AppConfig::resolve(None, None, None, None).unwrap_err();
        assert_eq!(err, ApiError::Config("PROPOSTAS_API_BASE".into()));
    }
}
