//! Public Link Commands
//!
//! Builds the shareable proposal URL, cached per project for the session,
//! and writes text to the system clipboard.

use wasm_bindgen_futures::JsFuture;

use super::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::ProjectLink;

/// `{public_base}/{user}/{slug}`
pub fn build_public_url(public_base: &str, user_name: &str, project_url: &str) -> String {
    format!(
        "{}/{}/{}",
        public_base.trim_end_matches('/'),
        user_name.trim_matches('/'),
        project_url.trim_matches('/')
    )
}

impl ApiClient {
    fn cached_link(&self, id: &str) -> Option<String> {
        self.link_cache.lock().ok().and_then(|cache| cache.get(id).cloned())
    }

    fn remember_link(&self, id: &str, url: &str) {
        if let Ok(mut cache) = self.link_cache.lock() {
            cache.insert(id.to_string(), url.to_string());
        }
    }

    /// Public link for a project. The clipboard write is left to the caller.
    pub async fn copy_link_with_cache(&self, id: &str) -> ApiResult<ProjectLink> {
        if let Some(full_url) = self.cached_link(id) {
            return Ok(ProjectLink { full_url, from_cache: true });
        }
        let project = self.get_project(id).await?;
        let slug = project
            .project_url
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::Rejected("A proposta ainda não tem endereço".into()))?;
        let account = self.user_account().await?;
        let full_url = build_public_url(&self.config.public_base, &account.user_name, &slug);
        self.remember_link(id, &full_url);
        Ok(ProjectLink { full_url, from_cache: false })
    }

    /// Forget a cached link, e.g. after the slug changed
    pub fn invalidate_link(&self, id: &str) {
        if let Ok(mut cache) = self.link_cache.lock() {
            cache.remove(id);
        }
    }
}

pub async fn copy_to_clipboard(text: &str) -> ApiResult<()> {
    let window = web_sys::window().ok_or_else(|| ApiError::Clipboard("sem janela".into()))?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| ApiError::Clipboard(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_build_public_url_trims_slashes() {
        assert_eq!(
            build_public_url("https://p.exemplo.com/", "/estudio/", "/identidade/"),
            "https://p.exemplo.com/estudio/identidade"
        );
    }

    #[test]
    fn test_cache_hit_and_invalidate() {
        let config = AppConfig::resolve(Some("http://x"), None, None, None).unwrap();
        let api = ApiClient::new(config);
        assert_eq!(api.cached_link("p1"), None);
        api.remember_link("p1", "http://x/u/p");
        let link = futures::executor::block_on(api.copy_link_with_cache("p1")).unwrap();
        assert_eq!(link, ProjectLink { full_url: "http://x/u/p".into(), from_cache: true });
        api.invalidate_link("p1");
        assert_eq!(api.cached_link("p1"), None);
    }
}
