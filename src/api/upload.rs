//! Image Upload
//!
//! Sends one image file to the storage collaborator and returns its URL.

use wasm_bindgen_futures::JsFuture;

use super::{into_data, read_envelope, ApiClient};
use crate::error::{ApiError, ApiResult};
use crate::models::UploadedImage;

pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Reject obviously bad files before touching the network
pub fn check_upload(mime: &str, size: u64) -> ApiResult<()> {
    if !mime.starts_with("image/") {
        return Err(ApiError::Upload("o arquivo precisa ser uma imagem".into()));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(ApiError::Upload("a imagem deve ter no máximo 5 MB".into()));
    }
    Ok(())
}

impl ApiClient {
    pub async fn upload_image(&self, file: web_sys::File) -> ApiResult<String> {
        let mime = file.type_();
        check_upload(&mime, file.size() as u64)?;

        let buffer = JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| ApiError::Upload(format!("{:?}", e)))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        log::info!("[API] upload {} ({} bytes)", file.name(), bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file.name())
            .mime_str(&mime)
            .map_err(|e| ApiError::Upload(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .http()
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;
        let uploaded: UploadedImage = into_data(read_envelope(resp).await?)
            .map_err(|e| match e {
                ApiError::Rejected(msg) => ApiError::Upload(msg),
                other => other,
            })?;
        Ok(uploaded.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_upload() {
        assert!(check_upload("image/png", 1024).is_ok());
        assert!(matches!(check_upload("application/pdf", 10), Err(ApiError::Upload(_))));
        assert!(matches!(check_upload("image/jpeg", MAX_UPLOAD_BYTES + 1), Err(ApiError::Upload(_))));
    }
}
