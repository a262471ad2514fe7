//! Account Endpoint

use super::{into_data, read_envelope, ApiClient};
use crate::error::ApiResult;
use crate::models::UserAccount;

impl ApiClient {
    pub async fn user_account(&self) -> ApiResult<UserAccount> {
        let resp = self.http().get(self.url("/api/user-account")).send().await?;
        into_data(read_envelope(resp).await?)
    }
}
