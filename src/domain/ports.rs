use crate::domain::model::{GeocodeRequest, ProviderId, ProviderResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// 地理編碼服務的共同介面
///
/// 一般的「找不到」或「被拒絕」都以 `ProviderResult::status` 回報；
/// `Err` 只用於無法產生任何狀態的基礎設施錯誤。
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    fn id(&self) -> &ProviderId;

    async fn geocode(&self, request: &GeocodeRequest) -> Result<ProviderResult>;
}

/// 決定下一個要嘗試的 Provider
pub trait ProviderSelector: Send + Sync {
    /// 不得回傳 `excluded` 中已存在的 Provider；沒有可用的 Provider 時回傳 `None`
    fn select_next(
        &self,
        excluded: &HashSet<ProviderId>,
    ) -> impl std::future::Future<Output = Result<Option<Arc<dyn GeocodeProvider>>>> + Send;
}

pub trait KeyDeriver: Send + Sync {
    fn derive_key(&self, address: &str) -> String;
}
