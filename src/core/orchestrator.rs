use crate::core::summary::summarize;
use crate::domain::model::{
    AttemptLedger, BoundingBox, GeocodeRequest, Location, LookupOutcome, ProviderId,
    ProviderStatus,
};
use crate::domain::ports::{KeyDeriver, ProviderSelector};
use crate::utils::error::{GeocodeError, Result};

/// 依序嘗試 Provider 直到成功或全部用盡
pub struct GeocodeOrchestrator<S: ProviderSelector, K: KeyDeriver> {
    selector: S,
    key_deriver: K,
}

impl<S: ProviderSelector, K: KeyDeriver> GeocodeOrchestrator<S, K> {
    pub fn new(selector: S, key_deriver: K) -> Self {
        Self {
            selector,
            key_deriver,
        }
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }

    pub async fn lookup_address(&self, address: &str) -> Result<LookupOutcome> {
        self.lookup_address_within(address, None).await
    }

    /// 與 `lookup_address` 相同，但附帶範圍提示給 Provider
    pub async fn lookup_address_within(
        &self,
        address: &str,
        bounds_hint: Option<BoundingBox>,
    ) -> Result<LookupOutcome> {
        let request = GeocodeRequest::new(
            address.to_string(),
            self.key_deriver.derive_key(address),
            bounds_hint,
        );

        let mut ledger = AttemptLedger::new();
        let mut geocoded: Option<(ProviderId, Vec<Location>)> = None;

        while geocoded.is_none() {
            let excluded = ledger.attempted();
            let Some(provider) = self.selector.select_next(&excluded).await? else {
                tracing::debug!(
                    key = request.key(),
                    attempts = ledger.len(),
                    "No more providers to try"
                );
                break;
            };

            let provider_id = provider.id().clone();
            if ledger.contains(&provider_id) {
                tracing::error!(
                    provider = %provider_id,
                    "❌ Selector returned a provider that was already attempted"
                );
                return Err(GeocodeError::SelectorContractViolation {
                    provider: provider_id.to_string(),
                });
            }

            tracing::debug!(provider = %provider_id, key = request.key(), "Trying provider");
            let result = provider.geocode(&request).await.inspect_err(|e| {
                tracing::error!(provider = %provider_id, "❌ Provider fault: {}", e);
            })?;

            if result.status == ProviderStatus::Success {
                tracing::info!(
                    provider = %provider_id,
                    candidates = result.candidates.len(),
                    "✅ Address geocoded"
                );
                let locations = result.candidates.into_iter().map(Location::from).collect();
                geocoded = Some((provider_id.clone(), locations));
            } else {
                tracing::warn!(
                    provider = %provider_id,
                    status = ?result.status,
                    "Provider did not geocode address, trying next"
                );
            }

            ledger.record(provider_id, result.status);
        }

        // 成功時也重新歸納，回傳值一律來自 ledger
        let status = summarize(&ledger);
        tracing::debug!(key = request.key(), %status, ledger = ?ledger.entries(), "Lookup finished");

        Ok(match geocoded {
            Some((provider, locations)) => LookupOutcome {
                status,
                provider: Some(provider),
                locations,
            },
            None => LookupOutcome::unresolved(status),
        })
    }
}
