use crate::domain::model::{AttemptLedger, OverallStatus, ProviderStatus};

/// 由所有 Provider 的狀態歸納出整體結果，規則依序比對，先符合者為準
pub fn summarize(ledger: &AttemptLedger) -> OverallStatus {
    // 空集合上的 all() 恆為 true，必須先排除
    if ledger.is_empty() {
        return OverallStatus::NoProvidersAvailable;
    }

    if ledger.statuses().any(|s| s == ProviderStatus::Success) {
        return OverallStatus::Geocoded;
    }
    if ledger.statuses().all(|s| s == ProviderStatus::ZeroResults) {
        return OverallStatus::ZeroResults;
    }
    if ledger.statuses().all(ProviderStatus::is_permanent_failure) {
        return OverallStatus::PermanentGeocodeError;
    }
    if ledger.statuses().any(ProviderStatus::is_temporary_failure) {
        return OverallStatus::TemporaryGeocodeError;
    }
    OverallStatus::MultipleIssues
}
