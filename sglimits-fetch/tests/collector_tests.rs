//! Tenant collector tests: failure isolation at every call.

mod common;

use common::{credential, window, FakeProvider};
use sglimits_core::{DailyStat, Operation, QuotaInfo, StatusMode, SubAccountStats, SubAccountStatus};
use sglimits_fetch::{CollectSettings, TenantCollector};
use std::sync::Arc;

fn collector(provider: Arc<FakeProvider>, settings: CollectSettings) -> TenantCollector {
    TenantCollector::new(provider, settings)
}

#[tokio::test]
async fn test_quota_failure_keeps_subaccount_data() {
    let provider = Arc::new(
        FakeProvider::new()
            .sub_accounts("key1", &["sub1"])
            .status("key1", "sub1", SubAccountStatus::Enabled)
            .empty_stats("key1"),
    );

    let record = collector(provider, CollectSettings::default())
        .collect(&credential("acme", "key1"), &window())
        .await;

    assert_eq!(record.name, "acme");
    assert_eq!(record.quota, QuotaInfo::UNAVAILABLE);
    assert_eq!(record.status_of("sub1"), Some(SubAccountStatus::Enabled));
    assert_eq!(record.stats_of("sub1"), SubAccountStats::zero());
    assert_eq!(record.failures.len(), 1);
    assert_eq!(record.failures[0].operation, Operation::Quota);
}

#[tokio::test]
async fn test_list_failure_skips_downstream_calls() {
    let provider = Arc::new(FakeProvider::new().quota("key1", 1000, 10));

    let record = collector(provider.clone(), CollectSettings::default())
        .collect(&credential("acme", "key1"), &window())
        .await;

    assert_eq!(record.quota, QuotaInfo::new(1000, 10));
    assert!(record.sub_accounts.is_empty());
    assert!(record.status_by_username.is_empty());
    assert!(record.stats_by_username.is_empty());
    assert_eq!(provider.calls(), vec!["quota:key1", "list:key1"]);
}

#[tokio::test]
async fn test_one_status_failure_does_not_block_others() {
    let provider = Arc::new(
        FakeProvider::new()
            .quota("key1", 100, 1)
            .sub_accounts("key1", &["a", "b", "c"])
            .status("key1", "a", SubAccountStatus::Enabled)
            .status("key1", "c", SubAccountStatus::Disabled)
            .empty_stats("key1"),
    );

    let record = collector(provider, CollectSettings::default())
        .collect(&credential("acme", "key1"), &window())
        .await;

    assert_eq!(record.status_of("a"), Some(SubAccountStatus::Enabled));
    assert_eq!(record.status_of("b"), None);
    assert_eq!(record.status_of("c"), Some(SubAccountStatus::Disabled));
    assert_eq!(record.failures.len(), 1);
    assert_eq!(record.failures[0].operation, Operation::Status);
    assert_eq!(record.failures[0].subaccount.as_deref(), Some("b"));
    // stats still collected for everyone
    assert_eq!(record.stats_by_username.len(), 3);
}

#[tokio::test]
async fn test_stats_failure_leaves_stats_empty() {
    let provider = Arc::new(
        FakeProvider::new()
            .quota("key1", 100, 1)
            .sub_accounts("key1", &["a"])
            .status("key1", "a", SubAccountStatus::Enabled),
    );

    let record = collector(provider, CollectSettings::default())
        .collect(&credential("acme", "key1"), &window())
        .await;

    assert!(record.stats_by_username.is_empty());
    assert_eq!(record.stats_of("a"), SubAccountStats::UNAVAILABLE);
    assert_eq!(record.status_of("a"), Some(SubAccountStatus::Enabled));
    assert_eq!(record.failures[0].operation, Operation::Stats);
}

#[tokio::test]
async fn test_missing_user_in_stats_gets_zero_stats() {
    let provider = Arc::new(
        FakeProvider::new()
            .quota("key1", 100, 1)
            .sub_accounts("key1", &["busy", "quiet"])
            .status("key1", "busy", SubAccountStatus::Enabled)
            .status("key1", "quiet", SubAccountStatus::Enabled)
            .stats("key1", "busy", vec![DailyStat::new(10, 9, 2), DailyStat::new(10, 10, 0)]),
    );

    let record = collector(provider, CollectSettings::default())
        .collect(&credential("acme", "key1"), &window())
        .await;

    let busy = record.stats_of("busy");
    assert_eq!(busy.requests_this_month, 20);
    assert_eq!(busy.delivered_this_month, 19);
    assert_eq!(busy.used_today, 2);
    assert_eq!(record.stats_of("quiet"), SubAccountStats::zero());
    assert!(record.is_complete());
}

#[tokio::test]
async fn test_heal_mode_writes_enabled_flag() {
    let provider = Arc::new(
        FakeProvider::new()
            .quota("key1", 100, 1)
            .sub_accounts("key1", &["a", "b"])
            .status("key1", "a", SubAccountStatus::Enabled)
            .status("key1", "b", SubAccountStatus::Enabled)
            .empty_stats("key1"),
    );

    collector(provider.clone(), CollectSettings::sequential())
        .collect(&credential("acme", "key1"), &window())
        .await;

    let calls = provider.calls();
    assert!(calls.contains(&"heal:key1:a:false".to_string()));
    assert!(calls.contains(&"heal:key1:b:false".to_string()));
    assert!(!calls.iter().any(|c| c.starts_with("status:")));
    assert!(calls.contains(&"stats:key1:a,b".to_string()));
}

#[tokio::test]
async fn test_read_only_mode_never_writes() {
    let provider = Arc::new(
        FakeProvider::new()
            .quota("key1", 100, 1)
            .sub_accounts("key1", &["a"])
            .status("key1", "a", SubAccountStatus::Disabled)
            .empty_stats("key1"),
    );

    let settings = CollectSettings::default().with_status_mode(StatusMode::ReadOnly);
    let record = collector(provider.clone(), settings)
        .collect(&credential("acme", "key1"), &window())
        .await;

    assert_eq!(record.status_of("a"), Some(SubAccountStatus::Disabled));
    assert!(!provider.calls().iter().any(|c| c.starts_with("heal:")));
}

#[tokio::test]
async fn test_no_subaccounts_skips_stats_call() {
    let provider = Arc::new(
        FakeProvider::new()
            .quota("key1", 100, 1)
            .sub_accounts("key1", &[]),
    );

    let record = collector(provider.clone(), CollectSettings::default())
        .collect(&credential("acme", "key1"), &window())
        .await;

    assert!(record.is_complete());
    assert!(!provider.calls().iter().any(|c| c.starts_with("stats:")));
}
