//! Metrics file rendering and export tests.

use sglimits_core::{
    CallFailure, Operation, QuotaInfo, RunResult, SubAccount, SubAccountStats, SubAccountStatus,
    TenantRecord,
};
use sglimits_store::{MetricsExporter, StoreError};
use tempfile::TempDir;

const HEADER: &str =
    "# HELP sendgrid_limits_metric gauge metric\n# TYPE sendgrid_limits_metric gauge\n";

/// Quota failed, one enabled sub-account with no stats this month.
fn acme_quota_failed() -> TenantRecord {
    let mut record = TenantRecord::new("acme");
    record.sub_accounts = vec![SubAccount::new("sub1")];
    record
        .status_by_username
        .insert("sub1".into(), SubAccountStatus::Enabled);
    record
        .stats_by_username
        .insert("sub1".into(), SubAccountStats::zero());
    record
        .failures
        .push(CallFailure::new(Operation::Quota, "HTTP 500"));
    record
}

#[test]
fn test_quota_failure_renders_sentinels() {
    let text = MetricsExporter::render(&RunResult::new(vec![acme_quota_failed()]));

    let expected = format!(
        "{HEADER}\
sendgrid_limits_metric{{project_name=\"acme\", mails=\"Total\"}} -1\n\
sendgrid_limits_metric{{project_name=\"acme\", mails=\"Used\"}} -1\n\
sendgrid_limits_metric{{project_name=\"acme\", subaccount=\"sub1\", metric=\"Status\"}} \"Enabled\"\n\
sendgrid_limits_metric{{project_name=\"acme\", subaccount=\"sub1\", metric=\"Requests\"}} 0\n\
sendgrid_limits_metric{{project_name=\"acme\", subaccount=\"sub1\", metric=\"DeliveredLastMonth\"}} 0\n\
sendgrid_limits_metric{{project_name=\"acme\", subaccount=\"sub1\", metric=\"ReputationPercent\"}} 0.00\n"
    );
    assert_eq!(text, expected);
}

#[test]
fn test_list_failure_renders_quota_lines_only() {
    let mut record = TenantRecord::new("acme");
    record.quota = QuotaInfo::new(1000, 10);
    record
        .failures
        .push(CallFailure::new(Operation::ListSubAccounts, "timeout"));

    let text = MetricsExporter::render(&RunResult::new(vec![record]));
    assert_eq!(text.lines().count(), 4);
    assert!(text.contains("mails=\"Total\"} 1000\n"));
    assert!(text.contains("mails=\"Used\"} 10\n"));
    assert!(!text.contains("subaccount="));
}

#[test]
fn test_missing_status_and_stats() {
    let mut record = TenantRecord::new("globex");
    record.quota = QuotaInfo::new(50, 5);
    record.sub_accounts = vec![SubAccount::new("mailer")];

    let text = MetricsExporter::render(&RunResult::new(vec![record]));
    assert!(text.contains("metric=\"Status\"} \"Unknown\"\n"));
    assert!(text.contains("metric=\"Requests\"} -1\n"));
    assert!(text.contains("metric=\"DeliveredLastMonth\"} -1\n"));
    assert!(text.contains("metric=\"ReputationPercent\"} -1.00\n"));
}

#[test]
fn test_reputation_rounded_to_two_places() {
    let mut record = TenantRecord::new("acme");
    record.quota = QuotaInfo::new(10, 1);
    record.sub_accounts = vec![SubAccount::new("sub1")];
    record.stats_by_username.insert(
        "sub1".into(),
        SubAccountStats {
            delivered: 1,
            requests_this_month: 3,
            used_today: 1,
            delivered_this_month: 2,
            reputation_percent: 200.0 / 3.0,
        },
    );

    let text = MetricsExporter::render(&RunResult::new(vec![record]));
    assert!(text.contains("metric=\"ReputationPercent\"} 66.67\n"));
}

#[test]
fn test_tenants_in_record_order() {
    let a = TenantRecord::new("zeta");
    let b = TenantRecord::new("alpha");
    let text = MetricsExporter::render(&RunResult::new(vec![a, b]));

    let zeta = text.find("zeta").unwrap();
    let alpha = text.find("alpha").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn test_label_values_escaped() {
    let record = TenantRecord::new("Acme \"EU\"");
    let text = MetricsExporter::render(&RunResult::new(vec![record]));
    assert!(text.contains(r#"project_name="Acme \"EU\"""#));
}

#[tokio::test]
async fn test_export_writes_file_idempotently() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("check_sendgrid_limits.prom");
    let exporter = MetricsExporter::new(&path);
    let result = RunResult::new(vec![acme_quota_failed()]);

    exporter.export(&result).await.unwrap();
    let first = std::fs::read_to_string(&path).unwrap();
    exporter.export(&result).await.unwrap();
    let second = std::fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
    assert!(first.ends_with('\n'));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_unwritable_destination_is_export_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();

    let exporter = MetricsExporter::new(blocker.join("out.prom"));
    let err = exporter.export(&RunResult::default()).await.unwrap_err();
    assert!(matches!(err, StoreError::Export { .. }));
}
