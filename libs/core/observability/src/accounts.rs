//! Account provisioning metrics.

use metrics::counter;

pub struct AccountMetrics;

impl AccountMetrics {
    /// `kind` is `"user"` or `"seller"`.
    pub fn record_created(kind: &'static str) {
        counter!("accounts_created_total", "kind" => kind).increment(1);
    }

    /// `reason` is a short label such as `"duplicate_email"` or `"weak_password"`.
    pub fn record_rejected(kind: &'static str, reason: &'static str) {
        counter!("accounts_rejected_total", "kind" => kind, "reason" => reason).increment(1);
    }

    pub fn record_rollback() {
        counter!("accounts_rollbacks_total").increment(1);
    }
}
