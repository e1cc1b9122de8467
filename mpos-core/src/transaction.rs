//! Historical transaction records parsed from reporting replies.

use mpos_gateway::objects::reporting::TransactionSummary;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

use crate::money;

/// Shown when a record carries no customer name at all.
const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

/// One settled or pending transaction as reported by the gateway.
///
/// Produced only by parsing gateway replies; never mutated locally and
/// never persisted – history is re-fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    /// ISO-8601 submission time as reported, UTC.
    pub submitted_at_utc: String,
    /// The gateway's local-time rendering of the same instant.
    pub submitted_at_local: String,
    pub status: String,
    pub account_type: Option<String>,
    /// Last four digits of the masked account number.
    pub account_last_four: Option<String>,
    pub settle_amount_minor: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Transaction {
    /// Build from a reporting row. Rows without a transaction id carry
    /// nothing actionable and are dropped by returning `None`.
    pub fn from_summary(summary: TransactionSummary) -> Option<Self> {
        let transaction_id = summary.trans_id?;
        Some(Self {
            transaction_id,
            submitted_at_utc: summary.submit_time_utc.unwrap_or_default(),
            submitted_at_local: summary.submit_time_local.unwrap_or_default(),
            status: summary
                .transaction_status
                .unwrap_or_else(|| "unknown".to_owned()),
            account_type: summary.account_type,
            account_last_four: summary.account_number.as_deref().map(last_four),
            settle_amount_minor: summary.settle_amount.map(money::minor_units).unwrap_or(0),
            first_name: summary.first_name,
            last_name: summary.last_name,
        })
    }

    /// Joined customer name, or a placeholder when the record has none.
    pub fn customer_name(&self) -> String {
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            UNKNOWN_CUSTOMER.to_owned()
        } else {
            joined
        }
    }

    /// The parsed UTC submission instant, if the gateway's timestamp is
    /// well-formed ISO-8601.
    pub fn submitted_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.submitted_at_utc, &Iso8601::DEFAULT).ok()
    }
}

/// Last four characters of a masked account number (`XXXX1111` → `1111`).
fn last_four(masked: &str) -> String {
    let start = masked.len().saturating_sub(4);
    masked.get(start..).unwrap_or(masked).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(json: &str) -> TransactionSummary {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn builds_from_full_summary() {
        let tx = Transaction::from_summary(summary(
            r#"{
                "transId": "60123",
                "submitTimeUTC": "2024-05-01T16:30:41Z",
                "submitTimeLocal": "2024-05-01T09:30:41",
                "transactionStatus": "settledSuccessfully",
                "accountType": "Visa",
                "accountNumber": "XXXX1111",
                "settleAmount": 108.25,
                "firstName": "John",
                "lastName": "Doe"
            }"#,
        ))
        .unwrap();
        assert_eq!(tx.transaction_id, "60123");
        assert_eq!(tx.settle_amount_minor, 10_825);
        assert_eq!(tx.account_last_four.as_deref(), Some("1111"));
        assert_eq!(tx.customer_name(), "John Doe");
        assert!(tx.submitted_at().is_some());
    }

    #[test]
    fn row_without_id_is_dropped() {
        assert!(Transaction::from_summary(summary(r#"{"settleAmount": 5.0}"#)).is_none());
    }

    #[test]
    fn missing_optionals_get_defaults() {
        let tx = Transaction::from_summary(summary(r#"{"transId": "1"}"#)).unwrap();
        assert_eq!(tx.status, "unknown");
        assert_eq!(tx.settle_amount_minor, 0);
        assert_eq!(tx.customer_name(), "Unknown Customer");
        assert!(tx.submitted_at().is_none());
    }

    #[test]
    fn partial_name_still_renders() {
        let tx = Transaction::from_summary(summary(r#"{"transId": "1", "firstName": "Jo"}"#))
            .unwrap();
        assert_eq!(tx.customer_name(), "Jo");
    }
}
