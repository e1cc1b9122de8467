//! Settlement reporting types (`getSettledBatchList`, `getTransactionList`,
//! `getUnsettledTransactionList`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::GatewayOperation;

/// `getSettledBatchListRequest` – list closed settlement batches.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSettledBatchList {
    pub include_statistics: bool,
}

impl GatewayOperation for GetSettledBatchList {
    const REQUEST_KEY: &'static str = "getSettledBatchListRequest";
    const RESPONSE_KEY: &'static str = "getSettledBatchListResponse";
    type Reply = SettledBatchListReply;
}

/// `getTransactionListRequest` – list the transactions of one batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionList {
    pub batch_id: String,
}

impl GatewayOperation for GetTransactionList {
    const REQUEST_KEY: &'static str = "getTransactionListRequest";
    const RESPONSE_KEY: &'static str = "getTransactionListResponse";
    type Reply = TransactionListReply;
}

/// `getUnsettledTransactionListRequest` – list transactions not yet rolled
/// into a settlement batch.
#[derive(Debug, Clone, Serialize)]
pub struct GetUnsettledTransactionList {}

impl GatewayOperation for GetUnsettledTransactionList {
    const REQUEST_KEY: &'static str = "getUnsettledTransactionListRequest";
    const RESPONSE_KEY: &'static str = "getUnsettledTransactionListResponse";
    type Reply = TransactionListReply;
}

/// Decoded `getSettledBatchListResponse` body.
///
/// The gateway returns batches most recent first; callers rely on that
/// order and must not re-sort.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettledBatchListReply {
    #[serde(default)]
    pub batch_list: Vec<Batch>,
}

/// One settlement batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub batch_id: Option<String>,
    #[serde(rename = "settlementTimeUTC")]
    pub settlement_time_utc: Option<String>,
    pub settlement_state: Option<String>,
}

/// Decoded body shared by `getTransactionListResponse` and
/// `getUnsettledTransactionListResponse`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionListReply {
    #[serde(default)]
    pub transactions: Vec<TransactionSummary>,
}

/// One transaction row from a reporting reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub trans_id: Option<String>,
    #[serde(rename = "submitTimeUTC")]
    pub submit_time_utc: Option<String>,
    pub submit_time_local: Option<String>,
    pub transaction_status: Option<String>,
    pub account_type: Option<String>,
    /// Masked, e.g. `XXXX1111`.
    pub account_number: Option<String>,
    pub settle_amount: Option<Decimal>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decodes_batch_list() {
        let reply: SettledBatchListReply = serde_json::from_str(
            r#"{"batchList": [
                {"batchId": "12345", "settlementTimeUTC": "2024-05-01T03:10:00Z", "settlementState": "settledSuccessfully"},
                {"batchId": "12340"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(reply.batch_list.len(), 2);
        assert_eq!(reply.batch_list[0].batch_id.as_deref(), Some("12345"));
    }

    #[test]
    fn empty_batch_list_decodes_as_empty() {
        let reply: SettledBatchListReply = serde_json::from_str("{}").unwrap();
        assert!(reply.batch_list.is_empty());
    }

    #[test]
    fn decodes_transaction_summary_with_numeric_amount() {
        let reply: TransactionListReply = serde_json::from_str(
            r#"{"transactions": [{
                "transId": "60123",
                "submitTimeUTC": "2024-05-01T16:30:41Z",
                "submitTimeLocal": "2024-05-01T09:30:41",
                "transactionStatus": "settledSuccessfully",
                "accountType": "Visa",
                "accountNumber": "XXXX1111",
                "settleAmount": 108.25,
                "firstName": "John",
                "lastName": "Doe"
            }]}"#,
        )
        .unwrap();
        let tx = &reply.transactions[0];
        assert_eq!(tx.trans_id.as_deref(), Some("60123"));
        assert_eq!(tx.settle_amount, Some(dec!(108.25)));
        assert_eq!(tx.account_number.as_deref(), Some("XXXX1111"));
    }

    #[test]
    fn summary_without_id_still_decodes() {
        let reply: TransactionListReply =
            serde_json::from_str(r#"{"transactions": [{"settleAmount": 5.00}]}"#).unwrap();
        assert!(reply.transactions[0].trans_id.is_none());
    }
}
