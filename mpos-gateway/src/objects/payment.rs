//! Payment submission types (`createTransaction`).

use serde::{Deserialize, Serialize};

use super::GatewayOperation;

/// `createTransactionRequest` – submit an auth-and-capture sale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransaction {
    pub transaction_request: TransactionRequest,
}

impl GatewayOperation for CreateTransaction {
    const REQUEST_KEY: &'static str = "createTransactionRequest";
    const RESPONSE_KEY: &'static str = "createTransactionResponse";
    type Reply = CreateTransactionReply;
}

/// The `transactionRequest` body of a sale submission.
///
/// All monetary fields are fixed two-decimal strings; the gateway does not
/// accept floating-point literals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub transaction_type: String,
    pub amount: String,
    pub payment: Payment,
    pub tax: Tax,
    pub bill_to: BillTo,
}

impl TransactionRequest {
    /// The only transaction type this system submits.
    pub const AUTH_CAPTURE: &'static str = "authCaptureTransaction";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub credit_card: CreditCard,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub card_number: String,
    /// `MM/YY` as entered by the merchant.
    pub expiration_date: String,
    pub card_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tax {
    pub amount: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillTo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub email: String,
}

/// Decoded `createTransactionResponse` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionReply {
    pub transaction_response: Option<TransactionReply>,
}

/// The per-transaction result inside a submission reply.
///
/// The gateway omits fields freely; only `responseCode` is load-bearing and
/// even that falls back to `"0"` when absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReply {
    pub response_code: Option<String>,
    pub trans_id: Option<String>,
    pub auth_code: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<ReplyMessage>>,
    #[serde(default)]
    pub errors: Option<Vec<ReplyError>>,
}

impl TransactionReply {
    /// The numeric result code; `"1"` means approved.
    pub fn response_code(&self) -> &str {
        self.response_code.as_deref().unwrap_or("0")
    }
}

/// One entry of the transaction-level `messages` list.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyMessage {
    pub code: Option<String>,
    pub description: Option<String>,
}

/// One entry of the transaction-level `errors` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyError {
    pub error_code: Option<String>,
    pub error_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_gateway_field_names() {
        let request = CreateTransaction {
            transaction_request: TransactionRequest {
                transaction_type: TransactionRequest::AUTH_CAPTURE.to_owned(),
                amount: "108.25".to_owned(),
                payment: Payment {
                    credit_card: CreditCard {
                        card_number: "4111111111111111".to_owned(),
                        expiration_date: "12/28".to_owned(),
                        card_code: "123".to_owned(),
                    },
                },
                tax: Tax {
                    amount: "8.25".to_owned(),
                    name: "Sales Tax".to_owned(),
                },
                bill_to: BillTo {
                    first_name: "John".to_owned(),
                    last_name: "Doe".to_owned(),
                    address: "1 Main St".to_owned(),
                    city: "Springfield".to_owned(),
                    state: "CA".to_owned(),
                    zip: "90210".to_owned(),
                    country: "US".to_owned(),
                    email: "john@example.com".to_owned(),
                },
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        let tx = &value["transactionRequest"];
        assert_eq!(tx["transactionType"], "authCaptureTransaction");
        assert_eq!(tx["amount"], "108.25");
        assert_eq!(tx["payment"]["creditCard"]["cardCode"], "123");
        assert_eq!(tx["billTo"]["firstName"], "John");
        assert_eq!(tx["tax"]["amount"], "8.25");
    }

    #[test]
    fn reply_decodes_with_missing_fields() {
        let reply: TransactionReply =
            serde_json::from_str(r#"{"transId":"123"}"#).unwrap();
        assert_eq!(reply.response_code(), "0");
        assert_eq!(reply.trans_id.as_deref(), Some("123"));
        assert!(reply.messages.is_none());
        assert!(reply.errors.is_none());
    }

    #[test]
    fn reply_decodes_both_message_lists() {
        let reply: TransactionReply = serde_json::from_str(
            r#"{
                "responseCode": "2",
                "messages": [{"code": "2", "description": "This transaction has been declined."}],
                "errors": [{"errorCode": "2", "errorText": "This transaction has been declined."}]
            }"#,
        )
        .unwrap();
        assert_eq!(reply.response_code(), "2");
        assert_eq!(reply.messages.as_ref().unwrap().len(), 1);
        assert_eq!(reply.errors.as_ref().unwrap().len(), 1);
    }
}
