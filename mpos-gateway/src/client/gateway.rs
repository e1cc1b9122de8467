//! The authenticated gateway client.
//!
//! One `POST` endpoint per environment; every request is wrapped in a
//! single-key envelope carrying the `merchantAuthentication` block, and
//! every reply is unwrapped from the matching response envelope after
//! stripping the UTF-8 byte-order mark the gateway prepends.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::GatewayError;
use crate::credentials::Credentials;
use crate::objects::GatewayOperation;
use crate::objects::envelope::{MerchantAuthentication, ReplyStatus};
use crate::objects::merchant::{GetMerchantDetails, MerchantDetailsReply};
use crate::objects::payment::{CreateTransaction, CreateTransactionReply, TransactionRequest};
use crate::objects::reporting::{
    GetSettledBatchList, GetTransactionList, GetUnsettledTransactionList, SettledBatchListReply,
    TransactionListReply,
};
use crate::objects::vault::{
    CustomerProfileIdsReply, CustomerProfileReply, GetCustomerProfile, GetCustomerProfileIds,
};

/// Gateway error codes meaning the credentials were rejected.
const AUTH_ERROR_CODES: [&str; 2] = ["E00006", "E00007"];

/// Shown when the gateway rejects credentials without explaining itself.
const INVALID_CREDENTIALS_TEXT: &str = "Invalid API Login ID or Transaction Key";

/// Fallback when an error reply carries no message text at all.
const GENERIC_ERROR_TEXT: &str = "The gateway reported an error";

/// Default request timeout. The gateway contract specifies none; a finite
/// bound is this client's choice and can be replaced wholesale via
/// [`GatewayClient::with_http_client`].
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed HTTP client for the gateway API.
///
/// Holds the merchant credentials and the environment endpoint they were
/// issued for. There is no built-in retry or backoff: each call either
/// succeeds or returns exactly one [`GatewayError`].
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    endpoint: Url,
    credentials: Credentials,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthenticatedRequest<'a, O: GatewayOperation> {
    merchant_authentication: MerchantAuthentication<'a>,
    #[serde(flatten)]
    operation: &'a O,
}

impl GatewayClient {
    /// Create a client for the environment named in `credentials`.
    pub fn new(credentials: Credentials) -> Self {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            endpoint: credentials.environment.endpoint(),
            credentials,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure a different timeout or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `getMerchantDetails` – fetch the merchant profile; doubles as the
    /// credential check at login.
    pub async fn merchant_details(&self) -> Result<MerchantDetailsReply, GatewayError> {
        self.send(&GetMerchantDetails {}).await
    }

    /// `createTransaction` – submit an auth-and-capture sale.
    pub async fn create_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<CreateTransactionReply, GatewayError> {
        self.send(&CreateTransaction {
            transaction_request: request,
        })
        .await
    }

    /// `getSettledBatchList` – list settlement batches, most recent first.
    pub async fn settled_batch_list(&self) -> Result<SettledBatchListReply, GatewayError> {
        self.send(&GetSettledBatchList {
            include_statistics: false,
        })
        .await
    }

    /// `getTransactionList` – list the transactions of one settled batch.
    pub async fn transaction_list(
        &self,
        batch_id: &str,
    ) -> Result<TransactionListReply, GatewayError> {
        self.send(&GetTransactionList {
            batch_id: batch_id.to_owned(),
        })
        .await
    }

    /// `getUnsettledTransactionList` – list transactions awaiting
    /// settlement.
    pub async fn unsettled_transaction_list(&self) -> Result<TransactionListReply, GatewayError> {
        self.send(&GetUnsettledTransactionList {}).await
    }

    /// `getCustomerProfileIds` – list stored customer profile ids.
    pub async fn customer_profile_ids(&self) -> Result<CustomerProfileIdsReply, GatewayError> {
        self.send(&GetCustomerProfileIds {}).await
    }

    /// `getCustomerProfile` – fetch one stored customer profile.
    pub async fn customer_profile(
        &self,
        profile_id: &str,
    ) -> Result<CustomerProfileReply, GatewayError> {
        self.send(&GetCustomerProfile {
            customer_profile_id: profile_id.to_owned(),
        })
        .await
    }

    /// Send one operation and decode its typed reply.
    pub async fn send<O: GatewayOperation>(&self, operation: &O) -> Result<O::Reply, GatewayError> {
        let body = self.envelope(operation)?;

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::Status { status });
        }

        let bytes = resp.bytes().await?;
        decode_reply::<O>(&bytes)
    }

    fn envelope<O: GatewayOperation>(&self, operation: &O) -> Result<Value, GatewayError> {
        let inner = serde_json::to_value(AuthenticatedRequest {
            merchant_authentication: MerchantAuthentication {
                name: &self.credentials.api_login_id,
                transaction_key: &self.credentials.transaction_key,
            },
            operation,
        })?;
        let mut outer = serde_json::Map::with_capacity(1);
        outer.insert(O::REQUEST_KEY.to_owned(), inner);
        Ok(Value::Object(outer))
    }
}

/// Unwrap the reply envelope and decode the typed body.
fn decode_reply<O: GatewayOperation>(bytes: &[u8]) -> Result<O::Reply, GatewayError> {
    let mut value: Value = serde_json::from_slice(strip_bom(bytes))?;
    let envelope = value
        .get_mut(O::RESPONSE_KEY)
        .map(Value::take)
        .ok_or(GatewayError::MissingEnvelope(O::RESPONSE_KEY))?;
    if let Some(err) = status_error(&envelope) {
        return Err(err);
    }
    Ok(serde_json::from_value(envelope)?)
}

/// Turn an envelope whose status header says `"Error"` into the matching
/// typed error. A malformed or absent header is not an error by itself; the
/// body decode decides.
fn status_error(envelope: &Value) -> Option<GatewayError> {
    let status: ReplyStatus = envelope
        .get("messages")
        .and_then(|m| serde_json::from_value(m.clone()).ok())?;
    if !status.is_error() {
        return None;
    }
    if status
        .first_code()
        .is_some_and(|code| AUTH_ERROR_CODES.contains(&code))
    {
        return Some(GatewayError::Authentication {
            message: status
                .first_text()
                .unwrap_or(INVALID_CREDENTIALS_TEXT)
                .to_owned(),
        });
    }
    Some(GatewayError::Application {
        message: status.first_text().unwrap_or(GENERIC_ERROR_TEXT).to_owned(),
    })
}

/// Strip the 3-byte UTF-8 byte-order mark the gateway prepends to replies.
fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}
