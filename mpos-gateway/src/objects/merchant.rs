//! Merchant detail types (`getMerchantDetails`).

use serde::{Deserialize, Serialize};

use super::GatewayOperation;

/// `getMerchantDetailsRequest` – no operation-specific fields; the
/// authentication block alone identifies the merchant. Also serves as the
/// credential check at login.
#[derive(Debug, Clone, Serialize)]
pub struct GetMerchantDetails {}

impl GatewayOperation for GetMerchantDetails {
    const REQUEST_KEY: &'static str = "getMerchantDetailsRequest";
    const RESPONSE_KEY: &'static str = "getMerchantDetailsResponse";
    type Reply = MerchantDetailsReply;
}

/// Decoded `getMerchantDetailsResponse` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantDetailsReply {
    pub merchant_name: Option<String>,
    pub gateway_id: Option<String>,
    pub contact_details: Option<ContactDetails>,
    #[serde(default)]
    pub processors: Vec<Processor>,
}

/// The merchant's contact record; every field may be absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
}

/// One entry of the `processors` list.
#[derive(Debug, Clone, Deserialize)]
pub struct Processor {
    pub name: Option<String>,
}
