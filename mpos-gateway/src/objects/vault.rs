//! Customer profile (vault) types (`getCustomerProfileIds`,
//! `getCustomerProfile`).

use serde::{Deserialize, Serialize};

use super::GatewayOperation;

/// `getCustomerProfileIdsRequest` – list the ids of every stored customer
/// profile for this merchant.
#[derive(Debug, Clone, Serialize)]
pub struct GetCustomerProfileIds {}

impl GatewayOperation for GetCustomerProfileIds {
    const REQUEST_KEY: &'static str = "getCustomerProfileIdsRequest";
    const RESPONSE_KEY: &'static str = "getCustomerProfileIdsResponse";
    type Reply = CustomerProfileIdsReply;
}

/// `getCustomerProfileRequest` – fetch one stored profile by id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCustomerProfile {
    pub customer_profile_id: String,
}

impl GatewayOperation for GetCustomerProfile {
    const REQUEST_KEY: &'static str = "getCustomerProfileRequest";
    const RESPONSE_KEY: &'static str = "getCustomerProfileResponse";
    type Reply = CustomerProfileReply;
}

/// Decoded `getCustomerProfileIdsResponse` body.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerProfileIdsReply {
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Decoded `getCustomerProfileResponse` body.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerProfileReply {
    pub profile: Option<CustomerProfile>,
}

/// A stored customer profile with its payment profiles.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub customer_profile_id: Option<String>,
    pub merchant_customer_id: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub payment_profiles: Vec<PaymentProfile>,
    pub created_date: Option<String>,
    pub updated_date: Option<String>,
}

/// One stored payment method on a customer profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProfile {
    pub customer_payment_profile_id: Option<String>,
    pub bill_to: Option<ProfileBillTo>,
    pub payment: Option<ProfilePayment>,
}

/// Billing identity attached to a payment profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBillTo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayment {
    pub credit_card: Option<ProfileCreditCard>,
}

/// Stored card details; the number arrives masked (`XXXX1111`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCreditCard {
    pub card_number: Option<String>,
    pub card_type: Option<String>,
    pub expiration_date: Option<String>,
}
