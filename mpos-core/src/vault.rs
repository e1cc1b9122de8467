//! Stored customer (vault) retrieval and client-side search.
//!
//! The vault is server-owned and read-only here: the id list must be
//! fetched before individual profiles can be requested, and profiles are
//! mapped into flat [`VaultCustomer`] records for display and search.

use serde::{Deserialize, Serialize};
use tracing::info;

use mpos_gateway::client::GatewayError;
use mpos_gateway::objects::vault::CustomerProfile;

use crate::gateway::PaymentGateway;

/// A stored customer with one saved payment method, referenced by an
/// opaque profile id instead of raw card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultCustomer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub card: Option<VaultCard>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// The stored card, masked by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultCard {
    pub last_four: String,
    pub card_type: String,
    pub expiration: String,
}

impl VaultCustomer {
    /// Flatten a wire profile. Profiles without an id reference nothing
    /// and are dropped by returning `None`.
    pub fn from_profile(profile: CustomerProfile) -> Option<Self> {
        let id = profile.customer_profile_id?;
        let payment = profile.payment_profiles.into_iter().next();
        let bill_to = payment.as_ref().and_then(|p| p.bill_to.clone());
        let card = payment
            .and_then(|p| p.payment)
            .and_then(|p| p.credit_card)
            .map(|card| VaultCard {
                last_four: last_four(card.card_number.as_deref().unwrap_or_default()),
                card_type: card.card_type.unwrap_or_default(),
                expiration: card.expiration_date.unwrap_or_default(),
            });

        let field = |value: Option<String>| value.unwrap_or_default();
        let bill = bill_to.unwrap_or_default();

        Some(Self {
            id,
            first_name: field(bill.first_name),
            last_name: field(bill.last_name),
            email: field(profile.email),
            phone: field(bill.phone_number),
            company: field(bill.company),
            address: field(bill.address),
            city: field(bill.city),
            state: field(bill.state),
            zip: field(bill.zip),
            country: field(bill.country),
            card,
            created_at: profile.created_date,
            updated_at: profile.updated_date,
        })
    }

    /// Name shown in customer lists: personal name, then company, then
    /// email, then the bare profile id.
    pub fn display_name(&self) -> String {
        let personal = [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if !personal.is_empty() {
            personal
        } else if !self.company.is_empty() {
            self.company.clone()
        } else if !self.email.is_empty() {
            self.email.clone()
        } else {
            self.id.clone()
        }
    }
}

/// Read-only access to the merchant's stored customers.
pub struct CustomerVault<G> {
    gateway: G,
}

impl<G: PaymentGateway> CustomerVault<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Every stored customer: the id list first, then one profile fetch
    /// per id. Profiles the gateway no longer returns, or that lack an
    /// id, are dropped; call failures propagate.
    pub async fn customers(&self) -> Result<Vec<VaultCustomer>, GatewayError> {
        let ids = self.gateway.customer_profile_ids().await?.ids;
        let mut customers = Vec::with_capacity(ids.len());
        for id in ids {
            let reply = self.gateway.customer_profile(&id).await?;
            if let Some(customer) = reply.profile.and_then(VaultCustomer::from_profile) {
                customers.push(customer);
            }
        }
        info!(count = customers.len(), "fetched vault customers");
        Ok(customers)
    }
}

/// Case-insensitive filter over name, email, company, phone, and card
/// last-four. An empty query matches everyone.
pub fn search<'a>(customers: &'a [VaultCustomer], query: &str) -> Vec<&'a VaultCustomer> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return customers.iter().collect();
    }
    customers
        .iter()
        .filter(|customer| {
            customer.first_name.to_lowercase().contains(&query)
                || customer.last_name.to_lowercase().contains(&query)
                || customer.email.to_lowercase().contains(&query)
                || customer.company.to_lowercase().contains(&query)
                || customer.phone.contains(&query)
                || customer
                    .card
                    .as_ref()
                    .is_some_and(|card| card.last_four.contains(&query))
        })
        .collect()
}

/// Last four characters of a masked card number.
fn last_four(masked: &str) -> String {
    let start = masked.len().saturating_sub(4);
    masked.get(start..).unwrap_or(masked).to_owned()
}
