//! The cooked merchant profile shown on the dashboard and settings
//! screens, built once per login from the wire reply.

use mpos_gateway::objects::merchant::MerchantDetailsReply;
use serde::{Deserialize, Serialize};

/// Fallback when the gateway supplies no usable merchant name.
const DEFAULT_DISPLAY_NAME: &str = "Merchant";

/// Read-only merchant identity; fetched at login or refresh, never
/// mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantProfile {
    pub display_name: String,
    pub gateway_id: String,
    pub contact: Option<MerchantContact>,
    pub processors: Vec<String>,
}

/// Contact card derived from the gateway's contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantContact {
    /// Joined first/last name, absent when both are empty.
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Street line plus a "city, state, zip" line, newline-separated.
    pub address: Option<String>,
}

impl From<MerchantDetailsReply> for MerchantProfile {
    fn from(reply: MerchantDetailsReply) -> Self {
        let merchant_name = reply
            .merchant_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_owned());

        let company = reply
            .contact_details
            .as_ref()
            .and_then(|c| c.company_name.clone())
            .filter(|company| !company.is_empty());

        let contact = reply.contact_details.map(|details| MerchantContact {
            name: join_nonempty(
                &[details.first_name.as_deref(), details.last_name.as_deref()],
                " ",
            ),
            email: details.email,
            phone: details.phone_number,
            address: formatted_address(
                details.address.as_deref(),
                details.city.as_deref(),
                details.state.as_deref(),
                details.zip.as_deref(),
            ),
        });

        Self {
            display_name: company.unwrap_or(merchant_name),
            gateway_id: reply.gateway_id.unwrap_or_default(),
            contact,
            processors: reply
                .processors
                .into_iter()
                .filter_map(|p| p.name)
                .collect(),
        }
    }
}

fn join_nonempty(parts: &[Option<&str>], separator: &str) -> Option<String> {
    let joined = parts
        .iter()
        .filter_map(|p| *p)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator);
    (!joined.is_empty()).then_some(joined)
}

fn formatted_address(
    street: Option<&str>,
    city: Option<&str>,
    state: Option<&str>,
    zip: Option<&str>,
) -> Option<String> {
    let mut lines = Vec::new();
    if let Some(street) = street.filter(|s| !s.is_empty()) {
        lines.push(street.to_owned());
    }
    if let Some(city_line) = join_nonempty(&[city, state, zip], ", ") {
        lines.push(city_line);
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}
