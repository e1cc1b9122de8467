//! Merchant-configurable settings gathered during onboarding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency and tax configuration for the signed-in merchant.
///
/// Configured during onboarding, consumed by the sale workflow on every
/// amount change, and cleared on sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MerchantSettings {
    /// ISO currency code used for display formatting only.
    pub currency: String,
    /// Sales tax rate as a percentage (`8.25` means 8.25%).
    pub tax_rate_percent: Decimal,
    pub has_completed_onboarding: bool,
}

impl Default for MerchantSettings {
    fn default() -> Self {
        Self {
            currency: "USD".to_owned(),
            tax_rate_percent: Decimal::ZERO,
            has_completed_onboarding: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_are_usd_untaxed_not_onboarded() {
        let settings = MerchantSettings::default();
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.tax_rate_percent, Decimal::ZERO);
        assert!(!settings.has_completed_onboarding);
    }

    #[test]
    fn serde_round_trip() {
        let settings = MerchantSettings {
            currency: "EUR".to_owned(),
            tax_rate_percent: dec!(8.25),
            has_completed_onboarding: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: MerchantSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: MerchantSettings = serde_json::from_str(r#"{"currency": "GBP"}"#).unwrap();
        assert_eq!(settings.currency, "GBP");
        assert_eq!(settings.tax_rate_percent, Decimal::ZERO);
    }
}
