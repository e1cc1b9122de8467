//! Merchant API credentials and gateway environment selection.

use serde::{Deserialize, Serialize};
use url::Url;

/// Which gateway deployment requests are sent to.
///
/// The environment is part of the credentials and fixed at login; switching
/// it requires a fresh login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    const SANDBOX_URL: &'static str = "https://apitest.authorize.net/xml/v1/request.api";
    const PRODUCTION_URL: &'static str = "https://api.authorize.net/xml/v1/request.api";

    /// The single request endpoint for this environment.
    pub fn endpoint(self) -> Url {
        let raw = match self {
            Environment::Sandbox => Self::SANDBOX_URL,
            Environment::Production => Self::PRODUCTION_URL,
        };
        // Both literals are valid URLs; parsing cannot fail at runtime.
        Url::parse(raw).unwrap_or_else(|_| unreachable!("endpoint literals are valid URLs"))
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Merchant API credentials.
///
/// The transaction key is the shared secret for every request's
/// `merchantAuthentication` block. It is redacted from `Debug` output so it
/// cannot leak through logging.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub api_login_id: String,
    pub transaction_key: String,
    pub environment: Environment,
}

impl Credentials {
    pub fn new(
        api_login_id: impl Into<String>,
        transaction_key: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            api_login_id: api_login_id.into(),
            transaction_key: transaction_key.into(),
            environment,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_login_id", &self.api_login_id)
            .field("transaction_key", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}
