//! Session state: credentials, merchant profile, settings, and the
//! app-lock flag.

mod secret_store;
mod settings;

pub use secret_store::{MemoryStore, SecretStore};
pub use settings::MerchantSettings;

use mpos_gateway::Credentials;
use mpos_gateway::client::GatewayError;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::gateway::PaymentGateway;
use crate::merchant::MerchantProfile;

const CREDENTIALS_KEY: &str = "merchant_credentials";
const SETTINGS_KEY: &str = "merchant_settings";

/// The single mutable shared resource of the application.
///
/// All mutation funnels through one `RwLock`, so exactly one writer
/// updates credentials or lock state at a time. Credentials and settings
/// are persisted as JSON through the injected [`SecretStore`]; the
/// merchant profile is session-only and re-fetched at login.
pub struct SessionStore<S: SecretStore> {
    store: S,
    state: RwLock<SessionState>,
}

#[derive(Default)]
struct SessionState {
    credentials: Option<Credentials>,
    profile: Option<MerchantProfile>,
    settings: MerchantSettings,
    locked: bool,
}

impl<S: SecretStore> SessionStore<S> {
    /// Fresh, unauthenticated session.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Re-hydrate a session from persisted credentials and settings.
    /// Malformed persisted values are discarded, not errors.
    pub fn restore(store: S) -> Self {
        let credentials = store
            .get(CREDENTIALS_KEY)
            .and_then(|json| serde_json::from_str(&json).ok());
        let settings: MerchantSettings = store
            .get(SETTINGS_KEY)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self {
            store,
            state: RwLock::new(SessionState {
                credentials,
                settings,
                ..SessionState::default()
            }),
        }
    }

    /// Store and persist the credentials for this login. The environment
    /// is part of the credentials and fixed until the next login.
    pub async fn login(&self, credentials: Credentials) {
        info!(environment = %credentials.environment, "merchant signed in");
        match serde_json::to_string(&credentials) {
            Ok(json) => self.store.set(CREDENTIALS_KEY, &json),
            Err(err) => warn!(error = %err, "could not persist credentials"),
        }
        let mut state = self.state.write().await;
        state.credentials = Some(credentials);
        state.locked = false;
    }

    pub async fn current_credentials(&self) -> Option<Credentials> {
        self.state.read().await.credentials.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.credentials.is_some()
    }

    /// Clear everything and return to the initial unauthenticated state:
    /// credentials, profile, and settings, in memory and in the store.
    pub async fn sign_out(&self) {
        info!("merchant signed out");
        self.store.remove(CREDENTIALS_KEY);
        self.store.remove(SETTINGS_KEY);
        let mut state = self.state.write().await;
        *state = SessionState::default();
    }

    /// Block authenticated screens until [`unlock`](Self::unlock).
    /// Credentials are kept.
    pub async fn lock(&self) {
        debug!("session locked");
        self.state.write().await.locked = true;
    }

    pub async fn unlock(&self) {
        debug!("session unlocked");
        self.state.write().await.locked = false;
    }

    pub async fn is_locked(&self) -> bool {
        self.state.read().await.locked
    }

    pub async fn merchant_profile(&self) -> Option<MerchantProfile> {
        self.state.read().await.profile.clone()
    }

    /// Set the profile fetched at login or refresh.
    pub async fn set_merchant_profile(&self, profile: MerchantProfile) {
        self.state.write().await.profile = Some(profile);
    }

    pub async fn settings(&self) -> MerchantSettings {
        self.state.read().await.settings.clone()
    }

    /// Replace and persist the settings.
    pub async fn update_settings(&self, settings: MerchantSettings) {
        match serde_json::to_string(&settings) {
            Ok(json) => self.store.set(SETTINGS_KEY, &json),
            Err(err) => warn!(error = %err, "could not persist settings"),
        }
        self.state.write().await.settings = settings;
    }
}

/// Authenticate and open a session.
///
/// Fetching the merchant profile doubles as the credential check; only on
/// success are the credentials stored and the profile cached. `gateway`
/// must be a client built from the same credentials. On failure the
/// session is left untouched.
pub async fn sign_in<G, S>(
    gateway: &G,
    session: &SessionStore<S>,
    credentials: Credentials,
) -> Result<MerchantProfile, GatewayError>
where
    G: PaymentGateway,
    S: SecretStore,
{
    let profile = MerchantProfile::from(gateway.merchant_details().await?);
    session.login(credentials).await;
    session.set_merchant_profile(profile.clone()).await;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpos_gateway::Environment;
    use rust_decimal_macros::dec;

    fn credentials() -> Credentials {
        Credentials::new("login", "key", Environment::Sandbox)
    }

    #[tokio::test]
    async fn login_stores_and_persists_credentials() {
        let session = SessionStore::new(MemoryStore::new());
        session.login(credentials()).await;

        assert!(session.is_authenticated().await);
        assert_eq!(
            session.current_credentials().await.map(|c| c.api_login_id),
            Some("login".to_owned())
        );
    }

    #[tokio::test]
    async fn sign_out_clears_state_and_store() {
        let session = SessionStore::new(MemoryStore::new());
        session.login(credentials()).await;
        session
            .update_settings(MerchantSettings {
                currency: "EUR".to_owned(),
                tax_rate_percent: dec!(19),
                has_completed_onboarding: true,
            })
            .await;

        session.sign_out().await;

        assert!(!session.is_authenticated().await);
        assert_eq!(session.settings().await, MerchantSettings::default());
        assert!(session.store.get(CREDENTIALS_KEY).is_none());
        assert!(session.store.get(SETTINGS_KEY).is_none());
    }

    #[tokio::test]
    async fn lock_keeps_credentials() {
        let session = SessionStore::new(MemoryStore::new());
        session.login(credentials()).await;

        session.lock().await;
        assert!(session.is_locked().await);
        assert!(session.is_authenticated().await);

        session.unlock().await;
        assert!(!session.is_locked().await);
    }

    #[tokio::test]
    async fn restore_rehydrates_persisted_state() {
        let store = MemoryStore::new();
        {
            let session = SessionStore::new(store);
            session.login(credentials()).await;
            session
                .update_settings(MerchantSettings {
                    currency: "GBP".to_owned(),
                    tax_rate_percent: dec!(20),
                    has_completed_onboarding: true,
                })
                .await;

            // hand the backing store to a fresh session
            let restored = SessionStore::restore(session.store);
            assert!(restored.is_authenticated().await);
            assert_eq!(restored.settings().await.currency, "GBP");
            assert!(!restored.is_locked().await);
        }
    }

    #[tokio::test]
    async fn restore_discards_malformed_values() {
        let store = MemoryStore::new();
        store.set(CREDENTIALS_KEY, "not json");
        store.set(SETTINGS_KEY, "also not json");

        let session = SessionStore::restore(store);
        assert!(!session.is_authenticated().await);
        assert_eq!(session.settings().await, MerchantSettings::default());
    }

    use async_trait::async_trait;
    use mpos_gateway::objects::merchant::MerchantDetailsReply;
    use mpos_gateway::objects::payment::{CreateTransactionReply, TransactionRequest};
    use mpos_gateway::objects::reporting::{SettledBatchListReply, TransactionListReply};
    use mpos_gateway::objects::vault::{CustomerProfileIdsReply, CustomerProfileReply};

    /// Only `merchant_details` answers; the login path calls nothing else.
    struct LoginGateway {
        reply: Result<&'static str, &'static str>,
    }

    #[async_trait]
    impl PaymentGateway for LoginGateway {
        async fn merchant_details(&self) -> Result<MerchantDetailsReply, GatewayError> {
            match self.reply {
                Ok(json) => Ok(serde_json::from_str(json).unwrap()),
                Err(message) => Err(GatewayError::Authentication {
                    message: message.to_owned(),
                }),
            }
        }

        async fn create_transaction(
            &self,
            _request: TransactionRequest,
        ) -> Result<CreateTransactionReply, GatewayError> {
            unimplemented!()
        }

        async fn settled_batch_list(&self) -> Result<SettledBatchListReply, GatewayError> {
            unimplemented!()
        }

        async fn transaction_list(
            &self,
            _batch_id: &str,
        ) -> Result<TransactionListReply, GatewayError> {
            unimplemented!()
        }

        async fn unsettled_transaction_list(&self) -> Result<TransactionListReply, GatewayError> {
            unimplemented!()
        }

        async fn customer_profile_ids(&self) -> Result<CustomerProfileIdsReply, GatewayError> {
            unimplemented!()
        }

        async fn customer_profile(
            &self,
            _profile_id: &str,
        ) -> Result<CustomerProfileReply, GatewayError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn sign_in_stores_credentials_and_profile() {
        let gateway = LoginGateway {
            reply: Ok(r#"{"merchantName": "Acme", "gatewayId": "42"}"#),
        };
        let session = SessionStore::new(MemoryStore::new());

        let profile = sign_in(&gateway, &session, credentials()).await.unwrap();
        assert_eq!(profile.display_name, "Acme");
        assert!(session.is_authenticated().await);
        assert_eq!(
            session.merchant_profile().await.map(|p| p.gateway_id),
            Some("42".to_owned())
        );
    }

    #[tokio::test]
    async fn rejected_credentials_leave_the_session_untouched() {
        let gateway = LoginGateway {
            reply: Err("User authentication failed."),
        };
        let session = SessionStore::new(MemoryStore::new());

        let err = sign_in(&gateway, &session, credentials()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Authentication { .. }));
        assert!(!session.is_authenticated().await);
        assert!(session.merchant_profile().await.is_none());
    }
}
