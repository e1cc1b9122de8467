//! The narrow seam between core components and the HTTP client.
//!
//! Core components (sale workflow, history, vault) consume the gateway
//! through this trait so tests can substitute canned replies without a
//! network.

use async_trait::async_trait;
use mpos_gateway::client::{GatewayClient, GatewayError};
use mpos_gateway::objects::merchant::MerchantDetailsReply;
use mpos_gateway::objects::payment::{CreateTransactionReply, TransactionRequest};
use mpos_gateway::objects::reporting::{SettledBatchListReply, TransactionListReply};
use mpos_gateway::objects::vault::{CustomerProfileIdsReply, CustomerProfileReply};

/// The gateway operations core components depend on.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn merchant_details(&self) -> Result<MerchantDetailsReply, GatewayError>;

    async fn create_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<CreateTransactionReply, GatewayError>;

    async fn settled_batch_list(&self) -> Result<SettledBatchListReply, GatewayError>;

    async fn transaction_list(&self, batch_id: &str)
    -> Result<TransactionListReply, GatewayError>;

    async fn unsettled_transaction_list(&self) -> Result<TransactionListReply, GatewayError>;

    async fn customer_profile_ids(&self) -> Result<CustomerProfileIdsReply, GatewayError>;

    async fn customer_profile(
        &self,
        profile_id: &str,
    ) -> Result<CustomerProfileReply, GatewayError>;
}

#[async_trait]
impl PaymentGateway for GatewayClient {
    async fn merchant_details(&self) -> Result<MerchantDetailsReply, GatewayError> {
        GatewayClient::merchant_details(self).await
    }

    async fn create_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<CreateTransactionReply, GatewayError> {
        GatewayClient::create_transaction(self, request).await
    }

    async fn settled_batch_list(&self) -> Result<SettledBatchListReply, GatewayError> {
        GatewayClient::settled_batch_list(self).await
    }

    async fn transaction_list(
        &self,
        batch_id: &str,
    ) -> Result<TransactionListReply, GatewayError> {
        GatewayClient::transaction_list(self, batch_id).await
    }

    async fn unsettled_transaction_list(&self) -> Result<TransactionListReply, GatewayError> {
        GatewayClient::unsettled_transaction_list(self).await
    }

    async fn customer_profile_ids(&self) -> Result<CustomerProfileIdsReply, GatewayError> {
        GatewayClient::customer_profile_ids(self).await
    }

    async fn customer_profile(
        &self,
        profile_id: &str,
    ) -> Result<CustomerProfileReply, GatewayError> {
        GatewayClient::customer_profile(self, profile_id).await
    }
}
