//! Settlement history retrieval.
//!
//! History is re-fetched on demand and never stored locally. The settled
//! path is a two-call sequence – the batch list must be inspected before
//! the per-batch transaction list can be requested – with the unsettled
//! list as the fallback when nothing has settled yet.

use tracing::{debug, info};

use mpos_gateway::client::GatewayError;
use mpos_gateway::objects::reporting::TransactionListReply;

use crate::gateway::PaymentGateway;
use crate::money;
use crate::transaction::Transaction;

/// Fetches transaction history and daily totals through the gateway.
pub struct TransactionHistory<G> {
    gateway: G,
}

impl<G: PaymentGateway> TransactionHistory<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// The most recent batch's transactions, falling back to the
    /// unsettled list when nothing has settled yet.
    ///
    /// An application-level error from the batch list means "no settled
    /// batches" and yields an empty list; transport and decode failures
    /// propagate.
    pub async fn history(&self) -> Result<Vec<Transaction>, GatewayError> {
        let batches = match self.gateway.settled_batch_list().await {
            Ok(reply) => reply.batch_list,
            Err(GatewayError::Application { message }) => {
                debug!(reason = %message, "no settled batches reported");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        // Most recent batch first, as returned by the gateway; no
        // client-side re-sorting.
        let Some(batch_id) = batches.into_iter().next().and_then(|b| b.batch_id) else {
            return self.unsettled().await;
        };

        let reply = self.gateway.transaction_list(&batch_id).await?;
        let transactions = collect(reply);
        info!(batch_id = %batch_id, count = transactions.len(), "fetched settled transactions");
        Ok(transactions)
    }

    /// Transactions captured but not yet rolled into a settlement batch.
    pub async fn unsettled(&self) -> Result<Vec<Transaction>, GatewayError> {
        let reply = self.gateway.unsettled_transaction_list().await?;
        Ok(collect(reply))
    }

    /// Minor-unit total over the currently unsettled transactions. The
    /// gateway, not this client, defines the pending set; there is no
    /// date filtering here.
    pub async fn daily_statistics(&self) -> Result<i64, GatewayError> {
        let reply = self.gateway.unsettled_transaction_list().await?;
        Ok(reply
            .transactions
            .iter()
            .filter_map(|t| t.settle_amount)
            .map(money::minor_units)
            .sum())
    }
}

/// Parse reporting rows, dropping the ones without a transaction id.
fn collect(reply: TransactionListReply) -> Vec<Transaction> {
    reply
        .transactions
        .into_iter()
        .filter_map(Transaction::from_summary)
        .collect()
}
