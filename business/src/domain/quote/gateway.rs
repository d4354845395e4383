use async_trait::async_trait;

use crate::domain::errors::GatewayError;
use crate::domain::shared::value_objects::AccountId;

use super::model::{NewQuote, Quote};

/// Remote quote table, as seen by the client.
#[async_trait]
pub trait QuoteGateway: Send + Sync {
    /// Inserts the request on behalf of `quote.account_id`.
    async fn submit(&self, quote: &NewQuote) -> Result<Quote, GatewayError>;

    /// Newest first.
    async fn get_by_account(&self, account_id: &AccountId) -> Result<Vec<Quote>, GatewayError>;
}
