use async_trait::async_trait;

use crate::domain::quote::errors::QuoteError;
use crate::domain::quote::model::Quote;
use crate::domain::shared::value_objects::AccountId;

pub struct GetQuotesParams {
    pub account_id: AccountId,
}

#[async_trait]
pub trait GetQuotesUseCase: Send + Sync {
    async fn execute(&self, params: GetQuotesParams) -> Result<Vec<Quote>, QuoteError>;
}
