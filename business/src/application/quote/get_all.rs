use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::quote::errors::QuoteError;
use crate::domain::quote::gateway::QuoteGateway;
use crate::domain::quote::model::Quote;
use crate::domain::quote::use_cases::get_all::{GetQuotesParams, GetQuotesUseCase};

pub struct GetQuotesUseCaseImpl {
    pub quotes: Arc<dyn QuoteGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetQuotesUseCase for GetQuotesUseCaseImpl {
    async fn execute(&self, params: GetQuotesParams) -> Result<Vec<Quote>, QuoteError> {
        self.logger
            .info(&format!("Getting quotes of {}", params.account_id));
        let quotes = self.quotes.get_by_account(&params.account_id).await?;
        Ok(quotes)
    }
}
