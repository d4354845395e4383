use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::catalog::use_cases::configure::{ConfigureHouseParams, ConfigureHouseUseCase};
use crate::domain::logger::Logger;
use crate::domain::quote::errors::QuoteError;
use crate::domain::quote::gateway::QuoteGateway;
use crate::domain::quote::model::{NewQuote, Quote};
use crate::domain::quote::use_cases::request::{RequestQuoteParams, RequestQuoteUseCase};

pub struct RequestQuoteUseCaseImpl {
    pub configure: Arc<dyn ConfigureHouseUseCase>,
    pub quotes: Arc<dyn QuoteGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RequestQuoteUseCase for RequestQuoteUseCaseImpl {
    async fn execute(&self, params: RequestQuoteParams) -> Result<Quote, QuoteError> {
        let configuration = self
            .configure
            .execute(ConfigureHouseParams {
                house_id: params.house_id,
                color_id: params.color_id,
                size_id: params.size_id,
            })
            .await?;

        let quote = NewQuote::new(
            params.account_id,
            &configuration,
            params.customizations,
            params.message,
        );
        let quote = self.quotes.submit(&quote).await.map_err(|e| {
            self.logger
                .error(&format!("Quote for {} not submitted: {}", configuration.house.name, e));
            e
        })?;

        self.logger.info(&format!(
            "Quote {} requested for {} by {}",
            quote.id, configuration.house.name, quote.account_id
        ));
        Ok(quote)
    }
}
