use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::quote::errors::QuoteError;
use crate::domain::quote::model::{Customization, Quote};
use crate::domain::shared::value_objects::AccountId;

pub struct RequestQuoteParams {
    pub account_id: AccountId,
    pub house_id: Uuid,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub customizations: Vec<Customization>,
    pub message: Option<String>,
}

#[async_trait]
pub trait RequestQuoteUseCase: Send + Sync {
    async fn execute(&self, params: RequestQuoteParams) -> Result<Quote, QuoteError>;
}
