use async_trait::async_trait;

use business::domain::errors::GatewayError;
use business::domain::quote::gateway::QuoteGateway;
use business::domain::quote::model::{NewQuote, Quote};
use business::domain::shared::value_objects::AccountId;

use crate::client::{ApiClient, postgrest_url};
use crate::credentials::Credentials;
use crate::dto::{NewQuoteBody, QuoteRow, into_quotes};

/// `QuoteGateway` over the Supabase REST interface, acting as the signed-in
/// account so row-level security scopes every row to it.
pub struct QuoteGatewaySupabase {
    client: ApiClient,
    anon_key: String,
}

impl QuoteGatewaySupabase {
    pub fn new(supabase_url: &str, anon_key: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            client: ApiClient::new(postgrest_url(supabase_url), credentials),
            anon_key: anon_key.into(),
        }
    }
}

#[async_trait]
impl QuoteGateway for QuoteGatewaySupabase {
    async fn submit(&self, quote: &NewQuote) -> Result<Quote, GatewayError> {
        let request = self
            .client
            .client
            .post(self.client.url("/quotes"))
            .header("apikey", &self.anon_key)
            .header("Authorization", self.client.auth_header(&quote.account_id)?)
            .header("Prefer", "return=representation")
            .json(&[NewQuoteBody::from(quote)]);

        let response = self.client.send(request).await?;
        let rows: Vec<QuoteRow> = self.client.read_json(response).await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::MalformedRow("quote insert returned no row".to_string()))?;
        Quote::try_from(row)
    }

    async fn get_by_account(&self, account_id: &AccountId) -> Result<Vec<Quote>, GatewayError> {
        let request = self
            .client
            .client
            .get(self.client.url(&format!(
                "/quotes?select=*&user_id=eq.{}&order=created_at.desc",
                account_id
            )))
            .header("apikey", &self.anon_key)
            .header("Authorization", self.client.auth_header(account_id)?);

        let response = self.client.send(request).await?;
        let rows: Vec<QuoteRow> = self.client.read_json(response).await?;
        into_quotes(rows)
    }
}
