use async_trait::async_trait;
use reqwest::StatusCode;

use business::domain::cart::gateway::CartGateway;
use business::domain::cart::model::{CartLine, CartLineId};
use business::domain::errors::GatewayError;
use business::domain::shared::value_objects::AccountId;

use crate::client::ApiClient;
use crate::dto::{AddCartItemBody, CartItemRow, UpdateQuantityBody, into_lines};

/// `CartGateway` over the storefront REST API.
pub struct CartGatewayHttp {
    client: ApiClient,
}

impl CartGatewayHttp {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CartGateway for CartGatewayHttp {
    async fn get_by_account(&self, account_id: &AccountId) -> Result<Vec<CartLine>, GatewayError> {
        let request = self
            .client
            .client
            .get(self.client.url("/cart-items"))
            .header("Authorization", self.client.auth_header(account_id)?);

        let response = self.client.send(request).await?;
        let rows: Vec<CartItemRow> = self.client.read_json(response).await?;
        into_lines(rows)
    }

    async fn add(&self, account_id: &AccountId, line: &CartLine) -> Result<CartLine, GatewayError> {
        let request = self
            .client
            .client
            .post(self.client.url("/cart-items"))
            .header("Authorization", self.client.auth_header(account_id)?)
            .json(&AddCartItemBody::from(line));

        let response = self.client.send(request).await?;
        let row: CartItemRow = self.client.read_json(response).await?;
        CartLine::try_from(row)
    }

    async fn update_quantity(
        &self,
        account_id: &AccountId,
        id: &CartLineId,
        quantity: i32,
    ) -> Result<Option<CartLine>, GatewayError> {
        let request = self
            .client
            .client
            .put(self.client.url(&format!("/cart-items/{}", id)))
            .header("Authorization", self.client.auth_header(account_id)?)
            .json(&UpdateQuantityBody { quantity });

        let response = self.client.send(request).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let row: CartItemRow = self.client.read_json(response).await?;
        CartLine::try_from(row).map(Some)
    }

    async fn delete(&self, account_id: &AccountId, id: &CartLineId) -> Result<(), GatewayError> {
        let request = self
            .client
            .client
            .delete(self.client.url(&format!("/cart-items/{}", id)))
            .header("Authorization", self.client.auth_header(account_id)?);

        self.client.send(request).await?;
        Ok(())
    }

    async fn delete_all_for_account(&self, account_id: &AccountId) -> Result<(), GatewayError> {
        let request = self
            .client
            .client
            .delete(self.client.url("/cart-items"))
            .header("Authorization", self.client.auth_header(account_id)?);

        self.client.send(request).await?;
        Ok(())
    }
}
