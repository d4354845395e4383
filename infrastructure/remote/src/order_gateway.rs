use async_trait::async_trait;

use business::domain::cart::gateway::OrderGateway;
use business::domain::cart::model::CartLine;
use business::domain::errors::GatewayError;
use business::domain::order::model::Order;
use business::domain::shared::value_objects::AccountId;

use crate::client::ApiClient;
use crate::dto::{CreateOrderBody, OrderRow, into_orders};

/// `OrderGateway` over the storefront REST API.
pub struct OrderGatewayHttp {
    client: ApiClient,
}

impl OrderGatewayHttp {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderGateway for OrderGatewayHttp {
    async fn create_order(
        &self,
        account_id: &AccountId,
        line: &CartLine,
    ) -> Result<Order, GatewayError> {
        let request = self
            .client
            .client
            .post(self.client.url("/orders"))
            .header("Authorization", self.client.auth_header(account_id)?)
            .json(&CreateOrderBody::from(line));

        let response = self.client.send(request).await?;
        let row: OrderRow = self.client.read_json(response).await?;
        Order::try_from(row)
    }

    async fn get_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, GatewayError> {
        let request = self
            .client
            .client
            .get(self.client.url("/orders"))
            .header("Authorization", self.client.auth_header(account_id)?);

        let response = self.client.send(request).await?;
        let rows: Vec<OrderRow> = self.client.read_json(response).await?;
        into_orders(rows)
    }
}
