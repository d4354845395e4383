use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::get_all::{GetOrdersParams, GetOrdersUseCase};

pub struct GetOrdersUseCaseImpl {
    pub repository: Arc<dyn OrderRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetOrdersUseCase for GetOrdersUseCaseImpl {
    async fn execute(&self, params: GetOrdersParams) -> Result<Vec<Order>, OrderError> {
        self.logger
            .info(&format!("Getting orders of {}", params.account_id));
        let orders = self.repository.get_all(&params.account_id).await?;
        Ok(orders)
    }
}
