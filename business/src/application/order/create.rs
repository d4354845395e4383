use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::{NewOrderProps, Order};
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::create::{CreateOrderParams, CreateOrderUseCase};

pub struct CreateOrderUseCaseImpl {
    pub repository: Arc<dyn OrderRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateOrderUseCase for CreateOrderUseCaseImpl {
    async fn execute(&self, params: CreateOrderParams) -> Result<Order, OrderError> {
        self.logger.info(&format!(
            "Creating order for {} (house {}, quantity {})",
            params.account_id, params.house_id, params.quantity
        ));

        let order = Order::new(NewOrderProps {
            account_id: params.account_id,
            house_id: params.house_id,
            color_id: params.color_id,
            size_id: params.size_id,
            quantity: params.quantity,
            total_price: params.total_price,
        })?;

        self.repository.save(&order).await?;

        self.logger.info(&format!("Order created: {}", order.id));
        Ok(order)
    }
}
