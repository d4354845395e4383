use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::errors::RepositoryError;
use business::domain::order::model::Order;
use business::domain::order::repository::OrderRepository;
use business::domain::shared::value_objects::AccountId;

use super::entity::OrderEntity;

pub struct OrderRepositoryPostgres {
    pool: PgPool,
}

impl OrderRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryPostgres {
    async fn get_all(&self, account_id: &AccountId) -> Result<Vec<Order>, RepositoryError> {
        let entities = sqlx::query_as::<_, OrderEntity>(
            "SELECT id, account_id, house_id, color_id, size_id, quantity, total_price, status, created_at, updated_at FROM orders WHERE account_id = $1 ORDER BY created_at DESC",
        )
        .bind(account_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        entities
            .into_iter()
            .map(OrderEntity::try_into_domain)
            .collect()
    }

    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO orders (id, account_id, house_id, color_id, size_id, quantity, total_price, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at"#,
        )
        .bind(order.id)
        .bind(order.account_id.as_str())
        .bind(order.house_id)
        .bind(order.color_id)
        .bind(order.size_id)
        .bind(order.quantity)
        .bind(order.total_price)
        .bind(order.status.to_string())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|_| RepositoryError::Persistence)?;

        Ok(())
    }
}
