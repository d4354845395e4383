use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::cart::model::ConfigurationKey;
use business::domain::cart_item::model::CartItem;
use business::domain::cart_item::repository::CartItemRepository;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::AccountId;

use super::entity::CartItemEntity;

const COLUMNS: &str = "id, account_id, house_id, house_name, color_id, color_name, size_id, size_name, quantity, unit_price, total_price, image_url, created_at, updated_at";

pub struct CartItemRepositoryPostgres {
    pool: PgPool,
}

impl CartItemRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartItemRepository for CartItemRepositoryPostgres {
    async fn get_all(&self, account_id: &AccountId) -> Result<Vec<CartItem>, RepositoryError> {
        let entities = sqlx::query_as::<_, CartItemEntity>(&format!(
            "SELECT {} FROM cart_items WHERE account_id = $1 ORDER BY created_at ASC, id ASC",
            COLUMNS
        ))
        .bind(account_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        entities
            .into_iter()
            .map(CartItemEntity::try_into_domain)
            .collect()
    }

    async fn get_by_id(
        &self,
        id: Uuid,
        account_id: &AccountId,
    ) -> Result<CartItem, RepositoryError> {
        let entity = sqlx::query_as::<_, CartItemEntity>(&format!(
            "SELECT {} FROM cart_items WHERE id = $1 AND account_id = $2",
            COLUMNS
        ))
        .bind(id)
        .bind(account_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?
        .ok_or(RepositoryError::NotFound)?;

        entity.try_into_domain()
    }

    async fn find_by_configuration(
        &self,
        account_id: &AccountId,
        configuration: &ConfigurationKey,
    ) -> Result<Option<CartItem>, RepositoryError> {
        // NULL color/size means the default option and must match NULL
        let entity = sqlx::query_as::<_, CartItemEntity>(&format!(
            "SELECT {} FROM cart_items
            WHERE account_id = $1
              AND house_id = $2
              AND color_id IS NOT DISTINCT FROM $3
              AND size_id IS NOT DISTINCT FROM $4
            ORDER BY created_at ASC
            LIMIT 1",
            COLUMNS
        ))
        .bind(account_id.as_str())
        .bind(configuration.house_id)
        .bind(configuration.color_id)
        .bind(configuration.size_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        entity.map(CartItemEntity::try_into_domain).transpose()
    }

    async fn save(&self, item: &CartItem) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO cart_items (id, account_id, house_id, house_name, color_id, color_name, size_id, size_name, quantity, unit_price, total_price, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (id) DO UPDATE SET
                quantity = EXCLUDED.quantity,
                total_price = EXCLUDED.total_price,
                updated_at = EXCLUDED.updated_at"#,
        )
        .bind(item.id)
        .bind(item.account_id.as_str())
        .bind(item.house_id)
        .bind(&item.house_name)
        .bind(item.color_id)
        .bind(&item.color_name)
        .bind(item.size_id)
        .bind(&item.size_name)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.total_price)
        .bind(&item.image_url)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|_| RepositoryError::Persistence)?;

        Ok(())
    }

    async fn delete(&self, id: Uuid, account_id: &AccountId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_all(&self, account_id: &AccountId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE account_id = $1")
            .bind(account_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(result.rows_affected())
    }
}
