use std::sync::Arc;

use logger::TracingLogger;
use persistence::cart_item::repository::CartItemRepositoryPostgres;
use persistence::order::repository::OrderRepositoryPostgres;

use business::application::cart_item::add::AddCartItemUseCaseImpl;
use business::application::cart_item::clear::ClearCartUseCaseImpl;
use business::application::cart_item::delete::DeleteCartItemUseCaseImpl;
use business::application::cart_item::get_all::GetCartItemsUseCaseImpl;
use business::application::cart_item::update_quantity::UpdateCartItemQuantityUseCaseImpl;
use business::application::order::create::CreateOrderUseCaseImpl;
use business::application::order::get_all::GetOrdersUseCaseImpl;

use crate::api::cart_item::routes::CartItemApi;
use crate::api::health::routes::HealthApi;
use crate::api::order::routes::OrderApi;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub cart_item_api: CartItemApi,
    pub order_api: OrderApi,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let logger = Arc::new(TracingLogger);

        // Infrastructure adapters
        let cart_item_repository = Arc::new(CartItemRepositoryPostgres::new(pool.clone()));
        let order_repository = Arc::new(OrderRepositoryPostgres::new(pool));

        // Cart item use cases
        let add_use_case = Arc::new(AddCartItemUseCaseImpl {
            repository: cart_item_repository.clone(),
            logger: logger.clone(),
        });
        let get_all_use_case = Arc::new(GetCartItemsUseCaseImpl {
            repository: cart_item_repository.clone(),
            logger: logger.clone(),
        });
        let update_quantity_use_case = Arc::new(UpdateCartItemQuantityUseCaseImpl {
            repository: cart_item_repository.clone(),
            logger: logger.clone(),
        });
        let delete_use_case = Arc::new(DeleteCartItemUseCaseImpl {
            repository: cart_item_repository.clone(),
            logger: logger.clone(),
        });
        let clear_use_case = Arc::new(ClearCartUseCaseImpl {
            repository: cart_item_repository,
            logger: logger.clone(),
        });

        // Order use cases
        let create_order_use_case = Arc::new(CreateOrderUseCaseImpl {
            repository: order_repository.clone(),
            logger: logger.clone(),
        });
        let get_orders_use_case = Arc::new(GetOrdersUseCaseImpl {
            repository: order_repository,
            logger,
        });

        let cart_item_api = CartItemApi::new(
            add_use_case,
            get_all_use_case,
            update_quantity_use_case,
            delete_use_case,
            clear_use_case,
        );
        let order_api = OrderApi::new(create_order_use_case, get_orders_use_case);

        Self {
            health_api: HealthApi::new(),
            cart_item_api,
            order_api,
        }
    }
}
