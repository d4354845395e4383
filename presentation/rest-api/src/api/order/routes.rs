use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::order::use_cases::create::{CreateOrderParams, CreateOrderUseCase};
use business::domain::order::use_cases::get_all::{GetOrdersParams, GetOrdersUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::order::dto::{CreateOrderRequest, OrderResponse};
use crate::api::security::SupabaseBearer;
use crate::api::tags::ApiTags;

pub struct OrderApi {
    create_use_case: Arc<dyn CreateOrderUseCase>,
    get_all_use_case: Arc<dyn GetOrdersUseCase>,
}

impl OrderApi {
    pub fn new(
        create_use_case: Arc<dyn CreateOrderUseCase>,
        get_all_use_case: Arc<dyn GetOrdersUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            get_all_use_case,
        }
    }
}

/// Orders placed by the signed-in account
#[OpenApi]
impl OrderApi {
    /// Place an order
    ///
    /// Creates one pending order for a single house configuration.
    #[oai(path = "/orders", method = "post", tag = "ApiTags::Orders")]
    async fn create(&self, auth: SupabaseBearer, body: Json<CreateOrderRequest>) -> CreateOrderResponse {
        let params = CreateOrderParams {
            account_id: auth.0,
            house_id: body.0.house_id,
            color_id: body.0.color_id,
            size_id: body.0.size_id,
            quantity: body.0.quantity,
            total_price: body.0.total_price,
        };

        match self.create_use_case.execute(params).await {
            Ok(order) => CreateOrderResponse::Created(Json(order.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CreateOrderResponse::BadRequest(json),
                    _ => CreateOrderResponse::InternalError(json),
                }
            }
        }
    }

    /// List orders
    ///
    /// Returns the caller's orders, newest first.
    #[oai(path = "/orders", method = "get", tag = "ApiTags::Orders")]
    async fn get_all(&self, auth: SupabaseBearer) -> GetOrdersResponse {
        match self
            .get_all_use_case
            .execute(GetOrdersParams { account_id: auth.0 })
            .await
        {
            Ok(orders) => {
                GetOrdersResponse::Ok(Json(orders.into_iter().map(|o| o.into()).collect()))
            }
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetOrdersResponse::InternalError(json)
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateOrderResponse {
    #[oai(status = 201)]
    Created(Json<OrderResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetOrdersResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<OrderResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::security::test_support::bearer_for;
    use async_trait::async_trait;
    use business::domain::errors::RepositoryError;
    use business::domain::order::errors::OrderError;
    use business::domain::order::model::{NewOrderProps, Order};
    use mockall::mock;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem_openapi::OpenApiService;
    use serde_json::json;
    use uuid::Uuid;

    mock! {
        pub Create {}
        #[async_trait]
        impl CreateOrderUseCase for Create {
            async fn execute(&self, params: CreateOrderParams) -> Result<Order, OrderError>;
        }
    }

    mock! {
        pub GetAll {}
        #[async_trait]
        impl GetOrdersUseCase for GetAll {
            async fn execute(&self, params: GetOrdersParams) -> Result<Vec<Order>, OrderError>;
        }
    }

    fn client(create: MockCreate, get_all: MockGetAll) -> TestClient<poem::Route> {
        let api = OrderApi::new(Arc::new(create), Arc::new(get_all));
        let service = OpenApiService::new(api, "test", "0.0.0");
        TestClient::new(poem::Route::new().nest("/", service))
    }

    #[tokio::test]
    async fn should_create_pending_order_for_token_subject() {
        let mut create = MockCreate::new();
        create
            .expect_execute()
            .withf(|params| params.account_id.as_str() == "buyer-1" && params.quantity == 2)
            .returning(|params| {
                Ok(Order::new(NewOrderProps {
                    account_id: params.account_id,
                    house_id: params.house_id,
                    color_id: params.color_id,
                    size_id: params.size_id,
                    quantity: params.quantity,
                    total_price: params.total_price,
                })
                .unwrap())
            });
        let client = client(create, MockGetAll::new());

        let response = client
            .post("/orders")
            .header("Authorization", bearer_for("buyer-1"))
            .body_json(&json!({
                "house_id": Uuid::new_v4(),
                "quantity": 2,
                "total_price": 5_800_000
            }))
            .send()
            .await;

        response.assert_status(StatusCode::CREATED);
        let json = response.json().await;
        json.value().object().get("status").assert_string("pending");
        json.value().object().get("account_id").assert_string("buyer-1");
    }

    #[tokio::test]
    async fn should_answer_bad_request_when_quantity_not_positive() {
        let mut create = MockCreate::new();
        create
            .expect_execute()
            .returning(|_| Err(OrderError::QuantityNotPositive));
        let client = client(create, MockGetAll::new());

        let response = client
            .post("/orders")
            .header("Authorization", bearer_for("buyer-1"))
            .body_json(&json!({
                "house_id": Uuid::new_v4(),
                "quantity": 0,
                "total_price": 0
            }))
            .send()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json = response.json().await;
        json.value()
            .object()
            .get("message")
            .assert_string("order.quantity_not_positive");
    }

    #[tokio::test]
    async fn should_answer_internal_error_when_listing_fails() {
        let mut get_all = MockGetAll::new();
        get_all
            .expect_execute()
            .returning(|_| Err(OrderError::Repository(RepositoryError::DatabaseError)));
        let client = client(MockCreate::new(), get_all);

        let response = client
            .get("/orders")
            .header("Authorization", bearer_for("buyer-2"))
            .send()
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn should_reject_listing_without_token() {
        let client = client(MockCreate::new(), MockGetAll::new());

        let response = client.get("/orders").send().await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
