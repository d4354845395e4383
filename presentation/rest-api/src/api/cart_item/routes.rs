use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};
use uuid::Uuid;

use business::domain::cart_item::use_cases::add::{AddCartItemParams, AddCartItemUseCase};
use business::domain::cart_item::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use business::domain::cart_item::use_cases::delete::{
    DeleteCartItemParams, DeleteCartItemUseCase,
};
use business::domain::cart_item::use_cases::get_all::{GetCartItemsParams, GetCartItemsUseCase};
use business::domain::cart_item::use_cases::update_quantity::{
    UpdateCartItemQuantityParams, UpdateCartItemQuantityUseCase,
};

use crate::api::cart_item::dto::{
    AddCartItemRequest, CartItemResponse, ClearCartResponse, UpdateCartItemQuantityRequest,
};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::security::SupabaseBearer;
use crate::api::tags::ApiTags;

pub struct CartItemApi {
    add_use_case: Arc<dyn AddCartItemUseCase>,
    get_all_use_case: Arc<dyn GetCartItemsUseCase>,
    update_quantity_use_case: Arc<dyn UpdateCartItemQuantityUseCase>,
    delete_use_case: Arc<dyn DeleteCartItemUseCase>,
    clear_use_case: Arc<dyn ClearCartUseCase>,
}

impl CartItemApi {
    pub fn new(
        add_use_case: Arc<dyn AddCartItemUseCase>,
        get_all_use_case: Arc<dyn GetCartItemsUseCase>,
        update_quantity_use_case: Arc<dyn UpdateCartItemQuantityUseCase>,
        delete_use_case: Arc<dyn DeleteCartItemUseCase>,
        clear_use_case: Arc<dyn ClearCartUseCase>,
    ) -> Self {
        Self {
            add_use_case,
            get_all_use_case,
            update_quantity_use_case,
            delete_use_case,
            clear_use_case,
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, Json<ErrorResponse>> {
    Uuid::parse_str(raw).map_err(|_| ErrorResponse::validation("cart_item.invalid_id"))
}

/// Remote cart of the signed-in account
///
/// Every endpoint only sees the rows owned by the caller's token.
#[OpenApi]
impl CartItemApi {
    /// List cart items
    ///
    /// Returns the caller's cart lines, oldest first.
    #[oai(path = "/cart-items", method = "get", tag = "ApiTags::CartItems")]
    async fn get_all(&self, auth: SupabaseBearer) -> GetCartItemsResponse {
        let params = GetCartItemsParams { account_id: auth.0 };

        match self.get_all_use_case.execute(params).await {
            Ok(items) => {
                let responses: Vec<CartItemResponse> =
                    items.into_iter().map(|i| i.into()).collect();
                GetCartItemsResponse::Ok(Json(responses))
            }
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetCartItemsResponse::InternalError(json)
            }
        }
    }

    /// Add a cart item
    ///
    /// When the caller already has a line with the same house, color and size,
    /// the quantity is added to it and the stored unit price is kept.
    #[oai(path = "/cart-items", method = "post", tag = "ApiTags::CartItems")]
    async fn add(&self, auth: SupabaseBearer, body: Json<AddCartItemRequest>) -> AddCartItemResponse {
        let params = AddCartItemParams {
            account_id: auth.0,
            props: body.0.into_props(),
        };

        match self.add_use_case.execute(params).await {
            Ok(item) => AddCartItemResponse::Created(Json(item.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => AddCartItemResponse::BadRequest(json),
                    _ => AddCartItemResponse::InternalError(json),
                }
            }
        }
    }

    /// Update a cart item quantity
    ///
    /// A quantity of zero or less removes the line and answers 204.
    #[oai(path = "/cart-items/:id", method = "put", tag = "ApiTags::CartItems")]
    async fn update_quantity(
        &self,
        auth: SupabaseBearer,
        id: Path<String>,
        body: Json<UpdateCartItemQuantityRequest>,
    ) -> UpdateCartItemQuantityResponse {
        let id = match parse_id(&id.0) {
            Ok(id) => id,
            Err(json) => return UpdateCartItemQuantityResponse::BadRequest(json),
        };

        let params = UpdateCartItemQuantityParams {
            id,
            account_id: auth.0,
            quantity: body.0.quantity,
        };

        match self.update_quantity_use_case.execute(params).await {
            Ok(Some(item)) => UpdateCartItemQuantityResponse::Ok(Json(item.into())),
            Ok(None) => UpdateCartItemQuantityResponse::Removed,
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateCartItemQuantityResponse::BadRequest(json),
                    404 => UpdateCartItemQuantityResponse::NotFound(json),
                    _ => UpdateCartItemQuantityResponse::InternalError(json),
                }
            }
        }
    }

    /// Delete a cart item
    #[oai(path = "/cart-items/:id", method = "delete", tag = "ApiTags::CartItems")]
    async fn delete(&self, auth: SupabaseBearer, id: Path<String>) -> DeleteCartItemResponse {
        let id = match parse_id(&id.0) {
            Ok(id) => id,
            Err(json) => return DeleteCartItemResponse::BadRequest(json),
        };

        let params = DeleteCartItemParams {
            id,
            account_id: auth.0,
        };

        match self.delete_use_case.execute(params).await {
            Ok(()) => DeleteCartItemResponse::NoContent,
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => DeleteCartItemResponse::NotFound(json),
                    _ => DeleteCartItemResponse::InternalError(json),
                }
            }
        }
    }

    /// Clear the cart
    ///
    /// Removes every line of the caller and returns how many were deleted.
    #[oai(path = "/cart-items", method = "delete", tag = "ApiTags::CartItems")]
    async fn clear(&self, auth: SupabaseBearer) -> ClearCartItemsResponse {
        let params = ClearCartParams { account_id: auth.0 };

        match self.clear_use_case.execute(params).await {
            Ok(count) => ClearCartItemsResponse::Ok(Json(ClearCartResponse { count })),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                ClearCartItemsResponse::InternalError(json)
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetCartItemsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<CartItemResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum AddCartItemResponse {
    #[oai(status = 201)]
    Created(Json<CartItemResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateCartItemQuantityResponse {
    #[oai(status = 200)]
    Ok(Json<CartItemResponse>),
    #[oai(status = 204)]
    Removed,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteCartItemResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ClearCartItemsResponse {
    #[oai(status = 200)]
    Ok(Json<ClearCartResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
