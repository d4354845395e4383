use crate::domain::errors::GatewayError;

/// Invariant violations of a single cart line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CartLineError {
    #[error("cart_line.quantity_not_positive")]
    QuantityNotPositive,
    #[error("cart_line.negative_unit_price")]
    NegativeUnitPrice,
    #[error("cart_line.house_name_empty")]
    HouseNameEmpty,
    #[error("cart_line.total_mismatch")]
    TotalMismatch,
}

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart.invalid_line")]
    Line(#[from] CartLineError),
    #[error("cart.not_authenticated")]
    NotAuthenticated,
    #[error("cart.empty")]
    Empty,
    #[error("cart.checkout_incomplete")]
    CheckoutIncomplete,
    #[error("cart.no_pending_checkout")]
    NoPendingCheckout,
    #[error("cart.gateway")]
    Gateway(#[from] GatewayError),
}
