pub mod auth;
pub mod cart_gateway;
pub mod catalog_gateway;
pub mod client;
pub mod credentials;
pub mod dto;
pub mod order_gateway;
pub mod quote_gateway;

#[cfg(test)]
mod test_server;
