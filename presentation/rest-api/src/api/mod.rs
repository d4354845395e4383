pub mod error;
pub mod security;
pub mod tags;
pub mod health {
    pub mod routes;
}
pub mod cart_item {
    pub mod dto;
    pub mod error_mapper;
    pub mod routes;
}
pub mod order {
    pub mod dto;
    pub mod error_mapper;
    pub mod routes;
}
