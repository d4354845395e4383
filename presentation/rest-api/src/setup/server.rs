use poem::{EndpointExt, Route, Server as PoemServer, listener::TcpListener, middleware::Tracing};
use poem_openapi::OpenApiService;

use crate::api::cart_item::routes::CartItemApi;
use crate::api::health::routes::HealthApi;
use crate::api::order::routes::OrderApi;
use crate::{config::app_config::AppConfig, setup::dependency_injection::DependencyContainer};

type StorefrontApis = (HealthApi, CartItemApi, OrderApi);

pub struct Server;

impl Server {
    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let api_service = Self::api_service(container, &addr);
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();
        let app = Route::new()
            .nest("/", api_service)
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .with(config.cors)
            .with(Tracing);
        tracing::info!("Server running at http://{}", addr);
        tracing::info!("Swagger UI at http://{}/docs", addr);
        PoemServer::new(TcpListener::bind(&addr)).run(app).await?;
        Ok(())
    }

    fn api_service(container: DependencyContainer, addr: &str) -> OpenApiService<StorefrontApis, ()> {
        OpenApiService::new(
            (
                container.health_api,
                container.cart_item_api,
                container.order_api,
            ),
            "Storefront API",
            env!("CARGO_PKG_VERSION"),
        )
        .server(format!("http://{}", addr))
    }
}
