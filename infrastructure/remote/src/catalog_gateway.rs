use async_trait::async_trait;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use business::domain::catalog::gateway::CatalogGateway;
use business::domain::catalog::model::{House, HouseColor, HouseSize};
use business::domain::errors::GatewayError;

use crate::client::{ApiClient, postgrest_url};
use crate::credentials::Credentials;
use crate::dto::{ColorRow, HouseRow, SizeRow, into_houses};

/// `CatalogGateway` over the Supabase REST interface. The catalog is public,
/// so every read goes out with the anonymous key.
pub struct CatalogGatewaySupabase {
    client: ApiClient,
    anon_key: String,
}

impl CatalogGatewaySupabase {
    pub fn new(supabase_url: &str, anon_key: impl Into<String>) -> Self {
        Self {
            client: ApiClient::new(postgrest_url(supabase_url), Credentials::new()),
            anon_key: anon_key.into(),
        }
    }

    async fn select<T: DeserializeOwned>(&self, query: &str) -> Result<Vec<T>, GatewayError> {
        let request = self
            .client
            .client
            .get(self.client.url(query))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key);

        let response = self.client.send(request).await?;
        self.client.read_json(response).await
    }
}

#[async_trait]
impl CatalogGateway for CatalogGatewaySupabase {
    async fn houses(&self) -> Result<Vec<House>, GatewayError> {
        let rows: Vec<HouseRow> = self
            .select("/houses?select=*&order=created_at.desc")
            .await?;
        into_houses(rows)
    }

    async fn house(&self, id: Uuid) -> Result<Option<House>, GatewayError> {
        let rows: Vec<HouseRow> = self
            .select(&format!("/houses?select=*&id=eq.{}", id))
            .await?;
        rows.into_iter().next().map(House::try_from).transpose()
    }

    async fn colors(&self) -> Result<Vec<HouseColor>, GatewayError> {
        let rows: Vec<ColorRow> = self
            .select("/colors?select=*&order=created_at.asc")
            .await?;
        Ok(rows.into_iter().map(HouseColor::from).collect())
    }

    async fn sizes(&self) -> Result<Vec<HouseSize>, GatewayError> {
        let rows: Vec<SizeRow> = self
            .select("/sizes?select=*&order=created_at.asc")
            .await?;
        Ok(rows.into_iter().map(HouseSize::from).collect())
    }
}
