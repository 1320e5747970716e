//! 店面后端 API 客户端

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::warn;

use super::products_url;
use crate::app::products::model::ProductId;
use crate::config::{ConfigError, StorefrontConfig};
use crate::core::{error::CatalogError, response::Envelope, service::ProductFeed};

/// 通过后端 `/products` 接口取数的客户端
///
/// 后端无论成功与否都以信封作为响应体，因此这里不看 HTTP 状态码，只解析信封。
pub struct StorefrontApiClient {
    client: Client,
    api_base: Url,
}

impl StorefrontApiClient {
    pub fn new(api_base: &str) -> Result<Self, ConfigError> {
        let api_base = Url::parse(api_base)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", api_base, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(api_base.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            api_base,
        })
    }

    pub fn from_config(config: &StorefrontConfig) -> Result<Self, ConfigError> {
        Self::new(&config.api_base)
    }

    async fn request(&self, id: Option<&ProductId>) -> Result<Envelope<Value>, CatalogError> {
        let url = products_url(&self.api_base, id)?;
        let response = self.client.get(url).send().await?;
        response
            .json::<Envelope<Value>>()
            .await
            .map_err(|e| CatalogError::shape(format!("后端响应不是合法的信封: {}", e)))
    }
}

#[async_trait]
impl ProductFeed for StorefrontApiClient {
    async fn fetch_products(&self, id: Option<&ProductId>) -> Envelope<Value> {
        match self.request(id).await {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(kind = ?err.kind, error = %err, "获取产品失败");
                Envelope::failure(err)
            }
        }
    }
}
