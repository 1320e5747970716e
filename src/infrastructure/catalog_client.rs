//! 上游目录网关
//!
//! 把本地的“获取全部 / 获取单个”请求转发给远端目录，并把结果规整为
//! [`Envelope`]。每次调用只发出一个出站请求：不重试、不缓存、不覆盖
//! 传输层默认的超时。

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use super::products_url;
use crate::app::products::model::ProductId;
use crate::config::{CatalogConfig, ConfigError};
use crate::core::{error::CatalogError, response::Envelope, service::ProductFeed};

#[derive(Clone)]
pub struct CatalogGateway {
    client: Client,
    base_url: Url,
}

impl CatalogGateway {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, ConfigError> {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 获取目录或单个产品，返回未经修改的上游响应体
    pub async fn fetch(&self, id: Option<&ProductId>) -> Result<Value, CatalogError> {
        let url = products_url(&self.base_url, id)?;
        let collection = id.map_or(true, ProductId::is_catalog_wide);
        debug!(%url, collection, "请求上游目录");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::transport(format!(
                "Request failed with status code {}",
                status.as_u16()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::shape(format!("上游响应不是合法的 JSON: {}", e)))?;
        check_shape(&body, collection)?;

        Ok(body)
    }
}

/// 集合响应必须是带 `products` 数组的对象，单品响应必须是对象
fn check_shape(body: &Value, collection: bool) -> Result<(), CatalogError> {
    if !body.is_object() {
        return Err(CatalogError::shape("上游响应不是 JSON 对象"));
    }
    if collection && !body.get("products").is_some_and(Value::is_array) {
        return Err(CatalogError::shape("上游响应缺少 products 列表"));
    }
    Ok(())
}

#[async_trait]
impl ProductFeed for CatalogGateway {
    async fn fetch_products(&self, id: Option<&ProductId>) -> Envelope<Value> {
        let result = self.fetch(id).await;
        if let Err(err) = &result {
            warn!(kind = ?err.kind, error = %err, "上游目录请求失败");
        }
        result.into()
    }
}
