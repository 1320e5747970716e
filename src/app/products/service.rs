//! 产品业务服务

use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::model::ProductId;
use crate::core::{response::Envelope, service::ProductFeed};

/// 产品转发服务，不附加任何业务逻辑
#[derive(Clone)]
pub struct ProductService {
    feed: Arc<dyn ProductFeed>,
}

impl ProductService {
    pub fn new(feed: Arc<dyn ProductFeed>) -> Self {
        Self { feed }
    }

    pub async fn list_products(&self) -> Envelope<Value> {
        self.feed.fetch_products(None).await
    }

    pub async fn get_product(&self, raw_id: &str) -> Envelope<Value> {
        let id = ProductId::from_path(raw_id);
        if id.is_catalog_wide() {
            info!(raw_id, "零值产品标识，返回整个目录");
        }
        self.feed.fetch_products(Some(&id)).await
    }
}
