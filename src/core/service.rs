//! 核心服务层模块

use async_trait::async_trait;
use serde_json::Value;

use super::response::Envelope;
use crate::app::products::model::ProductId;

/// 产品数据来源
///
/// `id` 为 `None` 或零值时获取整个目录，否则获取单个产品。
/// 实现方不得向调用方抛出错误，所有失败都折叠进失败信封。
#[async_trait]
pub trait ProductFeed: Send + Sync {
    async fn fetch_products(&self, id: Option<&ProductId>) -> Envelope<Value>;
}
