//! 基础设施层：日志初始化与对外 HTTP 客户端

pub mod api_client;
pub mod catalog_client;
pub mod logger;

use reqwest::Url;

use crate::app::products::model::ProductId;
use crate::core::error::CatalogError;

/// 由根地址和可选标识推导产品端点
///
/// 零值标识指向集合端点 `{base}/products`，其他标识指向 `{base}/products/{id}`，
/// 标识作为单个路径段编码。
pub fn products_url(base: &Url, id: Option<&ProductId>) -> Result<Url, CatalogError> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| CatalogError::transport(format!("不能作为根地址: {}", base)))?;
        segments.pop_if_empty().push("products");
        if let Some(id) = id.filter(|id| !id.is_catalog_wide()) {
            segments.push(&id.to_string());
        }
    }
    Ok(url)
}
