//! 展示视图摘要

use serde::Serialize;

use super::query::QueryState;
use crate::app::products::model::Product;

/// “今日特惠”区域展示的产品数量
pub const TOP_DEALS_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSummary {
    pub heading: String,
    pub count: usize,
    pub count_label: String,
}

impl ViewSummary {
    pub fn new(query: &QueryState, view: &[Product]) -> Self {
        let heading = if query.has_search() {
            format!("Search results for \"{}\"", query.search_text)
        } else {
            "Our Products".to_string()
        };
        let count = view.len();
        let noun = if count == 1 { "product" } else { "products" };

        Self {
            heading,
            count,
            count_label: format!("{} {} found", count, noun),
        }
    }

    /// 为空时展示“没有找到产品”，并提供清除筛选的入口
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

pub fn top_deals(view: &[Product]) -> &[Product] {
    &view[..view.len().min(TOP_DEALS_LIMIT)]
}
