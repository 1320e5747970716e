//! 查询引擎：搜索、价格区间过滤与排序
//!
//! [`compute_view`] 是纯函数，每次都从完整产品列表重新计算，先过滤后排序。

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error;

use crate::app::products::model::Product;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown price range: {0}")]
    UnknownPriceRange(String),
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
}

/// 价格区间
///
/// `500-1000` 与 `1000-2000` 都包含 1000，两者在边界处重叠。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "under-500")]
    Under500,
    #[serde(rename = "500-1000")]
    From500To1000,
    #[serde(rename = "1000-2000")]
    From1000To2000,
    #[serde(rename = "over-2000")]
    Over2000,
}

impl PriceRange {
    pub const VARIANTS: [PriceRange; 5] = [
        PriceRange::All,
        PriceRange::Under500,
        PriceRange::From500To1000,
        PriceRange::From1000To2000,
        PriceRange::Over2000,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PriceRange::All => "all",
            PriceRange::Under500 => "under-500",
            PriceRange::From500To1000 => "500-1000",
            PriceRange::From1000To2000 => "1000-2000",
            PriceRange::Over2000 => "over-2000",
        }
    }

    pub fn contains(self, price: f64) -> bool {
        match self {
            PriceRange::All => true,
            PriceRange::Under500 => price < 500.0,
            PriceRange::From500To1000 => (500.0..=1000.0).contains(&price),
            PriceRange::From1000To2000 => (1000.0..=2000.0).contains(&price),
            PriceRange::Over2000 => price > 2000.0,
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceRange {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceRange::VARIANTS
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| QueryError::UnknownPriceRange(s.to_string()))
    }
}

/// 排序方式，所有排序都是稳定排序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// 保持获取顺序
    #[default]
    Relevance,
    PriceLow,
    PriceHigh,
    /// 按标题逐字节比较，区分大小写
    Name,
}

impl SortKey {
    pub const VARIANTS: [SortKey; 4] = [
        SortKey::Relevance,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Name,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Name => "name",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Relevance => Ordering::Equal,
            SortKey::PriceLow => a.price.total_cmp(&b.price),
            SortKey::PriceHigh => b.price.total_cmp(&a.price),
            SortKey::Name => a.title.cmp(&b.title),
        }
    }

    pub fn apply(self, products: &mut [Product]) {
        if self != SortKey::Relevance {
            products.sort_by(|a, b| self.compare(a, b));
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::VARIANTS
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| QueryError::UnknownSortKey(s.to_string()))
    }
}

/// 查询状态
///
/// 每次用户交互都生成一个新的记录，而不是原地修改。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_text: String,
    pub price_range: PriceRange,
    pub sort_key: SortKey,
}

impl QueryState {
    pub fn new(
        search_text: impl Into<String>,
        price_range: PriceRange,
        sort_key: SortKey,
    ) -> Self {
        Self {
            search_text: search_text.into(),
            price_range,
            sort_key,
        }
    }

    #[must_use]
    pub fn with_search(self, search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_price_range(self, price_range: PriceRange) -> Self {
        Self {
            price_range,
            ..self
        }
    }

    #[must_use]
    pub fn with_sort_key(self, sort_key: SortKey) -> Self {
        Self { sort_key, ..self }
    }

    /// 清除搜索词和价格区间，保留排序方式
    #[must_use]
    pub fn cleared_filters(self) -> Self {
        Self {
            search_text: String::new(),
            price_range: PriceRange::All,
            sort_key: self.sort_key,
        }
    }

    pub fn has_search(&self) -> bool {
        !self.search_text.is_empty()
    }
}

fn matches_search(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.title.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

/// 计算展示视图
pub fn compute_view(products: &[Product], query: &QueryState) -> Vec<Product> {
    let needle = query.search_text.to_lowercase();

    let mut view: Vec<Product> = products
        .iter()
        .filter(|p| matches_search(p, &needle) && query.price_range.contains(p.price))
        .cloned()
        .collect();
    query.sort_key.apply(&mut view);

    view
}
