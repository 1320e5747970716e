//! 店面会话
//!
//! 持有获取到的产品列表与当前查询状态。列表只会被新的获取整体替换；
//! 每次获取都会领取一个递增的 [`FetchTicket`]，晚到的旧结果会被丢弃。

use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::query::{compute_view, QueryState};
use super::view::ViewSummary;
use crate::app::products::model::Product;
use crate::core::{error::CatalogError, response::Envelope, service::ProductFeed};

/// 一次获取的凭据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug)]
pub struct Storefront {
    products: Vec<Product>,
    query: QueryState,
    loading: bool,
    generation: u64,
    last_error: Option<CatalogError>,
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new()
    }
}

impl Storefront {
    /// 新会话处于加载中状态，产品列表为空
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            query: QueryState::default(),
            loading: true,
            generation: 0,
            last_error: None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&CatalogError> {
        self.last_error.as_ref()
    }

    pub fn set_query(&mut self, query: QueryState) {
        self.query = query;
    }

    pub fn update_query<F>(&mut self, update: F)
    where
        F: FnOnce(QueryState) -> QueryState,
    {
        self.query = update(std::mem::take(&mut self.query));
    }

    pub fn clear_filters(&mut self) {
        self.update_query(QueryState::cleared_filters);
    }

    /// 当前展示视图，只在内存中计算，不会触发网络请求
    pub fn view(&self) -> Vec<Product> {
        compute_view(&self.products, &self.query)
    }

    pub fn summary(&self) -> ViewSummary {
        ViewSummary::new(&self.query, &self.view())
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// 应用一次获取的结果
    ///
    /// 凭据已被更新的获取取代时忽略结果并返回 `false`。失败或结构不符时列表置空。
    pub fn complete_fetch(&mut self, ticket: FetchTicket, envelope: Envelope<Value>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "丢弃过期的获取结果"
            );
            return false;
        }

        match envelope.into_result().and_then(products_from_payload) {
            Ok(products) => {
                info!(count = products.len(), "产品列表已更新");
                self.products = products;
                self.last_error = None;
            }
            Err(err) => {
                warn!(kind = ?err.kind, error = %err, "获取产品失败，展示空目录");
                self.products = Vec::new();
                self.last_error = Some(err);
            }
        }
        self.loading = false;
        true
    }

    /// 从数据源获取整个目录
    pub async fn load(&mut self, feed: &dyn ProductFeed) -> bool {
        let ticket = self.begin_fetch();
        let envelope = feed.fetch_products(None).await;
        self.complete_fetch(ticket, envelope)
    }
}

/// 从集合响应中取出 `products` 列表
fn products_from_payload(mut payload: Value) -> Result<Vec<Product>, CatalogError> {
    let list = payload
        .get_mut("products")
        .map(Value::take)
        .ok_or_else(|| CatalogError::shape("响应中没有 products 字段"))?;
    if !list.is_array() {
        return Err(CatalogError::shape("products 不是数组"));
    }

    let products: Vec<Product> = serde_json::from_value(list)
        .map_err(|e| CatalogError::shape(format!("产品记录格式错误: {}", e)))?;

    let mut seen = HashSet::new();
    for product in &products {
        if !seen.insert(&product.id) {
            warn!(id = %product.id, "产品列表中存在重复的标识");
            break;
        }
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::products::model::ProductId;
    use crate::app::storefront::query::{PriceRange, SortKey};
    use crate::core::error::ErrorKind;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    fn catalog_payload() -> Value {
        json!({
            "products": [
                { "id": 1, "title": "Red Shirt", "description": "Cotton", "price": 300 },
                { "id": 2, "title": "Blue Hat", "price": 800, "thumbnail": "hat.png" },
                { "id": 3, "title": "Green Shoe", "description": null, "price": 1500 }
            ],
            "total": 3,
            "skip": 0,
            "limit": 30
        })
    }

    struct StaticFeed {
        envelope: Envelope<Value>,
        calls: Mutex<Vec<Option<ProductId>>>,
    }

    impl StaticFeed {
        fn new(envelope: Envelope<Value>) -> Self {
            Self {
                envelope,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ProductFeed for StaticFeed {
        async fn fetch_products(&self, id: Option<&ProductId>) -> Envelope<Value> {
            self.calls.lock().unwrap().push(id.cloned());
            self.envelope.clone()
        }
    }

    #[tokio::test]
    async fn test_load_requests_whole_catalog() {
        let feed = StaticFeed::new(Envelope::success(catalog_payload()));
        let mut storefront = Storefront::new();
        assert!(storefront.is_loading());

        assert!(storefront.load(&feed).await);
        assert!(!storefront.is_loading());
        assert_eq!(storefront.products().len(), 3);
        assert_eq!(storefront.products()[1].image.as_deref(), Some("hat.png"));
        assert_eq!(*feed.calls.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn test_failed_fetch_yields_empty_view() {
        let feed = StaticFeed::new(Envelope::failure(CatalogError::transport("connection refused")));
        let mut storefront = Storefront::new();
        storefront.load(&feed).await;

        assert!(storefront.products().is_empty());
        assert_eq!(storefront.last_error().unwrap().kind, ErrorKind::Transport);
        for range in PriceRange::VARIANTS {
            storefront.set_query(QueryState::default().with_price_range(range));
            assert!(storefront.view().is_empty());
            assert!(storefront.summary().is_empty());
        }
    }

    #[test]
    fn test_unexpected_shape_yields_empty_list() {
        let payloads = [
            json!({ "products": { "id": 1 } }),
            json!({ "items": [] }),
            json!({ "products": [{ "id": 1, "title": "No price" }] }),
            json!([1, 2, 3]),
        ];
        for payload in payloads {
            let mut storefront = Storefront::new();
            let ticket = storefront.begin_fetch();
            storefront.complete_fetch(ticket, Envelope::success(payload));
            assert!(storefront.products().is_empty());
            assert_eq!(storefront.last_error().unwrap().kind, ErrorKind::Shape);
            assert!(!storefront.is_loading());
        }
    }

    #[test]
    fn test_stale_fetch_result_is_ignored() {
        let mut storefront = Storefront::new();
        let first = storefront.begin_fetch();
        let second = storefront.begin_fetch();

        assert!(storefront.complete_fetch(second, Envelope::success(catalog_payload())));
        assert_eq!(storefront.products().len(), 3);

        let late = Envelope::success(json!({ "products": [] }));
        assert!(!storefront.complete_fetch(first, late));
        assert_eq!(storefront.products().len(), 3);
        assert!(!storefront.is_loading());
    }

    #[test]
    fn test_stale_result_does_not_end_loading() {
        let mut storefront = Storefront::new();
        let first = storefront.begin_fetch();
        let _second = storefront.begin_fetch();

        assert!(!storefront.complete_fetch(first, Envelope::success(catalog_payload())));
        assert!(storefront.is_loading());
        assert!(storefront.products().is_empty());
    }

    #[test]
    fn test_new_fetch_replaces_list_wholesale() {
        let mut storefront = Storefront::new();
        let ticket = storefront.begin_fetch();
        storefront.complete_fetch(ticket, Envelope::success(catalog_payload()));

        let ticket = storefront.begin_fetch();
        let next = json!({ "products": [{ "id": 9, "title": "Scarf", "price": 99 }] });
        storefront.complete_fetch(ticket, Envelope::success(next));
        assert_eq!(storefront.products().len(), 1);
        assert_eq!(storefront.products()[0].id, ProductId::from(9u64));
    }

    #[test]
    fn test_negative_and_float_ids_are_kept() {
        let mut storefront = Storefront::new();
        let ticket = storefront.begin_fetch();
        let payload = json!({ "products": [
            { "id": 1, "title": "Mug", "price": 10 },
            { "id": -2, "title": "Plate", "price": 12 },
            { "id": 2.5, "title": "Bowl", "price": 14 },
        ] });
        storefront.complete_fetch(ticket, Envelope::success(payload));

        assert!(storefront.last_error().is_none());
        assert_eq!(storefront.products().len(), 3);
        assert_eq!(storefront.products()[1].id, ProductId::from(-2i64));
        assert_eq!(storefront.products()[2].id.to_string(), "2.5");
    }

    #[test]
    fn test_query_updates_recompute_view() {
        let mut storefront = Storefront::new();
        let ticket = storefront.begin_fetch();
        storefront.complete_fetch(ticket, Envelope::success(catalog_payload()));

        storefront.update_query(|q| q.with_search("shoe"));
        let view = storefront.view();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].title, "Green Shoe");
        assert_eq!(storefront.summary().heading, "Search results for \"shoe\"");

        storefront.update_query(|q| q.with_price_range(PriceRange::Under500).with_sort_key(SortKey::Name));
        assert!(storefront.view().is_empty());

        storefront.clear_filters();
        assert_eq!(storefront.query().sort_key, SortKey::Name);
        let titles: Vec<String> = storefront.view().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, ["Blue Hat", "Green Shoe", "Red Shirt"]);
    }
}
