//! # 店面产品目录
//!
//! 后端把第三方产品目录 API 代理为统一的信封响应，店面在内存中对获取到的
//! 产品列表做搜索、价格区间过滤和排序：
//! - `app::products`：`/api/products` 路由与转发服务
//! - `app::storefront`：查询引擎与会话状态
//! - `core`：错误、信封、中间件与 [`crate::core::service::ProductFeed`] 抽象
//! - `infrastructure`：上游网关、后端 API 客户端与日志

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use self::app::create_router;
pub use self::app::products::model::{Product, ProductId};
pub use self::core::error::{CatalogError, ErrorKind};
pub use self::core::response::Envelope;
