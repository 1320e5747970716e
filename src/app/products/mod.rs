//! 产品网关：`/api/products` 路由、转发服务与产品模型

pub mod handler;
pub mod model;
pub mod service;
