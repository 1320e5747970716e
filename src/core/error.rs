//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::response::Envelope;

/// 未匹配路由时返回给调用方的固定消息
pub const INVALID_ROUTE_MESSAGE: &str = "Invalid API request found.";

/// 上游目录调用失败的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// 上游不可达、连接中断或返回非成功状态码
    Transport,
    /// 上游返回的内容不是预期的结构
    Shape,
}

impl ErrorKind {
    fn fallback_message(self) -> &'static str {
        match self {
            ErrorKind::Transport => "catalog source request failed",
            ErrorKind::Shape => "catalog source returned an unexpected response",
        }
    }
}

/// 目录网关错误
///
/// 携带明确的 [`ErrorKind`]，调用方可以按类别分支；
/// 需要统一降级时只看 `message` 即可。`message` 永远非空。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CatalogError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CatalogError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            kind.fallback_message().to_string()
        } else {
            message
        };
        Self { kind, message }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Shape, message)
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::shape(err.to_string())
        } else {
            CatalogError::transport(err.to_string())
        }
    }
}

/// HTTP 层错误类型
#[derive(Debug)]
pub enum CoreError {
    /// 请求没有命中任何 API 路由
    InvalidRoute,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        match self {
            CoreError::InvalidRoute => (
                StatusCode::UNAUTHORIZED,
                Json(Envelope::<()>::message(INVALID_ROUTE_MESSAGE)),
            )
                .into_response(),
        }
    }
}
