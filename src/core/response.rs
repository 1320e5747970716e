//! 核心响应处理模块
//!
//! 网关的每个操作都以 [`Envelope`] 返回：要么 `{status: true, data}`，
//! 要么 `{status: false, error}`，不存在部分成功。

use serde::{Deserialize, Serialize};

use super::error::{CatalogError, ErrorKind};

/// 统一响应信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: true,
            data: Some(data),
            error: None,
            kind: None,
        }
    }

    pub fn failure(err: CatalogError) -> Self {
        Self {
            status: false,
            data: None,
            error: Some(err.message),
            kind: Some(err.kind),
        }
    }

    /// 不带错误类别的失败信封，用于路由层的固定提示
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: false,
            data: None,
            error: Some(message.into()),
            kind: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status
    }

    /// 还原为带类型的结果
    ///
    /// 没有类别的失败信封按传输失败处理；声明成功却缺少 `data` 的信封按结构失败处理。
    pub fn into_result(self) -> Result<T, CatalogError> {
        if self.status {
            return self
                .data
                .ok_or_else(|| CatalogError::shape("success envelope carried no data"));
        }

        let kind = self.kind.unwrap_or(ErrorKind::Transport);
        Err(CatalogError::new(kind, self.error.unwrap_or_default()))
    }
}

impl<T> From<Result<T, CatalogError>> for Envelope<T> {
    fn from(result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(data) => Envelope::success(data),
            Err(err) => Envelope::failure(err),
        }
    }
}
