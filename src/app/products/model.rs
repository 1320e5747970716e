//! 产品数据模型

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 没有图片时展示的占位资源
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// 划线价相对售价的倍数
const COMPARE_AT_MARKUP: f64 = 1.25;

/// 产品标识，由上游目录分配，可能是数字也可能是字符串
///
/// 数字保留上游原始的 JSON 数值（负数、浮点数同样合法）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(serde_json::Number),
    Text(String),
}

impl ProductId {
    /// 路径参数原样作为字符串标识，转发时不做任何改写
    pub fn from_path(raw: &str) -> Self {
        ProductId::Text(raw.to_string())
    }

    /// 零值标识（数值 `0`、空串、空白串、字符串 `"0"`）等同于“获取整个目录”
    pub fn is_catalog_wide(&self) -> bool {
        match self {
            ProductId::Number(n) => n.as_f64().map_or(false, |v| v == 0.0),
            ProductId::Text(s) => {
                let s = s.trim();
                s.is_empty() || s == "0"
            }
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        ProductId::Number(n.into())
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Number(n.into())
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub price: f64,
    #[serde(default, alias = "thumbnail", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price,
            image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn image_or_placeholder(&self) -> &str {
        self.image
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn compare_at_price(&self) -> f64 {
        self.price * COMPARE_AT_MARKUP
    }

    pub fn display_price(&self) -> String {
        format_price(self.price)
    }

    pub fn display_compare_at_price(&self) -> String {
        format_price(self.compare_at_price())
    }
}

pub fn format_price(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
