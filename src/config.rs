//! 配置模块
//!
//! 依次尝试 `config.toml` 与 `./config/config.toml`，都不存在时使用默认配置，
//! 之后再应用环境变量覆盖。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 端口覆盖
pub const ENV_PORT: &str = "STOREFRONT_PORT";
/// 上游目录地址覆盖
pub const ENV_CATALOG_BASE_URL: &str = "CATALOG_BASE_URL";
/// 店面访问后端 API 的地址覆盖
pub const ENV_API_BASE: &str = "STOREFRONT_API_BASE";

const CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 上游目录配置
    pub catalog: CatalogConfig,
    /// 店面客户端配置
    pub storefront: StorefrontConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// 上游目录根地址，产品集合位于 `{base_url}/products`
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// 后端 API 根地址
    pub api_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

impl HttpConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dummyjson.com".to_string(),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:4000/api".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 应用环境变量覆盖，`lookup` 通常为 `std::env::var`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Validation(format!("无效的端口 {}: {}", ENV_PORT, port)))?;
        }
        if let Some(base_url) = lookup(ENV_CATALOG_BASE_URL) {
            self.catalog.base_url = base_url;
        }
        if let Some(api_base) = lookup(ENV_API_BASE) {
            self.storefront.api_base = api_base;
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }

        validate_url("catalog.base_url", &self.catalog.base_url)?;
        validate_url("storefront.api_base", &self.storefront.api_base)?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("{} = {}: {}", field, value, e)))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "{} = {}: 需要 http(s) 地址",
            field, value
        )));
    }
    Ok(())
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
    #[error("无效的地址: {0}")]
    InvalidUrl(String),
}

/// 从文件或默认值加载配置，并应用环境变量覆盖
///
/// 返回配置以及实际读取的文件路径（使用默认配置时为 `None`）。
pub fn load_config() -> Result<(Config, Option<PathBuf>), ConfigError> {
    let source = CONFIG_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists());

    let mut config = match &source {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    config.apply_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;

    Ok((config, source))
}
