//! 日志基础设施

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 以配置中的级别初始化日志，设置了 `RUST_LOG` 时以其为准
    pub fn init(config: &LoggingConfig) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.level));

        if tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .is_err()
        {
            tracing::debug!("日志系统已经初始化");
        }
    }
}
