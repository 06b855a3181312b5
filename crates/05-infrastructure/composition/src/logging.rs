//! 日志初始化

use infrastructure_common::{ConfigError, ConfigResult, InfrastructureError, InfrastructureResult};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别或过滤指令，例如 `info`、`di_impl=trace`
    pub level: String,
    /// 是否使用 JSON 格式
    pub json: bool,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            show_target: true,
            show_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json: false,
            show_target: true,
            show_thread_ids: true,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
            show_target: false,
            show_thread_ids: false,
        }
    }

    /// 设置日志级别
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// 验证过滤指令
    pub fn validate(&self) -> ConfigResult<()> {
        self.filter().map(|_| ())
    }

    fn filter(&self) -> ConfigResult<EnvFilter> {
        EnvFilter::try_new(&self.level)
            .map_err(|e| ConfigError::validation(format!("无效的日志级别 {}: {}", self.level, e)))
    }
}

/// 初始化全局日志订阅者
///
/// 设置了 `RUST_LOG` 时优先使用环境变量中的过滤指令
pub fn init_logging(config: &LoggingConfig) -> InfrastructureResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => config.filter()?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.show_target)
        .with_thread_ids(config.show_thread_ids);

    if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
    .map_err(|e| InfrastructureError::BootstrapFailed {
        message: format!("日志初始化失败: {}", e),
    })?;

    info!("日志系统初始化完成: {}", config.level);
    Ok(())
}
