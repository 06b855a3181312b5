//! # 基础设施组合层
//!
//! 负责把配置加载、日志初始化和依赖注入容器组合成一个可运行的应用上下文。
//!
//! ## 主要功能
//!
//! - **应用构建器**: 使用构建者模式组装并启动 [`ApplicationContext`](di_impl::ApplicationContext)
//! - **配置源管理**: 合并配置文件与环境变量
//! - **日志初始化**: 基于 `tracing-subscriber` 的日志输出
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::{ApplicationBuilder, LoggingConfig};
//! use infrastructure_common::ScanMarker;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = ApplicationBuilder::new()
//!         .with_optional_settings_file("config/app.toml")
//!         .with_logging(LoggingConfig::development())
//!         .build(&ScanMarker::new("example_app.service"))?;
//!
//!     println!("已注册: {:?}", di_abstractions::BeanContainer::bean_names(&context));
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config_sources;
pub mod logging;

// 重新导出主要类型
pub use builder::ApplicationBuilder;
pub use config_sources::{ApplicationSettings, SettingsLoader};
pub use logging::{init_logging, LoggingConfig};

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
