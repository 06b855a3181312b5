//! 应用构建器

use crate::config_sources::{ApplicationSettings, SettingsLoader};
use crate::logging::{init_logging, LoggingConfig};
use di_abstractions::ContainerConfig;
use di_impl::ApplicationContext;
use infrastructure_common::{
    ComponentScan, GlobalUnitSource, InfrastructureResult, ScanMarker, UnitSource,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// 应用构建器
///
/// 使用建造者模式加载配置、初始化日志并启动应用上下文
pub struct ApplicationBuilder {
    /// 配置加载器
    loader: SettingsLoader,
    /// 显式指定的容器配置，优先于配置源
    container_config: Option<ContainerConfig>,
    /// 显式指定的日志配置，优先于配置源
    logging_config: Option<LoggingConfig>,
    /// 是否初始化日志
    logging_enabled: bool,
    /// 编译单元来源
    unit_source: Option<Arc<dyn UnitSource>>,
}

impl ApplicationBuilder {
    /// 创建新的应用构建器
    pub fn new() -> Self {
        Self {
            loader: SettingsLoader::new(),
            container_config: None,
            logging_config: None,
            logging_enabled: false, // 默认不初始化日志
            unit_source: None,
        }
    }

    /// 添加配置文件
    pub fn with_settings_file(mut self, path: impl AsRef<Path>) -> Self {
        self.loader = self.loader.with_file(path);
        self
    }

    /// 添加可选的配置文件
    pub fn with_optional_settings_file(mut self, path: impl AsRef<Path>) -> Self {
        self.loader = self.loader.with_optional_file(path);
        self
    }

    /// 设置环境变量前缀
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.loader = self.loader.with_env_prefix(prefix);
        self
    }

    /// 不读取环境变量
    pub fn without_env(mut self) -> Self {
        self.loader = self.loader.without_env();
        self
    }

    /// 使用指定的日志配置并启用日志初始化
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = Some(config);
        self.logging_enabled = true;
        self
    }

    /// 使用配置源中的日志配置初始化日志
    pub fn enable_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// 使用指定的容器配置
    pub fn with_container_config(mut self, config: ContainerConfig) -> Self {
        self.container_config = Some(config);
        self
    }

    /// 使用指定的编译单元来源，默认使用全局清单
    pub fn with_unit_source(mut self, source: Arc<dyn UnitSource>) -> Self {
        self.unit_source = Some(source);
        self
    }

    /// 加载最终生效的配置
    pub fn settings(&self) -> InfrastructureResult<ApplicationSettings> {
        let mut settings = self.loader.load()?;
        if let Some(container) = &self.container_config {
            settings.container = container.clone();
        }
        if let Some(logging) = &self.logging_config {
            settings.logging = logging.clone();
        }
        settings.validate()?;
        Ok(settings)
    }

    /// 构建并启动应用上下文
    pub fn build(self, marker: &ScanMarker) -> InfrastructureResult<ApplicationContext> {
        let settings = self.settings()?;

        if self.logging_enabled {
            init_logging(&settings.logging)?;
        }
        debug!("生效的容器配置: {:?}", settings.container);

        let source = self
            .unit_source
            .unwrap_or_else(|| Arc::new(GlobalUnitSource));
        let context = ApplicationContext::with_source(marker, source, settings.container)?;

        info!("应用构建完成: {}", context.id());
        Ok(context)
    }

    /// 由配置类构建并启动应用上下文
    pub fn build_for<C: ComponentScan>(self) -> InfrastructureResult<ApplicationContext> {
        self.build(&C::scan_marker())
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
