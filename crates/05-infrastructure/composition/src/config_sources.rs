//! 配置源加载
//!
//! 按顺序合并配置文件与环境变量，绑定到 [`ApplicationSettings`]

use crate::logging::LoggingConfig;
use di_abstractions::ContainerConfig;
use infrastructure_common::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// 应用配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    /// 容器配置
    pub container: ContainerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

impl ApplicationSettings {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.container.validate()?;
        self.logging.validate()
    }
}

#[derive(Debug, Clone)]
struct FileSource {
    path: PathBuf,
    required: bool,
}

/// 配置加载器
///
/// 后添加的配置源覆盖先添加的，环境变量最后合并
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    files: Vec<FileSource>,
    env_prefix: Option<String>,
    separator: String,
}

impl SettingsLoader {
    /// 默认环境变量前缀
    pub const DEFAULT_ENV_PREFIX: &'static str = "LORN_IOC";

    /// 默认层级分隔符
    pub const DEFAULT_SEPARATOR: &'static str = "__";

    /// 创建使用默认环境变量前缀的加载器
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            env_prefix: Some(Self::DEFAULT_ENV_PREFIX.to_string()),
            separator: Self::DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// 添加必须存在的配置文件，格式按扩展名识别（toml/json/yaml）
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(FileSource {
            path: path.as_ref().to_path_buf(),
            required: true,
        });
        self
    }

    /// 添加可选的配置文件
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(FileSource {
            path: path.as_ref().to_path_buf(),
            required: false,
        });
        self
    }

    /// 设置环境变量前缀
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// 不读取环境变量
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// 加载并验证配置
    pub fn load(&self) -> ConfigResult<ApplicationSettings> {
        let mut builder = config::Config::builder();

        for file in &self.files {
            if !file.path.exists() {
                if file.required {
                    return Err(ConfigError::FileNotFound {
                        path: file.path.display().to_string(),
                    });
                }
                debug!("可选配置文件不存在，跳过: {}", file.path.display());
                continue;
            }
            debug!("添加配置文件: {}", file.path.display());
            builder = builder.add_source(config::File::from(file.path.as_path()));
        }

        if let Some(prefix) = &self.env_prefix {
            debug!("添加环境变量配置源: {}{}*", prefix, self.separator);
            builder = builder.add_source(
                config::Environment::with_prefix(prefix)
                    .separator(&self.separator)
                    .try_parsing(true),
            );
        }

        let settings: ApplicationSettings = builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| {
                error!("配置加载失败: {}", e);
                ConfigError::ParseError {
                    message: e.to_string(),
                }
            })?;

        settings.validate()?;
        Ok(settings)
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = SettingsLoader::new().without_env().load().unwrap();
        assert_eq!(settings, ApplicationSettings::default());
    }

    #[test]
    fn test_load_toml_file() {
        let file = toml_file(
            r#"
            [container]
            base_package = "shop.service"
            recursive_scan = true

            [logging]
            level = "debug"
            "#,
        );

        let settings = SettingsLoader::new()
            .without_env()
            .with_file(file.path())
            .load()
            .unwrap();

        assert_eq!(settings.container.base_package.as_deref(), Some("shop.service"));
        assert!(settings.container.recursive_scan);
        assert_eq!(settings.container.max_creation_depth, 64);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_missing_required_file() {
        let error = SettingsLoader::new()
            .without_env()
            .with_file("/definitely/not/here.toml")
            .load()
            .unwrap_err();
        assert!(matches!(error, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_missing_optional_file_is_skipped() {
        let settings = SettingsLoader::new()
            .without_env()
            .with_optional_file("/definitely/not/here.toml")
            .load()
            .unwrap();
        assert!(settings.container.base_package.is_none());
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let file = toml_file("[container]\nmax_creation_depth = 0\n");
        let error = SettingsLoader::new()
            .without_env()
            .with_file(file.path())
            .load()
            .unwrap_err();
        assert!(matches!(error, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file("[container]\nmax_creation_depth = 16\n");
        std::env::set_var("LORN_IOC_LOADER_TEST__CONTAINER__MAX_CREATION_DEPTH", "32");

        let settings = SettingsLoader::new()
            .with_env_prefix("LORN_IOC_LOADER_TEST")
            .with_file(file.path())
            .load()
            .unwrap();

        std::env::remove_var("LORN_IOC_LOADER_TEST__CONTAINER__MAX_CREATION_DEPTH");
        assert_eq!(settings.container.max_creation_depth, 32);
    }
}
