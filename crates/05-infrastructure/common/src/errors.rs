//! 错误类型定义

use thiserror::Error;

/// 装箱的动态错误，用于承载用户代码抛出的失败
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 容器错误类型
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("组件发现失败: 命名空间 {namespace} 无法解析, 原因: {message}")]
    Discovery { namespace: String, message: String },

    #[error("无效的作用域: 组件 {bean_name} 声明了 \"{scope}\"，仅支持 singleton 或 prototype")]
    InvalidScope { bean_name: String, scope: String },

    #[error("组件声明无效: {type_name}, 原因: {message}")]
    InvalidDeclaration { type_name: String, message: String },

    #[error("组件实例化失败: {bean_name} ({type_name}), 原因: {source}")]
    Instantiation {
        bean_name: String,
        type_name: String,
        source: BoxError,
    },

    #[error("依赖解析失败: {bean_name}.{field}, 原因: {message}")]
    DependencyResolution {
        bean_name: String,
        field: String,
        message: String,
    },

    #[error("Bean 不存在: {name}")]
    BeanNotFound { name: String },

    #[error("Bean 类型不匹配: {name}, 期望 {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("后置处理失败: {bean_name}, 原因: {message}")]
    PostProcessing { bean_name: String, message: String },

    #[error("创建深度超过上限 {max_depth}: {chain}")]
    CreationDepthExceeded { max_depth: usize, chain: String },

    #[error("单例尚未就绪: {name}")]
    SingletonNotReady { name: String },
}

impl ContainerError {
    /// 创建发现错误
    pub fn discovery(namespace: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Discovery {
            namespace: namespace.into(),
            message: message.into(),
        }
    }

    /// 创建 Bean 不存在错误
    pub fn bean_not_found(name: impl Into<String>) -> Self {
        Self::BeanNotFound { name: name.into() }
    }

    /// 创建类型不匹配错误
    pub fn type_mismatch<T: ?Sized>(name: impl Into<String>) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected: std::any::type_name::<T>(),
        }
    }

    /// 创建后置处理错误
    pub fn post_processing(bean_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PostProcessing {
            bean_name: bean_name.into(),
            message: message.into(),
        }
    }

    /// 未声明的注入点
    pub fn unknown_injection_point(type_name: &str, field: &str) -> Self {
        Self::DependencyResolution {
            bean_name: type_name.to_string(),
            field: field.to_string(),
            message: "该字段不是注入点".to_string(),
        }
    }

    /// 是否为 Bean 不存在错误
    pub fn is_bean_not_found(&self) -> bool {
        matches!(self, Self::BeanNotFound { .. })
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {message}")]
    ParseError { message: String },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("容器错误: {source}")]
    ContainerError {
        #[from]
        source: ContainerError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ContainerResult<T> = Result<T, ContainerError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiation_error_carries_source() {
        let source: BoxError = "constructor panicked".into();
        let error = ContainerError::Instantiation {
            bean_name: "orderService".to_string(),
            type_name: "OrderService".to_string(),
            source,
        };

        let message = error.to_string();
        assert!(message.contains("orderService"));
        assert!(message.contains("constructor panicked"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_infrastructure_error_from_container_error() {
        let error: InfrastructureError = ContainerError::bean_not_found("missing").into();
        assert!(matches!(
            error,
            InfrastructureError::ContainerError {
                source: ContainerError::BeanNotFound { .. }
            }
        ));
    }
}
