//! 元数据定义
//!
//! 提供组件类型句柄、组件声明与扫描标记

use crate::component::Bean;
use crate::errors::BoxError;
use crate::lifecycle::PostProcessor;
use std::fmt;
use std::sync::Arc;

/// 零参数构造函数
pub type BeanConstructor = fn() -> Result<Box<dyn Bean>, BoxError>;

/// 后置处理器构造函数
pub type PostProcessorConstructor = fn() -> Result<Arc<dyn PostProcessor>, BoxError>;

fn construct_default<T: Bean + Default>() -> Result<Box<dyn Bean>, BoxError> {
    Ok(Box::new(T::default()))
}

fn construct_processor<T: PostProcessor + Default + 'static>(
) -> Result<Arc<dyn PostProcessor>, BoxError> {
    Ok(Arc::new(T::default()))
}

/// 组件类型句柄
///
/// 描述一个可以被容器实例化的类型：类型名称、零参数构造函数，以及是否具备
/// 后置处理器能力
#[derive(Clone, Copy)]
pub struct ComponentType {
    type_name: &'static str,
    constructor: Option<BeanConstructor>,
    post_processor: Option<PostProcessorConstructor>,
}

impl ComponentType {
    /// 通过 `Default` 构造的类型
    pub fn of<T: Bean + Default>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            constructor: Some(construct_default::<T>),
            post_processor: None,
        }
    }

    /// 使用自定义零参数构造函数的类型
    pub fn with_constructor<T: Bean>(constructor: BeanConstructor) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            constructor: Some(constructor),
            post_processor: None,
        }
    }

    /// 没有可用零参数构造函数的类型
    pub fn without_constructor<T: Bean>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            constructor: None,
            post_processor: None,
        }
    }

    /// 声明该类型同时是后置处理器
    pub fn with_post_processor<P: PostProcessor + Default + 'static>(mut self) -> Self {
        self.post_processor = Some(construct_processor::<P>);
        self
    }

    /// 类型名称
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        self.type_name.rsplit("::").next().unwrap_or(self.type_name)
    }

    /// 零参数构造函数
    pub fn constructor(&self) -> Option<BeanConstructor> {
        self.constructor
    }

    /// 后置处理器构造函数
    pub fn post_processor(&self) -> Option<PostProcessorConstructor> {
        self.post_processor
    }

    /// 是否具备后置处理器能力
    pub fn is_post_processor(&self) -> bool {
        self.post_processor.is_some()
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentType")
            .field("type_name", &self.type_name)
            .field("constructor", &self.constructor.is_some())
            .field("post_processor", &self.post_processor.is_some())
            .finish()
    }
}

/// 组件声明
///
/// 使一个类型可被发现；名称即注册表中的键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDeclaration {
    /// 组件名称
    pub name: String,
    /// 作用域声明文本
    pub scope: Option<String>,
}

impl ComponentDeclaration {
    /// 创建新的组件声明
    pub fn new(name: impl Into<String>, scope: Option<&str>) -> Self {
        Self {
            name: name.into(),
            scope: scope.map(str::to_string),
        }
    }

    /// 单例组件声明
    pub fn singleton(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    /// 设置作用域声明
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// 扫描标记
///
/// 携带要扫描的基础命名空间（点分路径，例如 `example_app.service`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMarker {
    base_package: String,
}

impl ScanMarker {
    /// 创建新的扫描标记
    pub fn new(base_package: impl Into<String>) -> Self {
        Self {
            base_package: base_package.into(),
        }
    }

    /// 点分形式的基础命名空间
    pub fn base_package(&self) -> &str {
        &self.base_package
    }

    /// 目录形式的路径
    pub fn directory_path(&self) -> String {
        crate::discovery::namespace_to_path(&self.base_package)
    }

    /// 命名空间的根段
    pub fn root_segment(&self) -> Option<&str> {
        self.base_package
            .split(['.', ':'])
            .find(|segment| !segment.is_empty())
    }
}

/// 配置类 trait
///
/// 类型级的扫描配置，通常由 `#[component_scan]` 宏生成
pub trait ComponentScan {
    /// 基础命名空间
    fn base_package() -> &'static str;

    /// 对应的扫描标记
    fn scan_marker() -> ScanMarker {
        ScanMarker::new(Self::base_package())
    }
}
