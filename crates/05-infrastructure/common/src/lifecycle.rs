//! 组件生命周期与能力接口

use crate::component::Bean;
use crate::errors::{BoxError, ContainerError, ContainerResult};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 组件作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// 单例模式 - 容器启动时创建，之后共享同一实例
    #[default]
    Singleton,
    /// 原型模式 - 每次请求都创建新实例
    Prototype,
}

impl Scope {
    /// 作用域的声明文本
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Singleton => "singleton",
            Self::Prototype => "prototype",
        }
    }

    /// 解析组件声明中的作用域文本
    pub fn parse_declared(bean_name: &str, declared: Option<&str>) -> ContainerResult<Self> {
        match declared {
            None => Ok(Self::Singleton),
            Some(value) => value.parse().map_err(|_| ContainerError::InvalidScope {
                bean_name: bean_name.to_string(),
                scope: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 作用域文本无法识别
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown scope: {0}")]
pub struct UnknownScope(pub String);

// 只接受精确的小写文本，与声明保持一致
impl FromStr for Scope {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "singleton" => Ok(Self::Singleton),
            "prototype" => Ok(Self::Prototype),
            other => Err(UnknownScope(other.to_string())),
        }
    }
}

/// 名称感知能力
///
/// 实现者在依赖注入之后收到自己在容器中的注册名称
pub trait NameAware {
    /// 设置 Bean 名称
    fn set_bean_name(&mut self, name: &str);
}

/// 初始化回调能力
///
/// 在前置处理之后调用；失败只会被记录，不会中止容器启动
pub trait PostConstructible {
    /// 属性设置完成后的初始化
    fn after_properties_set(&mut self) -> Result<(), BoxError>;
}

/// 后置处理器
///
/// 在每个 Bean 初始化前后按注册顺序调用，返回值替换当前实例
pub trait PostProcessor: Send + Sync + fmt::Debug {
    /// 初始化前处理
    fn post_process_before_initialization(
        &self,
        bean: Box<dyn Bean>,
        _bean_name: &str,
    ) -> ContainerResult<Box<dyn Bean>> {
        Ok(bean)
    }

    /// 初始化后处理
    fn post_process_after_initialization(
        &self,
        bean: Box<dyn Bean>,
        _bean_name: &str,
    ) -> ContainerResult<Box<dyn Bean>> {
        Ok(bean)
    }
}

/// 单个实例的构造状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// 未初始化
    #[default]
    Uninitialized,
    /// 已实例化
    Instantiated,
    /// 依赖已注入
    Injected,
    /// 前置处理已完成
    BeforeHooksApplied,
    /// 初始化已完成
    Initialized,
    /// 后置处理已完成（终态）
    AfterHooksApplied,
}

impl LifecycleState {
    /// 下一个状态，终态返回 `None`
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Uninitialized => Some(Self::Instantiated),
            Self::Instantiated => Some(Self::Injected),
            Self::Injected => Some(Self::BeforeHooksApplied),
            Self::BeforeHooksApplied => Some(Self::Initialized),
            Self::Initialized => Some(Self::AfterHooksApplied),
            Self::AfterHooksApplied => None,
        }
    }

    /// 是否为终态
    pub fn is_terminal(self) -> bool {
        self == Self::AfterHooksApplied
    }
}
