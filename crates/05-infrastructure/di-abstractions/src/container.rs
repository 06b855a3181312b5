//! 容器抽象接口
//!
//! 提供按名称获取 Bean 以及查询容器状态的能力

use crate::resolver::{BeanResolver, ResolveContext};
use chrono::{DateTime, Utc};
use infrastructure_common::{Autowired, Bean, BeanRef, ConfigError, ConfigResult, ContainerResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bean 容器 trait
pub trait BeanContainer: BeanResolver {
    /// 按名称获取 Bean
    ///
    /// 单例返回启动时缓存的实例；原型每次执行完整的构造流程
    fn get_bean(&self, name: &str) -> ContainerResult<BeanRef>;

    /// 按名称获取 Bean 并以 `T` 访问
    ///
    /// 被代理的实例同样可以取得，句柄持有代理本身，解引用到代理目标
    fn get_bean_as<T: Bean>(&self, name: &str) -> ContainerResult<Autowired<T>>
    where
        Self: Sized,
    {
        Autowired::new(name, self.get_bean(name)?)
    }

    /// 是否存在该名称的定义
    fn contains_bean(&self, name: &str) -> bool;

    /// 该名称是否为单例
    fn is_singleton(&self, name: &str) -> ContainerResult<bool>;

    /// 该名称是否为原型
    fn is_prototype(&self, name: &str) -> ContainerResult<bool>;

    /// 按注册顺序返回所有 Bean 名称
    fn bean_names(&self) -> Vec<String>;

    /// 容器统计
    fn stats(&self) -> ContainerStats;
}

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 覆盖扫描标记的基础命名空间
    pub base_package: Option<String>,
    /// 是否递归扫描子命名空间
    pub recursive_scan: bool,
    /// 嵌套创建的最大深度
    pub max_creation_depth: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            base_package: None,
            recursive_scan: false,
            max_creation_depth: ResolveContext::DEFAULT_MAX_DEPTH,
        }
    }
}

impl ContainerConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_creation_depth == 0 {
            return Err(ConfigError::validation("max_creation_depth 必须大于 0"));
        }
        if let Some(base_package) = &self.base_package {
            if base_package.trim().is_empty() {
                return Err(ConfigError::validation("base_package 不能为空字符串"));
            }
            if base_package.split('.').any(str::is_empty) {
                return Err(ConfigError::validation(format!(
                    "base_package 格式无效: {}",
                    base_package
                )));
            }
        }
        Ok(())
    }

    /// 新的解析上下文
    pub fn resolve_context(&self) -> ResolveContext {
        ResolveContext::new(self.max_creation_depth)
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerStats {
    /// 容器实例 ID
    pub context_id: Uuid,
    /// 启动时间
    pub started_at: DateTime<Utc>,
    /// 启动耗时（毫秒）
    pub startup_millis: u64,
    /// 定义数量
    pub definitions: usize,
    /// 已缓存的单例数量
    pub singletons: usize,
    /// 后置处理器数量
    pub post_processors: usize,
    /// 已创建的原型实例数量
    pub prototypes_created: u64,
}
