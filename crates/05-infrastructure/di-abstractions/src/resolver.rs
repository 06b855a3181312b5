//! Bean 解析器抽象接口
//!
//! 提供按名称解析 Bean 的能力，生命周期引擎通过它递归解析依赖

use infrastructure_common::{BeanRef, ContainerError, ContainerResult};

/// Bean 解析器 trait
pub trait BeanResolver: Send + Sync {
    /// 在给定的解析上下文中按名称解析 Bean
    fn resolve_bean(&self, name: &str, context: &mut ResolveContext) -> ContainerResult<BeanRef>;

    /// 检查是否可以解析指定名称的 Bean
    fn can_resolve(&self, name: &str) -> bool;
}

/// 解析上下文
///
/// 记录当前的嵌套创建链。只用于限制深度和输出诊断信息，不做循环依赖分析
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// 当前创建链
    pub creation_chain: Vec<String>,
    /// 最大嵌套深度
    pub max_depth: usize,
}

impl ResolveContext {
    /// 默认最大嵌套深度
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    /// 创建新的解析上下文
    pub fn new(max_depth: usize) -> Self {
        Self {
            creation_chain: Vec::new(),
            max_depth,
        }
    }

    /// 进入一个 Bean 的创建
    pub fn enter(&mut self, name: &str) -> ContainerResult<()> {
        if self.creation_chain.len() >= self.max_depth {
            return Err(ContainerError::CreationDepthExceeded {
                max_depth: self.max_depth,
                chain: self.describe_chain(name),
            });
        }
        self.creation_chain.push(name.to_string());
        Ok(())
    }

    /// 离开当前 Bean 的创建
    pub fn leave(&mut self) {
        self.creation_chain.pop();
    }

    /// 当前嵌套深度
    pub fn depth(&self) -> usize {
        self.creation_chain.len()
    }

    fn describe_chain(&self, next: &str) -> String {
        let mut chain = self.creation_chain.join(" -> ");
        if !chain.is_empty() {
            chain.push_str(" -> ");
        }
        chain.push_str(next);
        chain
    }
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DEPTH)
    }
}
