//! 组件定义注册表实现

use dashmap::DashMap;
use di_abstractions::{ComponentDefinition, ComponentRegistry};
use infrastructure_common::{ContainerError, ContainerResult};
use parking_lot::RwLock;
use tracing::debug;

/// 基于 DashMap 的定义注册表
///
/// 额外记录注册顺序，启动时按该顺序构造单例
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    definitions: DashMap<String, ComponentDefinition>,
    order: RwLock<Vec<String>>,
}

impl DefinitionRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComponentRegistry for DefinitionRegistry {
    fn register_definition(&self, name: &str, definition: ComponentDefinition) -> ContainerResult<()> {
        // 持有顺序锁期间检查并写入，保证名称唯一
        let mut order = self.order.write();
        if self.definitions.contains_key(name) {
            return Err(ContainerError::InvalidDeclaration {
                type_name: definition.component_type().type_name().to_string(),
                message: format!("组件名称重复: {}", name),
            });
        }

        debug!(
            "注册组件定义: {} -> {} ({})",
            name,
            definition.qualified_name(),
            definition.scope()
        );
        self.definitions.insert(name.to_string(), definition);
        order.push(name.to_string());
        Ok(())
    }

    fn get_definition(&self, name: &str) -> Option<ComponentDefinition> {
        self.definitions.get(name).map(|entry| entry.value().clone())
    }

    fn contains_definition(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    fn definition_names(&self) -> Vec<String> {
        self.order.read().clone()
    }

    fn len(&self) -> usize {
        self.definitions.len()
    }
}
