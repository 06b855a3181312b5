//! 组件注册表抽象接口

use infrastructure_common::{ComponentType, ContainerResult, Scope};

/// 组件定义
///
/// 扫描阶段创建，之后不可变，由注册表独占持有
#[derive(Debug, Clone)]
pub struct ComponentDefinition {
    component_type: ComponentType,
    scope: Scope,
    qualified_name: String,
}

impl ComponentDefinition {
    /// 创建新的组件定义
    pub fn new(component_type: ComponentType, scope: Scope, qualified_name: impl Into<String>) -> Self {
        Self {
            component_type,
            scope,
            qualified_name: qualified_name.into(),
        }
    }

    /// 实现类型
    pub fn component_type(&self) -> &ComponentType {
        &self.component_type
    }

    /// 作用域
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// 是否单例
    pub fn is_singleton(&self) -> bool {
        self.scope == Scope::Singleton
    }

    /// 是否原型
    pub fn is_prototype(&self) -> bool {
        self.scope == Scope::Prototype
    }

    /// 由单元路径推导的全限定名
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }
}

/// 组件注册表 trait
///
/// 名称到组件定义的映射。只在扫描阶段写入，之后只读
pub trait ComponentRegistry: Send + Sync {
    /// 注册组件定义，名称必须唯一
    fn register_definition(&self, name: &str, definition: ComponentDefinition) -> ContainerResult<()>;

    /// 获取组件定义
    fn get_definition(&self, name: &str) -> Option<ComponentDefinition>;

    /// 检查名称是否已注册
    fn contains_definition(&self, name: &str) -> bool;

    /// 按注册顺序返回所有名称
    fn definition_names(&self) -> Vec<String>;

    /// 已注册定义数量
    fn len(&self) -> usize;

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
