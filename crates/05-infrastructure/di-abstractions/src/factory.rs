//! Bean 工厂抽象接口
//!
//! 提供按组件定义驱动完整构造流程的能力

use crate::registry::ComponentDefinition;
use crate::resolver::{BeanResolver, ResolveContext};
use infrastructure_common::{BeanRef, ContainerResult};

/// Bean 工厂 trait
///
/// 依次执行：实例化、依赖注入、名称回调、前置处理、初始化回调、后置处理，
/// 返回最终（可能已被替换的）实例
pub trait BeanFactory: Send + Sync {
    /// 创建一个完整装配的 Bean
    fn create_bean(
        &self,
        name: &str,
        definition: &ComponentDefinition,
        resolver: &dyn BeanResolver,
        context: &mut ResolveContext,
    ) -> ContainerResult<BeanRef>;
}
