//! 生命周期引擎
//!
//! 为单个组件定义驱动完整的构造流程：
//!
//! 1. 零参数实例化
//! 2. 按字段名注入依赖
//! 3. 名称回调
//! 4. 初始化前处理
//! 5. 初始化回调（失败只记录日志）
//! 6. 初始化后处理（代理替换点）

use di_abstractions::{BeanFactory, BeanResolver, ComponentDefinition, PostProcessorList, ResolveContext};
use infrastructure_common::{Bean, BeanRef, ContainerError, ContainerResult, LifecycleState};
use std::sync::Arc;
use tracing::{debug, error, trace};

/// 生命周期引擎
#[derive(Debug, Clone, Default)]
pub struct LifecycleEngine {
    post_processors: PostProcessorList,
}

impl LifecycleEngine {
    /// 创建使用指定后置处理器的引擎
    pub fn new(post_processors: PostProcessorList) -> Self {
        Self { post_processors }
    }

    /// 后置处理器列表
    pub fn post_processors(&self) -> &PostProcessorList {
        &self.post_processors
    }

    fn instantiate(name: &str, definition: &ComponentDefinition) -> ContainerResult<Box<dyn Bean>> {
        let component_type = definition.component_type();
        let construct = component_type
            .constructor()
            .ok_or_else(|| ContainerError::Instantiation {
                bean_name: name.to_string(),
                type_name: component_type.type_name().to_string(),
                source: "没有可用的零参数构造函数".into(),
            })?;

        construct().map_err(|source| ContainerError::Instantiation {
            bean_name: name.to_string(),
            type_name: component_type.type_name().to_string(),
            source,
        })
    }

    fn inject_dependencies(
        name: &str,
        bean: &mut dyn Bean,
        resolver: &dyn BeanResolver,
        context: &mut ResolveContext,
    ) -> ContainerResult<()> {
        for &field in bean.injection_points() {
            let dependency = resolver.resolve_bean(field, context).map_err(|e| match e {
                ContainerError::BeanNotFound { name: missing } => ContainerError::DependencyResolution {
                    bean_name: name.to_string(),
                    field: field.to_string(),
                    message: format!("未定义名为 {} 的 Bean", missing),
                },
                other => other,
            })?;

            bean.inject(field, dependency).map_err(|e| ContainerError::DependencyResolution {
                bean_name: name.to_string(),
                field: field.to_string(),
                message: e.to_string(),
            })?;
            trace!("注入依赖: {}.{}", name, field);
        }
        Ok(())
    }

    fn build(
        &self,
        name: &str,
        definition: &ComponentDefinition,
        resolver: &dyn BeanResolver,
        context: &mut ResolveContext,
    ) -> ContainerResult<Box<dyn Bean>> {
        let mut state = LifecycleState::Uninitialized;
        let advance = |state: &mut LifecycleState| {
            if let Some(next) = state.next() {
                *state = next;
                trace!(bean = name, state = ?next, "生命周期状态变更");
            }
        };

        let mut bean = Self::instantiate(name, definition)?;
        advance(&mut state);

        Self::inject_dependencies(name, bean.as_mut(), resolver, context)?;
        advance(&mut state);

        if let Some(aware) = bean.as_name_aware() {
            aware.set_bean_name(name);
        }

        let mut bean = self.post_processors.apply_before_initialization(bean, name)?;
        advance(&mut state);

        if let Some(initializing) = bean.as_post_constructible() {
            if let Err(e) = initializing.after_properties_set() {
                error!("Bean 初始化回调失败，继续启动: {}, 原因: {}", name, e);
            }
        }
        advance(&mut state);

        let bean = self.post_processors.apply_after_initialization(bean, name)?;
        advance(&mut state);

        debug_assert!(state.is_terminal());
        Ok(bean)
    }
}

impl BeanFactory for LifecycleEngine {
    fn create_bean(
        &self,
        name: &str,
        definition: &ComponentDefinition,
        resolver: &dyn BeanResolver,
        context: &mut ResolveContext,
    ) -> ContainerResult<BeanRef> {
        context.enter(name)?;
        let result = self.build(name, definition, resolver, context);
        context.leave();

        let bean = result?;
        debug!("创建 Bean: {} ({})", name, definition.component_type().short_name());
        Ok(Arc::from(bean))
    }
}
