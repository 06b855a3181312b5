//! 应用上下文
//!
//! 容器入口：构造时扫描一次命名空间，随后按注册顺序立即创建所有单例。
//! 启动完成后注册表、单例缓存和后置处理器列表都只读，可被多个线程并发查询。

use crate::engine::LifecycleEngine;
use crate::registry::DefinitionRegistry;
use crate::scanner::NamespaceScanner;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use di_abstractions::{
    BeanContainer, BeanFactory, BeanResolver, ComponentDefinition, ComponentRegistry,
    ComponentScanner, ContainerConfig, ContainerStats, ResolveContext, ScanOptions,
};
use infrastructure_common::{
    BeanRef, ComponentScan, ContainerError, ContainerResult, GlobalUnitSource, ScanMarker, Scope,
    UnitSource,
};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, trace};
use uuid::Uuid;

/// 应用上下文
pub struct ApplicationContext {
    id: Uuid,
    config: ContainerConfig,
    registry: DefinitionRegistry,
    singletons: DashMap<String, BeanRef>,
    engine: LifecycleEngine,
    started: AtomicBool,
    started_at: DateTime<Utc>,
    startup_millis: AtomicU64,
    prototypes_created: AtomicU64,
}

impl ApplicationContext {
    /// 使用全局单元清单和默认配置创建上下文
    pub fn new(marker: &ScanMarker) -> ContainerResult<Self> {
        Self::with_source(marker, Arc::new(GlobalUnitSource), ContainerConfig::default())
    }

    /// 由配置类创建上下文
    pub fn from_config<C: ComponentScan>() -> ContainerResult<Self> {
        Self::new(&C::scan_marker())
    }

    /// 使用指定的单元来源和配置创建上下文
    pub fn with_source(
        marker: &ScanMarker,
        source: Arc<dyn UnitSource>,
        config: ContainerConfig,
    ) -> ContainerResult<Self> {
        let id = Uuid::new_v4();
        let span = info_span!("application_context", id = %id);
        let _guard = span.enter();

        let begin = Instant::now();
        let marker = match &config.base_package {
            Some(base_package) => ScanMarker::new(base_package.clone()),
            None => marker.clone(),
        };

        let registry = DefinitionRegistry::new();
        let scanner = NamespaceScanner::new(source)
            .with_options(ScanOptions::default().recursive(config.recursive_scan));
        let post_processors = scanner.scan(&marker, &registry)?;

        let context = Self {
            id,
            config,
            registry,
            singletons: DashMap::new(),
            engine: LifecycleEngine::new(post_processors),
            started: AtomicBool::new(false),
            started_at: Utc::now(),
            startup_millis: AtomicU64::new(0),
            prototypes_created: AtomicU64::new(0),
        };
        context.instantiate_singletons()?;

        let elapsed = u64::try_from(begin.elapsed().as_millis()).unwrap_or(u64::MAX);
        context.startup_millis.store(elapsed, Ordering::Relaxed);
        context.started.store(true, Ordering::Release);

        info!(
            "应用上下文启动完成: 定义 {} 个, 单例 {} 个, 耗时 {}ms",
            context.registry.len(),
            context.singletons.len(),
            elapsed
        );
        Ok(context)
    }

    /// 上下文 ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 生效的容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 组件定义
    pub fn definition(&self, name: &str) -> ContainerResult<ComponentDefinition> {
        self.registry
            .get_definition(name)
            .ok_or_else(|| ContainerError::bean_not_found(name))
    }

    fn instantiate_singletons(&self) -> ContainerResult<()> {
        for name in self.registry.definition_names() {
            let definition = self.definition(&name)?;
            if !definition.is_singleton() {
                continue;
            }
            // 作为其它单例的依赖时已经创建
            if self.singletons.contains_key(&name) {
                trace!("单例已在嵌套构造中创建: {}", name);
                continue;
            }
            let mut context = self.config.resolve_context();
            self.create_singleton(&name, &definition, &mut context)?;
        }
        Ok(())
    }

    fn create_singleton(
        &self,
        name: &str,
        definition: &ComponentDefinition,
        context: &mut ResolveContext,
    ) -> ContainerResult<BeanRef> {
        let bean = self.engine.create_bean(name, definition, self, context)?;
        // 不能在构造期间持有缓存条目，嵌套构造会访问同一个分片
        let cached = self
            .singletons
            .entry(name.to_string())
            .or_insert(bean)
            .clone();
        debug!("缓存单例: {}", name);
        Ok(cached)
    }
}

impl BeanResolver for ApplicationContext {
    fn resolve_bean(&self, name: &str, context: &mut ResolveContext) -> ContainerResult<BeanRef> {
        let definition = self.definition(name)?;
        match definition.scope() {
            Scope::Singleton => {
                if let Some(bean) = self.singletons.get(name) {
                    return Ok(bean.value().clone());
                }
                if self.started.load(Ordering::Acquire) {
                    return Err(ContainerError::SingletonNotReady {
                        name: name.to_string(),
                    });
                }
                self.create_singleton(name, &definition, context)
            }
            Scope::Prototype => {
                let bean = self.engine.create_bean(name, &definition, self, context)?;
                self.prototypes_created.fetch_add(1, Ordering::Relaxed);
                Ok(bean)
            }
        }
    }

    fn can_resolve(&self, name: &str) -> bool {
        self.registry.contains_definition(name)
    }
}

impl BeanContainer for ApplicationContext {
    fn get_bean(&self, name: &str) -> ContainerResult<BeanRef> {
        let mut context = self.config.resolve_context();
        self.resolve_bean(name, &mut context)
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.registry.contains_definition(name)
    }

    fn is_singleton(&self, name: &str) -> ContainerResult<bool> {
        Ok(self.definition(name)?.is_singleton())
    }

    fn is_prototype(&self, name: &str) -> ContainerResult<bool> {
        Ok(self.definition(name)?.is_prototype())
    }

    fn bean_names(&self) -> Vec<String> {
        self.registry.definition_names()
    }

    fn stats(&self) -> ContainerStats {
        ContainerStats {
            context_id: self.id,
            started_at: self.started_at,
            startup_millis: self.startup_millis.load(Ordering::Relaxed),
            definitions: self.registry.len(),
            singletons: self.singletons.len(),
            post_processors: self.engine.post_processors().len(),
            prototypes_created: self.prototypes_created.load(Ordering::Relaxed),
        }
    }
}

impl fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("id", &self.id)
            .field("definitions", &self.registry.definition_names())
            .field("singletons", &self.singletons.len())
            .field("post_processors", &self.engine.post_processors().len())
            .finish()
    }
}
