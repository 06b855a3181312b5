//! di-impl 集中集成测试
//!
//! 不经过 `ApplicationContext`，直接组合扫描器、注册表与生命周期引擎，
//! 验证各组件之间的接缝

use di_abstractions::{
    BeanContainer, BeanFactory, BeanResolver, ComponentRegistry, ComponentScanner,
    PostProcessorList, ResolveContext, ScanOptions,
};
use di_impl::{ApplicationContext, DefinitionRegistry, LifecycleEngine, NamespaceScanner};
use infrastructure_common::{
    submit_unit, Autowired, Bean, BeanRef, ComponentDeclaration, ComponentType, ContainerError,
    ContainerResult, GlobalUnitSource, InjectionSlot, ScanMarker, UnitHandle, UnitSource,
};
use std::sync::{Arc, Once};

#[derive(Debug, Default)]
struct Repository;

impl Bean for Repository {}

#[derive(Debug, Default)]
struct Service {
    repository: Option<Autowired<Repository>>,
}

impl Bean for Service {
    fn injection_points(&self) -> &'static [&'static str] {
        &["repository"]
    }

    fn inject(&mut self, field: &str, dependency: BeanRef) -> ContainerResult<()> {
        match field {
            "repository" => self.repository.assign(field, dependency),
            _ => Err(ContainerError::unknown_injection_point("Service", field)),
        }
    }
}

/// 只认识固定单元的来源，模拟宿主提供的发现机制
struct FixedSource {
    units: Vec<UnitHandle>,
}

impl UnitSource for FixedSource {
    fn name(&self) -> &str {
        "fixed"
    }

    fn list_units_under(&self, path: &str) -> ContainerResult<Vec<UnitHandle>> {
        if path != "store/data" {
            return Err(ContainerError::discovery(path, "未知位置"));
        }
        Ok(self.units.clone())
    }
}

fn fixed_source() -> Arc<FixedSource> {
    Arc::new(FixedSource {
        units: vec![
            UnitHandle::new(
                "/srv/app/store/data/Repository",
                ComponentType::of::<Repository>(),
                Some(ComponentDeclaration::singleton("repository")),
            ),
            UnitHandle::new(
                "/srv/app/store/data/Service",
                ComponentType::of::<Service>(),
                Some(ComponentDeclaration::new("service", Some("prototype"))),
            ),
            UnitHandle::new(
                "/srv/app/store/data/Helper",
                ComponentType::of::<Repository>(),
                None,
            ),
        ],
    })
}

/// 每次都重新创建的极简解析器
struct RebuildingResolver<'a> {
    registry: &'a DefinitionRegistry,
    engine: &'a LifecycleEngine,
}

impl BeanResolver for RebuildingResolver<'_> {
    fn resolve_bean(&self, name: &str, context: &mut ResolveContext) -> ContainerResult<BeanRef> {
        let definition = self
            .registry
            .get_definition(name)
            .ok_or_else(|| ContainerError::bean_not_found(name))?;
        self.engine.create_bean(name, &definition, self, context)
    }

    fn can_resolve(&self, name: &str) -> bool {
        self.registry.contains_definition(name)
    }
}

#[test]
fn test_scanner_registry_and_engine_compose() {
    let registry = DefinitionRegistry::new();
    let scanner = NamespaceScanner::new(fixed_source());

    let processors = scanner
        .scan(&ScanMarker::new("store.data"), &registry)
        .unwrap();
    assert!(processors.is_empty());
    assert_eq!(registry.definition_names(), vec!["repository", "service"]);

    let definition = registry.get_definition("service").unwrap();
    assert_eq!(definition.qualified_name(), "store.data.Service");
    assert!(definition.is_prototype());

    let engine = LifecycleEngine::new(PostProcessorList::default());
    let resolver = RebuildingResolver {
        registry: &registry,
        engine: &engine,
    };
    let mut context = ResolveContext::default();
    let bean = resolver.resolve_bean("service", &mut context).unwrap();

    let service = bean.downcast_ref::<Service>().unwrap();
    assert!(service.repository.is_some());
    assert_eq!(context.depth(), 0);
}

#[test]
fn test_custom_source_reports_unknown_location() {
    let registry = DefinitionRegistry::new();
    let scanner = NamespaceScanner::new(fixed_source());

    let error = scanner
        .scan(&ScanMarker::new("store.other"), &registry)
        .unwrap_err();
    assert!(matches!(error, ContainerError::Discovery { .. }));
    assert!(registry.is_empty());
}

#[test]
fn test_depth_limit_applies_to_manual_resolution() {
    let registry = DefinitionRegistry::new();
    NamespaceScanner::new(fixed_source())
        .scan(&ScanMarker::new("store.data"), &registry)
        .unwrap();

    let engine = LifecycleEngine::default();
    let resolver = RebuildingResolver {
        registry: &registry,
        engine: &engine,
    };
    // service 还需要再嵌套一层 repository
    let mut context = ResolveContext::new(1);
    let error = resolver.resolve_bean("service", &mut context).unwrap_err();

    match error {
        ContainerError::CreationDepthExceeded { max_depth, chain } => {
            assert_eq!(max_depth, 1);
            assert_eq!(chain, "service -> repository");
        }
        other => panic!("应该是深度超限错误: {other}"),
    }
}

static SUBMIT_UNITS: Once = Once::new();

/// 手工向全局清单登记，等价于 `#[component]` 生成的登记代码
fn submit_manual_units() {
    SUBMIT_UNITS.call_once(|| {
        submit_unit(UnitHandle::from_module_path(
            "manual_registry::beans",
            "Repository",
            ComponentType::of::<Repository>(),
            Some(ComponentDeclaration::singleton("repository")),
        ));
        submit_unit(UnitHandle::from_module_path(
            "manual_registry::beans",
            "Service",
            ComponentType::of::<Service>(),
            Some(ComponentDeclaration::singleton("service")),
        ));
        submit_unit(UnitHandle::from_module_path(
            "manual_registry::beans::extra",
            "Service",
            ComponentType::of::<Service>(),
            Some(ComponentDeclaration::new("extra_service", Some("prototype"))),
        ));
    });
}

#[test]
fn test_global_manifest_drives_context() {
    submit_manual_units();

    let context = ApplicationContext::new(&ScanMarker::new("manual_registry.beans")).unwrap();

    assert_eq!(context.bean_names(), vec!["repository", "service"]);
    let service = context.get_bean_as::<Service>("service").unwrap();
    let repository = context.get_bean_as::<Repository>("repository").unwrap();
    assert!(Autowired::ptr_eq(service.repository.as_ref().unwrap(), &repository));

    let units = GlobalUnitSource
        .list_units_under("manual_registry/beans")
        .unwrap();
    assert_eq!(units.len(), 3);
}

#[test]
fn test_global_manifest_recursive_scan() {
    submit_manual_units();

    let registry = DefinitionRegistry::new();
    NamespaceScanner::new(Arc::new(GlobalUnitSource))
        .with_options(ScanOptions::default().recursive(true))
        .scan(&ScanMarker::new("manual_registry.beans"), &registry)
        .unwrap();

    let extra = registry.get_definition("extra_service").unwrap();
    assert_eq!(extra.qualified_name(), "manual_registry.beans.extra.Service");
    assert_eq!(registry.len(), 3);
}

#[tokio::test]
async fn test_context_shared_across_tasks() {
    submit_manual_units();

    let context = Arc::new(ApplicationContext::new(&ScanMarker::new("manual_registry.beans")).unwrap());
    let expected = context.get_bean("service").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let context = Arc::clone(&context);
            tokio::spawn(async move { context.get_bean("service") })
        })
        .collect();

    for handle in handles {
        let bean = handle.await.unwrap().unwrap();
        assert!(Arc::ptr_eq(&bean, &expected));
    }
}
