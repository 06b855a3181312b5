//! 命名空间扫描器实现

use di_abstractions::{
    ComponentDefinition, ComponentRegistry, ComponentScanner, PostProcessorList, ScanOptions,
    ScanSummary,
};
use infrastructure_common::{
    qualified_name, ContainerError, ContainerResult, PostProcessor, ScanMarker, Scope, UnitHandle,
    UnitLocation, UnitSource,
};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// 命名空间扫描器
///
/// 通过 [`UnitSource`] 枚举基础命名空间下的编译单元，注册带组件声明的类型，
/// 并立即实例化具备后置处理器能力的类型
pub struct NamespaceScanner {
    source: Arc<dyn UnitSource>,
    options: ScanOptions,
}

impl NamespaceScanner {
    /// 创建新的扫描器
    pub fn new(source: Arc<dyn UnitSource>) -> Self {
        Self {
            source,
            options: ScanOptions::default(),
        }
    }

    /// 设置扫描选项
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    fn process_unit(
        &self,
        unit: &UnitHandle,
        root_segment: &str,
        registry: &dyn ComponentRegistry,
        processors: &mut Vec<Arc<dyn PostProcessor>>,
    ) -> ContainerResult<()> {
        let Some(declaration) = &unit.declaration else {
            return Ok(());
        };

        let type_name = unit.component_type.type_name();
        let name = declaration.name.as_str();
        if name.trim().is_empty() {
            return Err(ContainerError::InvalidDeclaration {
                type_name: type_name.to_string(),
                message: "组件名称不能为空".to_string(),
            });
        }
        // 注册名称即查找键，不做隐式修整
        if name.trim() != name {
            return Err(ContainerError::InvalidDeclaration {
                type_name: type_name.to_string(),
                message: format!("组件名称首尾不能有空白: {:?}", name),
            });
        }

        let scope = Scope::parse_declared(name, declaration.scope.as_deref())?;

        let Some(qualified) = qualified_name(&unit.path, root_segment) else {
            warn!("无法推导全限定名，跳过: {}", unit.path);
            return Ok(());
        };

        if let Some(construct) = unit.component_type.post_processor() {
            if unit.component_type.constructor().is_none() {
                return Err(ContainerError::Instantiation {
                    bean_name: name.to_string(),
                    type_name: type_name.to_string(),
                    source: "后置处理器缺少零参数构造函数".into(),
                });
            }
            let processor = construct().map_err(|source| ContainerError::Instantiation {
                bean_name: name.to_string(),
                type_name: type_name.to_string(),
                source,
            })?;
            debug!("实例化后置处理器: {} ({})", name, qualified);
            processors.push(processor);
        }

        registry.register_definition(
            name,
            ComponentDefinition::new(unit.component_type, scope, qualified),
        )
    }
}

impl ComponentScanner for NamespaceScanner {
    fn scan(
        &self,
        marker: &ScanMarker,
        registry: &dyn ComponentRegistry,
    ) -> ContainerResult<PostProcessorList> {
        let base_package = marker.base_package();
        let Some(root_segment) = marker.root_segment() else {
            return Err(ContainerError::discovery(base_package, "基础命名空间为空"));
        };
        let path = marker.directory_path();

        info!("开始扫描命名空间: {} (来源: {})", base_package, self.source.name());
        let units = self.source.list_units_under(&path)?;

        let mut summary = ScanSummary {
            units_seen: units.len(),
            ..Default::default()
        };
        let mut processors = Vec::new();

        for unit in &units {
            match unit.location_in(&path) {
                Some(UnitLocation::Direct) => {}
                Some(UnitLocation::Nested) if self.options.recursive => {}
                Some(UnitLocation::Nested) => {
                    trace!("跳过子命名空间中的单元: {}", unit.path);
                    summary.skipped_nested += 1;
                    continue;
                }
                None => {
                    warn!("单元不在扫描位置下，跳过: {}", unit.path);
                    continue;
                }
            }

            if unit.declaration.is_none() {
                trace!("没有组件声明，跳过: {}", unit.path);
                summary.skipped_undeclared += 1;
                continue;
            }

            let before = processors.len();
            self.process_unit(unit, root_segment, registry, &mut processors)?;
            summary.components_registered += 1;
            summary.post_processors += processors.len() - before;
        }

        info!(
            "扫描完成: 单元 {} 个, 注册组件 {} 个, 后置处理器 {} 个, 跳过无声明 {} 个, 跳过子命名空间 {} 个",
            summary.units_seen,
            summary.components_registered,
            summary.post_processors,
            summary.skipped_undeclared,
            summary.skipped_nested
        );
        Ok(PostProcessorList::new(processors))
    }

    fn name(&self) -> &str {
        "namespace-scanner"
    }
}
