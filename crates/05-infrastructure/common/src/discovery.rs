//! 组件发现机制
//!
//! 提供编译单元的描述、发现接口以及全局注册清单。宿主环境没有可用的类路径，
//! 所以每个组件在程序加载时把自己作为一个"编译单元"登记到清单里，扫描器再按
//! 命名空间从清单中枚举。

use crate::errors::{ContainerError, ContainerResult};
use crate::metadata::{ComponentDeclaration, ComponentType};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::trace;

/// 编译单元句柄
#[derive(Debug, Clone)]
pub struct UnitHandle {
    /// 目录形式的单元路径，例如 `example_app/service/UserService`
    pub path: String,
    /// 单元对应的类型
    pub component_type: ComponentType,
    /// 组件声明，没有声明的类型会被扫描器跳过
    pub declaration: Option<ComponentDeclaration>,
}

impl UnitHandle {
    /// 创建新的单元句柄
    pub fn new(
        path: impl Into<String>,
        component_type: ComponentType,
        declaration: Option<ComponentDeclaration>,
    ) -> Self {
        Self {
            path: path.into(),
            component_type,
            declaration,
        }
    }

    /// 由 `module_path!()` 与类型名生成单元句柄
    pub fn from_module_path(
        module_path: &str,
        type_name: &str,
        component_type: ComponentType,
        declaration: Option<ComponentDeclaration>,
    ) -> Self {
        let path = format!("{}/{}", namespace_to_path(module_path), type_name);
        Self::new(path, component_type, declaration)
    }

    /// 单元相对于命名空间的位置
    pub fn location_in(&self, namespace_path: &str) -> Option<UnitLocation> {
        locate_unit(&self.path, namespace_path)
    }
}

/// 单元相对于扫描位置的关系
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitLocation {
    /// 直接位于该位置下
    Direct,
    /// 位于该位置的子目录中
    Nested,
}

/// 编译单元来源 trait
///
/// 扫描器通过它枚举命名空间下的单元，屏蔽宿主环境的发现细节
pub trait UnitSource: Send + Sync {
    /// 来源名称
    fn name(&self) -> &str;

    /// 列出位于指定位置及其子目录下的所有单元
    ///
    /// 位置无法解析时返回 [`ContainerError::Discovery`]
    fn list_units_under(&self, path: &str) -> ContainerResult<Vec<UnitHandle>>;
}

/// 将点分命名空间转换为目录形式的路径
pub fn namespace_to_path(namespace: &str) -> String {
    split_segments(&namespace.replace("::", "/").replace('.', "/")).join("/")
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// 由单元路径推导全限定名
///
/// 以根段的第一次出现为锚点，容忍任意绝对路径前缀
pub fn qualified_name(unit_path: &str, root_segment: &str) -> Option<String> {
    let segments = split_segments(unit_path);
    let anchor = segments.iter().position(|segment| *segment == root_segment)?;
    Some(segments[anchor..].join("."))
}

/// 判断单元相对于命名空间路径的位置
pub fn locate_unit(unit_path: &str, namespace_path: &str) -> Option<UnitLocation> {
    let namespace = split_segments(namespace_path);
    let root = *namespace.first()?;
    let segments = split_segments(unit_path);
    let anchor = segments.iter().position(|segment| *segment == root)?;

    // 最后一段是类型名
    let (_, directory) = segments[anchor..].split_last()?;
    if !directory.starts_with(&namespace) {
        return None;
    }
    if directory.len() == namespace.len() {
        Some(UnitLocation::Direct)
    } else {
        Some(UnitLocation::Nested)
    }
}

/// 全局单元清单，由 `#[component]` 在程序加载时填充
static UNIT_MANIFEST: Lazy<RwLock<Vec<UnitHandle>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// 向全局清单登记一个单元
pub fn submit_unit(unit: UnitHandle) {
    trace!("登记编译单元: {}", unit.path);
    UNIT_MANIFEST.write().push(unit);
}

/// 获取全局清单中的所有单元
pub fn registered_units() -> Vec<UnitHandle> {
    UNIT_MANIFEST.read().clone()
}

fn units_under(source: &str, units: &[UnitHandle], path: &str) -> ContainerResult<Vec<UnitHandle>> {
    if split_segments(path).is_empty() {
        return Err(ContainerError::discovery(path, "扫描路径为空"));
    }

    let found: Vec<UnitHandle> = units
        .iter()
        .filter(|unit| unit.location_in(path).is_some())
        .cloned()
        .collect();

    if found.is_empty() {
        return Err(ContainerError::discovery(
            path,
            format!("来源 {} 中不存在该位置", source),
        ));
    }
    Ok(found)
}

/// 基于全局清单的单元来源
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalUnitSource;

impl UnitSource for GlobalUnitSource {
    fn name(&self) -> &str {
        "global-manifest"
    }

    fn list_units_under(&self, path: &str) -> ContainerResult<Vec<UnitHandle>> {
        let units = UNIT_MANIFEST.read();
        units_under(self.name(), &units, path)
    }
}

/// 手写清单的单元来源
#[derive(Debug, Clone, Default)]
pub struct ManifestUnitSource {
    name: String,
    units: Vec<UnitHandle>,
}

impl ManifestUnitSource {
    /// 创建新的清单来源
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: Vec::new(),
        }
    }

    /// 添加单元
    pub fn with_unit(mut self, unit: UnitHandle) -> Self {
        self.units.push(unit);
        self
    }

    /// 添加带组件声明的单元
    pub fn with_component(
        self,
        path: impl Into<String>,
        component_type: ComponentType,
        declaration: ComponentDeclaration,
    ) -> Self {
        self.with_unit(UnitHandle::new(path, component_type, Some(declaration)))
    }

    /// 单元数量
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl UnitSource for ManifestUnitSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_units_under(&self, path: &str) -> ContainerResult<Vec<UnitHandle>> {
        units_under(&self.name, &self.units, path)
    }
}
