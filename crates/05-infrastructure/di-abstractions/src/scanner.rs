//! 组件扫描器抽象接口
//!
//! 提供按命名空间发现组件的能力

use crate::processor::PostProcessorList;
use crate::registry::ComponentRegistry;
use infrastructure_common::{ContainerResult, ScanMarker};

/// 组件扫描器 trait
///
/// 扫描标记指定的命名空间，把发现的组件定义写入注册表，并返回按发现顺序
/// 实例化好的后置处理器列表
pub trait ComponentScanner: Send + Sync {
    /// 扫描并注册
    fn scan(
        &self,
        marker: &ScanMarker,
        registry: &dyn ComponentRegistry,
    ) -> ContainerResult<PostProcessorList>;

    /// 获取扫描器名称
    fn name(&self) -> &str;
}

/// 扫描选项
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// 是否递归扫描子命名空间，默认只扫描直接位于该位置下的单元
    pub recursive: bool,
}

impl ScanOptions {
    /// 设置是否递归扫描
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

/// 单次扫描的统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// 枚举到的单元数量
    pub units_seen: usize,
    /// 注册的组件数量
    pub components_registered: usize,
    /// 实例化的后置处理器数量
    pub post_processors: usize,
    /// 因缺少组件声明而跳过的数量
    pub skipped_undeclared: usize,
    /// 因位于子命名空间而跳过的数量
    pub skipped_nested: usize,
}
