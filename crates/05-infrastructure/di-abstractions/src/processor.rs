//! 后置处理器管线

use infrastructure_common::{Bean, ContainerResult, PostProcessor};
use std::sync::Arc;
use tracing::trace;

/// 后置处理器列表
///
/// 顺序即扫描时的发现顺序；扫描完成后不可变，可在线程间共享
#[derive(Debug, Clone, Default)]
pub struct PostProcessorList {
    processors: Arc<[Arc<dyn PostProcessor>]>,
}

impl PostProcessorList {
    /// 由处理器序列创建列表
    pub fn new(processors: Vec<Arc<dyn PostProcessor>>) -> Self {
        Self {
            processors: processors.into(),
        }
    }

    /// 处理器数量
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// 按顺序遍历处理器
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn PostProcessor>> {
        self.processors.iter()
    }

    /// 依次调用初始化前处理，每次的返回值作为下一个处理器的输入
    pub fn apply_before_initialization(
        &self,
        mut bean: Box<dyn Bean>,
        bean_name: &str,
    ) -> ContainerResult<Box<dyn Bean>> {
        for (index, processor) in self.processors.iter().enumerate() {
            trace!("初始化前处理: {} [{}] {:?}", bean_name, index, processor);
            bean = processor.post_process_before_initialization(bean, bean_name)?;
        }
        Ok(bean)
    }

    /// 依次调用初始化后处理，语义同初始化前处理
    pub fn apply_after_initialization(
        &self,
        mut bean: Box<dyn Bean>,
        bean_name: &str,
    ) -> ContainerResult<Box<dyn Bean>> {
        for (index, processor) in self.processors.iter().enumerate() {
            trace!("初始化后处理: {} [{}] {:?}", bean_name, index, processor);
            bean = processor.post_process_after_initialization(bean, bean_name)?;
        }
        Ok(bean)
    }
}

impl From<Vec<Arc<dyn PostProcessor>>> for PostProcessorList {
    fn from(processors: Vec<Arc<dyn PostProcessor>>) -> Self {
        Self::new(processors)
    }
}
