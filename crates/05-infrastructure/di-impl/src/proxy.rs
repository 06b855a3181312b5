//! 代理适配器
//!
//! [`BeanProxy`] 是包裹真实实例的泛型委托适配器：所有 Bean 能力都转发给目标，
//! 经由 [`BeanProxy::invoke`] 发起的调用会在前后咨询可插拔的 [`Interceptor`]。
//! [`ProxyingPostProcessor`] 在初始化后处理阶段用代理替换匹配类型的实例。

use infrastructure_common::{
    Bean, BeanRef, ContainerError, ContainerResult, NameAware, PostConstructible, PostProcessor,
};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};

/// 拦截策略
pub trait Interceptor: Send + Sync + fmt::Debug {
    /// 调用目标之前
    fn before_invocation(&self, _bean_name: &str, _operation: &str) {}

    /// 调用目标之后
    fn after_invocation(&self, _bean_name: &str, _operation: &str) {}
}

/// 记录每次调用的拦截器
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingInterceptor;

impl Interceptor for LoggingInterceptor {
    fn before_invocation(&self, bean_name: &str, operation: &str) {
        info!("代理逻辑: 调用 {}.{}", bean_name, operation);
    }

    fn after_invocation(&self, bean_name: &str, operation: &str) {
        debug!("代理调用结束: {}.{}", bean_name, operation);
    }
}

/// Bean 代理
#[derive(Debug)]
pub struct BeanProxy<T: Bean> {
    target: T,
    bean_name: String,
    interceptor: Arc<dyn Interceptor>,
}

impl<T: Bean> BeanProxy<T> {
    /// 包裹目标实例
    pub fn new(target: T, bean_name: impl Into<String>, interceptor: Arc<dyn Interceptor>) -> Self {
        Self {
            target,
            bean_name: bean_name.into(),
            interceptor,
        }
    }

    /// 如果实例是 `T`，返回包裹后的代理；否则原样返回
    pub fn wrap(
        bean: Box<dyn Bean>,
        bean_name: &str,
        interceptor: Arc<dyn Interceptor>,
    ) -> ContainerResult<Box<dyn Bean>> {
        if !bean.is::<T>() {
            return Ok(bean);
        }
        let target = bean.downcast_box::<T>().ok_or_else(|| {
            ContainerError::post_processing(bean_name, "无法取出代理目标")
        })?;
        debug!("创建代理: {} -> {}", bean_name, std::any::type_name::<T>());
        Ok(Box::new(Self::new(*target, bean_name, interceptor)))
    }

    /// 经由拦截器调用目标
    pub fn invoke<R>(&self, operation: &str, call: impl FnOnce(&T) -> R) -> R {
        self.interceptor.before_invocation(&self.bean_name, operation);
        let result = call(&self.target);
        self.interceptor.after_invocation(&self.bean_name, operation);
        result
    }

    /// 经由拦截器以可变方式调用目标
    pub fn invoke_mut<R>(&mut self, operation: &str, call: impl FnOnce(&mut T) -> R) -> R {
        self.interceptor.before_invocation(&self.bean_name, operation);
        let result = call(&mut self.target);
        self.interceptor.after_invocation(&self.bean_name, operation);
        result
    }

    /// 不经拦截直接访问目标
    pub fn target(&self) -> &T {
        &self.target
    }

    /// 被代理 Bean 的名称
    pub fn bean_name(&self) -> &str {
        &self.bean_name
    }
}

impl<T: Bean> Bean for BeanProxy<T> {
    fn injection_points(&self) -> &'static [&'static str] {
        self.target.injection_points()
    }

    fn inject(&mut self, field: &str, dependency: BeanRef) -> ContainerResult<()> {
        self.target.inject(field, dependency)
    }

    fn as_name_aware(&mut self) -> Option<&mut dyn NameAware> {
        self.target.as_name_aware()
    }

    fn as_post_constructible(&mut self) -> Option<&mut dyn PostConstructible> {
        self.target.as_post_constructible()
    }

    fn proxied_target(&self) -> Option<&dyn Bean> {
        Some(&self.target)
    }
}

/// 用代理替换 `T` 实例的后置处理器
///
/// 拦截器 `I` 在处理器创建时实例化，所有代理共享同一个拦截器
pub struct ProxyingPostProcessor<T, I> {
    interceptor: Arc<dyn Interceptor>,
    _marker: PhantomData<fn() -> (T, I)>,
}

impl<T: Bean, I: Interceptor + Default + 'static> ProxyingPostProcessor<T, I> {
    /// 创建新的代理处理器
    pub fn new() -> Self {
        Self {
            interceptor: Arc::new(I::default()),
            _marker: PhantomData,
        }
    }
}

impl<T: Bean, I: Interceptor + Default + 'static> Default for ProxyingPostProcessor<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I> fmt::Debug for ProxyingPostProcessor<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyingPostProcessor")
            .field("target", &std::any::type_name::<T>())
            .field("interceptor", &self.interceptor)
            .finish()
    }
}

impl<T: Bean, I: 'static> Bean for ProxyingPostProcessor<T, I> {}

impl<T: Bean, I: 'static> PostProcessor for ProxyingPostProcessor<T, I> {
    fn post_process_after_initialization(
        &self,
        bean: Box<dyn Bean>,
        bean_name: &str,
    ) -> ContainerResult<Box<dyn Bean>> {
        BeanProxy::<T>::wrap(bean, bean_name, self.interceptor.clone())
    }
}
