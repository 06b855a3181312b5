//! Bean 对象模型
//!
//! 提供容器管理的实例所必须实现的基础 trait

use crate::errors::{ContainerError, ContainerResult};
use crate::lifecycle::{NameAware, PostConstructible};
use crate::metadata::{ComponentDeclaration, ComponentType};
use std::any::Any;
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

/// 容器对外暴露的 Bean 引用
pub type BeanRef = Arc<dyn Bean>;

/// 类型擦除辅助 trait
///
/// 对所有 `Any + Send + Sync` 类型自动实现，使 `dyn Bean` 可以向下转型
pub trait AsAny: Any + Send + Sync {
    /// 以 `&dyn Any` 访问
    fn as_any(&self) -> &dyn Any;

    /// 以 `&mut dyn Any` 访问
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// 转换为装箱的 `Any`
    fn into_any_box(self: Box<Self>) -> Box<dyn Any + Send + Sync>;

    /// 转换为共享的 `Any`
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any_box(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Bean 基础 trait
///
/// 所有由容器构造和管理的实例都必须实现此 trait。能力（名称回调、初始化回调）
/// 通过 `as_*` 方法显式声明，默认均不具备。
pub trait Bean: AsAny + Debug {
    /// 注入点列表，每一项是字段名，同时也是被注入 Bean 的名称
    fn injection_points(&self) -> &'static [&'static str] {
        &[]
    }

    /// 将解析到的依赖赋值给指定字段
    fn inject(&mut self, field: &str, _dependency: BeanRef) -> ContainerResult<()> {
        Err(ContainerError::unknown_injection_point(
            std::any::type_name::<Self>(),
            field,
        ))
    }

    /// 名称感知能力
    fn as_name_aware(&mut self) -> Option<&mut dyn NameAware> {
        None
    }

    /// 初始化回调能力
    fn as_post_constructible(&mut self) -> Option<&mut dyn PostConstructible> {
        None
    }

    /// 代理包装的目标实例，非代理返回 `None`
    fn proxied_target(&self) -> Option<&dyn Bean> {
        None
    }
}

impl dyn Bean {
    /// 判断实际类型
    pub fn is<T: Bean>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// 向下转型为具体类型的引用
    pub fn downcast_ref<T: Bean>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// 向下转型为具体类型的可变引用
    pub fn downcast_mut<T: Bean>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// 向下转型为装箱的具体类型，类型不符时返回 `None`
    pub fn downcast_box<T: Bean>(self: Box<Self>) -> Option<Box<T>> {
        AsAny::into_any_box(self).downcast::<T>().ok()
    }

    /// 沿代理链查找指定类型的实例
    pub fn resolve_target<T: Bean>(&self) -> Option<&T> {
        let mut current: &dyn Bean = self;
        loop {
            if let Some(found) = current.downcast_ref::<T>() {
                return Some(found);
            }
            current = current.proxied_target()?;
        }
    }
}

/// 类型化的 Bean 引用
///
/// 持有容器交出的 [`BeanRef`]（可能是代理），通过 `resolve_target` 访问 `T`。
/// 后置处理器替换实例后，持有者看到的仍是替换后的对象
pub struct Autowired<T: Bean> {
    bean: BeanRef,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Bean> Autowired<T> {
    /// 校验 Bean 或其代理目标是 `T`，否则返回 [`ContainerError::TypeMismatch`]
    pub fn new(name: &str, bean: BeanRef) -> ContainerResult<Self> {
        if bean.resolve_target::<T>().is_none() {
            return Err(ContainerError::type_mismatch::<T>(name));
        }
        Ok(Self {
            bean,
            _marker: PhantomData,
        })
    }

    /// 容器中实际缓存的对象
    pub fn bean(&self) -> &BeanRef {
        &self.bean
    }

    /// 是否经过代理
    pub fn is_proxied(&self) -> bool {
        !self.bean.is::<T>()
    }

    /// 是否指向同一个容器对象
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.bean, &other.bean)
    }
}

impl<T: Bean> Deref for Autowired<T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Bean 构造完成后不可变，new 中的校验始终成立
        match self.bean.resolve_target::<T>() {
            Some(target) => target,
            None => unreachable!("Autowired 目标类型已在创建时校验"),
        }
    }
}

impl<T: Bean> Clone for Autowired<T> {
    fn clone(&self) -> Self {
        Self {
            bean: Arc::clone(&self.bean),
            _marker: PhantomData,
        }
    }
}

impl<T: Bean> fmt::Debug for Autowired<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Autowired").field(&self.bean).finish()
    }
}

/// 注入槽 trait
///
/// 注入点字段的类型必须实现此 trait
pub trait InjectionSlot {
    /// 写入依赖
    fn assign(&mut self, field: &str, dependency: BeanRef) -> ContainerResult<()>;
}

impl InjectionSlot for Option<BeanRef> {
    fn assign(&mut self, _field: &str, dependency: BeanRef) -> ContainerResult<()> {
        *self = Some(dependency);
        Ok(())
    }
}

impl<T: Bean> InjectionSlot for Option<Autowired<T>> {
    fn assign(&mut self, field: &str, dependency: BeanRef) -> ContainerResult<()> {
        *self = Some(Autowired::new(field, dependency)?);
        Ok(())
    }
}

/// 组件 trait
///
/// 携带组件声明（名称 + 作用域）的 Bean，通常由 `#[component]` 宏生成
pub trait Component: Bean + Sized {
    /// 注册名称
    const NAME: &'static str;

    /// 作用域声明，`None` 表示默认单例
    const SCOPE: Option<&'static str> = None;

    /// 组件类型句柄
    fn component_type() -> ComponentType;

    /// 组件声明
    fn declaration() -> ComponentDeclaration {
        ComponentDeclaration::new(Self::NAME, Self::SCOPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct OrderService;

    impl Bean for OrderService {}

    #[derive(Debug, Default)]
    struct Wrapper {
        inner: Option<Box<dyn Bean>>,
    }

    impl Bean for Wrapper {
        fn proxied_target(&self) -> Option<&dyn Bean> {
            self.inner.as_deref()
        }
    }

    #[test]
    fn test_downcast_through_dyn_bean() {
        let bean: Box<dyn Bean> = Box::new(OrderService);
        assert!(bean.is::<OrderService>());
        assert!(bean.downcast_ref::<Wrapper>().is_none());
        assert!(bean.downcast_box::<OrderService>().is_some());
    }

    #[test]
    fn test_autowired_reports_type_mismatch() {
        let bean: BeanRef = Arc::new(OrderService);
        let error = Autowired::<Wrapper>::new("orderService", bean).unwrap_err();
        assert!(matches!(error, ContainerError::TypeMismatch { .. }));
    }

    #[test]
    fn test_autowired_sees_through_proxy() {
        let proxy: BeanRef = Arc::new(Wrapper {
            inner: Some(Box::new(OrderService)),
        });
        let handle = Autowired::<OrderService>::new("orderService", proxy.clone()).unwrap();

        assert!(handle.is_proxied());
        assert!(Arc::ptr_eq(handle.bean(), &proxy));
        let _target: &OrderService = &handle;

        let direct = Autowired::<OrderService>::new("orderService", Arc::new(OrderService)).unwrap();
        assert!(!direct.is_proxied());
        assert!(!Autowired::ptr_eq(&handle, &direct));
        assert!(Autowired::ptr_eq(&handle, &handle.clone()));
    }

    #[test]
    fn test_resolve_target_walks_proxy_chain() {
        let wrapper = Wrapper {
            inner: Some(Box::new(Wrapper {
                inner: Some(Box::new(OrderService)),
            })),
        };
        let bean: &dyn Bean = &wrapper;
        assert!(bean.resolve_target::<OrderService>().is_some());
        assert!(bean.resolve_target::<Wrapper>().is_some());
    }

    #[test]
    fn test_injection_slots() {
        let mut untyped: Option<BeanRef> = None;
        untyped.assign("order_service", Arc::new(OrderService)).unwrap();
        assert!(untyped.is_some());

        let mut typed: Option<Autowired<OrderService>> = None;
        typed.assign("order_service", Arc::new(OrderService)).unwrap();
        assert!(typed.is_some());

        let mut wrong: Option<Autowired<Wrapper>> = None;
        assert!(wrong.assign("order_service", Arc::new(OrderService)).is_err());
    }

    #[test]
    fn test_default_bean_rejects_injection() {
        let mut bean = OrderService;
        assert!(bean.injection_points().is_empty());
        assert!(bean.inject("anything", Arc::new(OrderService)).is_err());
    }
}
