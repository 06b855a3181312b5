//! 示例组件
//!
//! 所有组件位于 `example_app::service`，由 [`AppConfig`](crate::AppConfig) 扫描

use component_macros::component;
use di_impl::{LoggingInterceptor, ProxyingPostProcessor};
use infrastructure_common::{
    Autowired, Bean, BoxError, ContainerResult, NameAware, PostConstructible, PostProcessor,
};
use tracing::info;

/// 订单服务
#[derive(Debug, Default)]
#[component("order_service")]
pub struct OrderService;

impl OrderService {
    pub fn describe(&self) -> &'static str {
        "OrderService"
    }
}

/// 用户服务
#[derive(Debug, Default)]
#[component("user_service", name_aware, post_construct)]
pub struct UserService {
    #[autowired]
    order_service: Option<Autowired<OrderService>>,
    bean_name: String,
}

impl UserService {
    pub fn test(&self) {
        let order_service = self
            .order_service
            .as_ref()
            .map(|service| service.describe())
            .unwrap_or("<未注入>");
        info!("order_service = {}", order_service);
        info!("bean_name = {}", self.bean_name);
    }

    pub fn bean_name(&self) -> &str {
        &self.bean_name
    }
}

impl NameAware for UserService {
    fn set_bean_name(&mut self, name: &str) {
        self.bean_name = name.to_string();
    }
}

impl PostConstructible for UserService {
    fn after_properties_set(&mut self) -> Result<(), BoxError> {
        info!("UserService 初始化完成");
        Ok(())
    }
}

/// 初始化前改写 user_service 的名称
#[derive(Debug, Default)]
#[component("renaming_post_processor", post_processor)]
pub struct RenamingPostProcessor;

impl PostProcessor for RenamingPostProcessor {
    fn post_process_before_initialization(
        &self,
        mut bean: Box<dyn Bean>,
        bean_name: &str,
    ) -> ContainerResult<Box<dyn Bean>> {
        info!("before initializing: {}", bean_name);
        if bean_name == "user_service" {
            if let Some(user_service) = bean.downcast_mut::<UserService>() {
                user_service.set_bean_name("hello");
            }
        }
        Ok(bean)
    }

    fn post_process_after_initialization(
        &self,
        bean: Box<dyn Bean>,
        bean_name: &str,
    ) -> ContainerResult<Box<dyn Bean>> {
        info!("initialized: {}", bean_name);
        Ok(bean)
    }
}

/// 初始化后用日志代理替换 user_service
#[derive(Debug, Default)]
#[component("user_service_proxy", post_processor)]
pub struct UserServiceProxy(ProxyingPostProcessor<UserService, LoggingInterceptor>);

impl PostProcessor for UserServiceProxy {
    fn post_process_after_initialization(
        &self,
        bean: Box<dyn Bean>,
        bean_name: &str,
    ) -> ContainerResult<Box<dyn Bean>> {
        self.0.post_process_after_initialization(bean, bean_name)
    }
}
