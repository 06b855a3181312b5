//! 组件宏集成测试
//!
//! 组件由 `#[component]` 声明，程序加载时登记到全局清单，容器通过
//! `GlobalUnitSource` 扫描 `integration_tests.services`。

use component_macros::component_scan;
use di_abstractions::{BeanContainer, ContainerConfig};
use di_impl::{ApplicationContext, BeanProxy};
use infrastructure_common::{
    registered_units, Autowired, Component, ComponentScan, ContainerError, GlobalUnitSource, ScanMarker,
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .try_init()
            .ok();
    });
}

#[component_scan("integration_tests.services")]
struct ServicesConfig;

mod services {
    use component_macros::component;
    use infrastructure_common::{
        Autowired, Bean, BeanRef, BoxError, ContainerResult, NameAware, PostConstructible, PostProcessor,
    };
    use di_impl::{Interceptor, ProxyingPostProcessor};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    #[component("order_service")]
    pub struct OrderService;

    impl OrderService {
        pub fn place(&self, item: &str) -> String {
            format!("order:{item}")
        }
    }

    #[derive(Debug, Default)]
    #[component("user_service", name_aware, post_construct)]
    pub struct UserService {
        #[autowired]
        pub order_service: Option<Autowired<OrderService>>,
        pub bean_name: String,
        pub greeting: Option<String>,
    }

    impl UserService {
        pub fn checkout(&self, item: &str) -> Option<String> {
            self.order_service.as_ref().map(|orders| orders.place(item))
        }
    }

    impl NameAware for UserService {
        fn set_bean_name(&mut self, name: &str) {
            self.bean_name = name.to_string();
        }
    }

    impl PostConstructible for UserService {
        fn after_properties_set(&mut self) -> Result<(), BoxError> {
            self.greeting = Some(format!("hello from {}", self.bean_name));
            Ok(())
        }
    }

    pub static TICKETS_ISSUED: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug)]
    #[component("ticket", scope = "prototype", constructor = "Ticket::issue")]
    pub struct Ticket {
        pub number: usize,
        #[autowired]
        pub user_service: Option<BeanRef>,
    }

    impl Ticket {
        fn issue() -> Result<Self, BoxError> {
            Ok(Self {
                number: TICKETS_ISSUED.fetch_add(1, Ordering::SeqCst),
                user_service: None,
            })
        }
    }

    /// 统计经过的 Bean
    #[derive(Debug, Default)]
    #[component("audit_processor", post_processor)]
    pub struct AuditProcessor;

    impl PostProcessor for AuditProcessor {
        fn post_process_before_initialization(
            &self,
            mut bean: Box<dyn Bean>,
            _bean_name: &str,
        ) -> ContainerResult<Box<dyn Bean>> {
            if let Some(user) = bean.downcast_mut::<UserService>() {
                user.set_bean_name("hello");
            }
            Ok(bean)
        }
    }

    #[derive(Debug, Default)]
    pub struct CountingInterceptor;

    pub static INVOCATIONS: AtomicUsize = AtomicUsize::new(0);

    impl Interceptor for CountingInterceptor {
        fn before_invocation(&self, _bean_name: &str, _operation: &str) {
            INVOCATIONS.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Debug, Default)]
    #[component("greeter")]
    pub struct Greeter;

    impl Greeter {
        pub fn greet(&self, who: &str) -> String {
            format!("hi {who}")
        }
    }

    pub type GreeterProxyProcessor = ProxyingPostProcessor<Greeter, CountingInterceptor>;

    /// 类型别名无法直接加属性，这里用一个包装类型登记代理处理器
    #[derive(Debug, Default)]
    #[component("greeter_proxy", post_processor)]
    pub struct GreeterProxy(GreeterProxyProcessor);

    impl PostProcessor for GreeterProxy {
        fn post_process_after_initialization(
            &self,
            bean: Box<dyn Bean>,
            bean_name: &str,
        ) -> ContainerResult<Box<dyn Bean>> {
            self.0.post_process_after_initialization(bean, bean_name)
        }
    }

    pub mod internal {
        use component_macros::component;

        /// 位于子命名空间，非递归扫描时不可见
        #[derive(Debug, Default)]
        #[component("hidden")]
        pub struct Hidden;
    }
}

use services::{Greeter, Ticket, UserService};

fn start() -> ApplicationContext {
    init_test_logger();
    ApplicationContext::from_config::<ServicesConfig>().unwrap()
}

#[test]
fn test_component_declarations() {
    assert_eq!(UserService::NAME, "user_service");
    assert_eq!(Ticket::SCOPE, Some("prototype"));
    assert_eq!(ServicesConfig::base_package(), "integration_tests.services");

    let component_type = services::AuditProcessor::component_type();
    assert!(component_type.is_post_processor());
}

#[test]
fn test_units_registered_at_load_time() {
    let paths: Vec<String> = registered_units().into_iter().map(|unit| unit.path).collect();
    assert!(paths.contains(&"integration_tests/services/UserService".to_string()));
    assert!(paths.contains(&"integration_tests/services/internal/Hidden".to_string()));
}

#[test]
fn test_scan_is_not_recursive_by_default() {
    let context = start();

    assert!(context.contains_bean("user_service"));
    assert!(!context.contains_bean("hidden"));
    assert!(context.get_bean("hidden").unwrap_err().is_bean_not_found());
}

#[test]
fn test_recursive_scan_finds_nested_components() {
    let config = ContainerConfig {
        recursive_scan: true,
        ..Default::default()
    };
    let context = ApplicationContext::with_source(
        &ServicesConfig::scan_marker(),
        Arc::new(GlobalUnitSource),
        config,
    )
    .unwrap();

    assert!(context.contains_bean("hidden"));
}

#[test]
fn test_autowired_singleton_and_callbacks() {
    let context = start();

    let user = context.get_bean_as::<UserService>("user_service").unwrap();
    let order = context.get_bean_as::<services::OrderService>("order_service").unwrap();

    assert!(Autowired::ptr_eq(user.order_service.as_ref().unwrap(), &order));
    assert_eq!(user.checkout("book").as_deref(), Some("order:book"));
    // 名称回调之后、初始化之前被后置处理器改写
    assert_eq!(user.bean_name, "hello");
    assert_eq!(user.greeting.as_deref(), Some("hello from hello"));
}

#[test]
fn test_prototype_with_custom_constructor() {
    let context = start();

    let first = context.get_bean_as::<Ticket>("ticket").unwrap();
    let second = context.get_bean_as::<Ticket>("ticket").unwrap();

    assert_ne!(first.number, second.number);
    let first_user = first.user_service.clone().unwrap();
    let second_user = second.user_service.clone().unwrap();
    assert!(Arc::ptr_eq(&first_user, &second_user));
    assert!(context.is_prototype("ticket").unwrap());
}

#[test]
fn test_proxy_replaces_instance() {
    let context = start();

    let bean = context.get_bean("greeter").unwrap();
    let proxy = bean.downcast_ref::<BeanProxy<Greeter>>().unwrap();

    let before = services::INVOCATIONS.load(std::sync::atomic::Ordering::SeqCst);
    assert_eq!(proxy.invoke("greet", |greeter| greeter.greet("bob")), "hi bob");
    assert!(services::INVOCATIONS.load(std::sync::atomic::Ordering::SeqCst) > before);

    let typed = context.get_bean_as::<Greeter>("greeter").unwrap();
    assert!(typed.is_proxied());
    assert!(Arc::ptr_eq(typed.bean(), &bean));
    assert_eq!(typed.greet("ann"), "hi ann");
    assert!(matches!(
        context.get_bean_as::<services::OrderService>("greeter").unwrap_err(),
        ContainerError::TypeMismatch { .. }
    ));
}

#[test]
fn test_unknown_bean() {
    let context = start();
    assert!(matches!(
        context.get_bean("doesNotExist").unwrap_err(),
        ContainerError::BeanNotFound { .. }
    ));
}

#[test]
fn test_marker_for_missing_namespace() {
    let error = ApplicationContext::new(&ScanMarker::new("integration_tests.nowhere")).unwrap_err();
    assert!(matches!(error, ContainerError::Discovery { .. }));
}
