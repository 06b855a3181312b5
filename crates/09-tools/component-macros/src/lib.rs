//! # Component Macros
//!
//! 这个 crate 提供了用于组件声明和扫描配置的过程宏。
//!
//! ## 核心宏
//!
//! - [`component`] - 组件声明宏，生成 `Bean`/`Component` 实现并在程序加载时登记
//! - [`component_scan`] - 扫描配置宏，指定要扫描的基础命名空间
//!
//! 使用宏的 crate 需要同时依赖 `infrastructure-common` 和 `ctor`。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{component, component_scan};
//! use infrastructure_common::{Autowired, BoxError, NameAware, PostConstructible};
//!
//! #[component_scan("example_app.service")]
//! pub struct AppConfig;
//!
//! #[derive(Debug, Default)]
//! #[component("order_service", scope = "prototype")]
//! pub struct OrderService;
//!
//! #[derive(Debug, Default)]
//! #[component("user_service", name_aware, post_construct)]
//! pub struct UserService {
//!     #[autowired]
//!     order_service: Option<Autowired<OrderService>>,
//!     bean_name: String,
//! }
//! ```

use proc_macro::TokenStream;

mod component;
mod scan;
mod utils;

/// 组件声明宏
///
/// 为结构体实现 `Bean` 和 `Component`，并通过 `ctor` 在程序加载时把它登记到
/// 全局单元清单，单元路径由 `module_path!()` 与类型名组成。
///
/// # 参数
///
/// - `"name"` 或 `name = "name"` - 注册名称，缺省为 snake_case 的类型名
/// - `scope = "singleton" | "prototype"` - 作用域（默认单例），其它值在扫描时报错
/// - `name_aware` - 类型实现了 `NameAware`
/// - `post_construct` - 类型实现了 `PostConstructible`
/// - `post_processor` - 类型实现了 `PostProcessor`，扫描时立即实例化
/// - `constructor = "path::to::fn"` - 自定义零参数构造函数，返回 `Result<Self, E>`
/// - `no_default` - 没有零参数构造函数
///
/// 字段上的 `#[autowired]` 声明注入点，按字段名解析依赖，字段类型须为
/// `Option<Autowired<T>>` 或 `Option<BeanRef>`，依赖被代理时仍可按目标类型访问。
#[proc_macro_attribute]
pub fn component(args: TokenStream, input: TokenStream) -> TokenStream {
    component::component_impl(args, input)
}

/// 扫描配置宏
///
/// # 示例
///
/// ```rust,ignore
/// #[component_scan("example_app.service")]
/// pub struct AppConfig;
/// ```
#[proc_macro_attribute]
pub fn component_scan(args: TokenStream, input: TokenStream) -> TokenStream {
    scan::component_scan_impl(args, input)
}
