//! # 依赖注入具体实现
//!
//! 提供组件定义注册表、命名空间扫描器、生命周期引擎、代理适配器以及
//! 作为容器入口的 [`ApplicationContext`]。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use di_abstractions::BeanContainer;
//! use di_impl::ApplicationContext;
//! use infrastructure_common::ScanMarker;
//!
//! let context = ApplicationContext::new(&ScanMarker::new("example_app.service"))?;
//! let user_service = context.get_bean("user_service")?;
//! ```

pub mod context;
pub mod engine;
pub mod proxy;
pub mod registry;
pub mod scanner;

pub use context::ApplicationContext;
pub use engine::LifecycleEngine;
pub use proxy::{BeanProxy, Interceptor, LoggingInterceptor, ProxyingPostProcessor};
pub use registry::DefinitionRegistry;
pub use scanner::NamespaceScanner;
