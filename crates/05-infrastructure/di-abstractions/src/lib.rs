//! # Dependency Injection Abstractions
//! 
//! 依赖注入抽象层，定义组件注册、扫描和 Bean 创建的核心接口。
//! 
//! ## 核心接口
//! 
//! - [`ComponentRegistry`] - 组件定义注册表接口
//! - [`ComponentScanner`] - 组件扫描器接口
//! - [`BeanResolver`] - 按名称解析 Bean 的接口
//! - [`BeanFactory`] - Bean 创建（生命周期引擎）接口
//! - [`BeanContainer`] - 容器查询接口

pub mod registry;
pub mod scanner;
pub mod resolver;
pub mod factory;
pub mod processor;
pub mod container;

pub use registry::*;
pub use scanner::*;
pub use resolver::*;
pub use factory::*;
pub use processor::*;
pub use container::*;
