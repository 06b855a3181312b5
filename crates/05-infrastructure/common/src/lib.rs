//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn IoC 容器的公共对象模型和发现原语。
//!
//! ## 核心组件
//!
//! - [`Bean`] - 容器管理的实例对象 trait
//! - [`NameAware`] / [`PostConstructible`] / [`PostProcessor`] - 可选能力接口
//! - [`ComponentType`] - 组件类型句柄（构造函数 + 能力）
//! - [`UnitSource`] - 编译单元发现接口
//! - [`ContainerError`] - 容器错误分类
//!
//! ## 设计原则
//!
//! - 能力通过显式 trait 声明，不依赖运行时反射
//! - 组件发现基于注册清单，而非文件系统布局
//! - 构造期间实例独占可变，构造完成后以 `Arc` 共享只读

pub mod component;
pub mod discovery;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use component::*;
pub use discovery::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
