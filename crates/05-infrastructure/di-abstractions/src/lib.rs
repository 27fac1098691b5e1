//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义容器查找与 Verticle 工厂的核心接口。
//!
//! ## 核心接口
//!
//! - [`Container`] - 按名称查找组件定义并实例化的容器接口
//! - [`ContainerSource`] - 提供当前活动容器的来源
//! - [`VerticleFactory`] - 运行时调用的 Verticle 工厂接口
//! - [`ResolveContext`] - 运行时传给工厂的解析上下文

pub mod container;
pub mod factory;
pub mod provider;
pub mod resolver;

pub use container::*;
pub use factory::*;
pub use provider::*;
pub use resolver::*;
