//! # Infrastructure Common
//!
//! 这个 crate 提供了容器化 Verticle 工厂的公共 traits 和类型。
//!
//! ## 核心组件
//!
//! - [`Verticle`] - 可部署运行单元的基础 trait
//! - [`Lifetime`] - 组件生命周期（单例 / 瞬时）
//! - [`ComponentDescriptor`] - 容器内组件定义的描述符
//! - [`FactoryError`] / [`DependencyError`] - 工厂与容器的错误类型
//! - [`AppConfig`] - 部署配置
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 容器能力通过 trait 显式表达，不依赖反射或强制类型转换
//! - 运行时与容器之间没有隐藏的全局耦合

pub mod component;
pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use component::*;
pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
