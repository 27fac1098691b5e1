//! 依赖注入容器抽象接口
//!
//! 提供按名称查找组件定义的核心抽象

use infrastructure_common::{DependencyResult, Lifetime, VerticleRef};

/// 依赖注入容器 trait
///
/// 组件定义按名称注册。实现者负责生命周期管理以及
/// 将定义实例化为 [`Verticle`](infrastructure_common::Verticle) 时的类型检查。
pub trait Container: Send + Sync {
    /// 是否存在指定名称的组件定义
    fn contains(&self, name: &str) -> bool;

    /// 获取组件定义的生命周期
    ///
    /// 名称未注册时返回 [`ComponentNotRegistered`](infrastructure_common::DependencyError::ComponentNotRegistered)。
    fn lifetime_of(&self, name: &str) -> DependencyResult<Lifetime>;

    /// 组件定义是否为瞬时生命周期（每次请求创建新实例）
    fn is_transient(&self, name: &str) -> DependencyResult<bool> {
        self.lifetime_of(name).map(Lifetime::is_transient)
    }

    /// 按名称实例化 Verticle
    ///
    /// 名称未注册、创建失败或定义不是 Verticle 时返回错误。
    fn instantiate(&self, name: &str) -> DependencyResult<VerticleRef>;

    /// 所有已注册的组件名称
    fn component_names(&self) -> Vec<String>;
}
