//! # Container Verticle Factory
//!
//! 通过依赖注入容器按名称获取 Verticle 的工厂。
//!
//! 标识符形如 `di:<name>`，`<name>` 必须是容器内的组件定义名称，
//! 并且该定义必须是瞬时生命周期：运行时假定每次创建都得到独立实例，
//! 单例定义会让多个部署共享同一个实例。
//!
//! ```rust,no_run
//! use container_verticle_factory::ContainerVerticleFactory;
//! use di_abstractions::{ContainerHandle, ResolveContext, VerticleFactory};
//!
//! let handle = ContainerHandle::new();
//! let factory = ContainerVerticleFactory::with_source(handle.clone());
//! // 启动代码稍后调用 handle.set(container)
//! let verticle = factory.create_verticle("di:worker", &ResolveContext::default());
//! ```

use di_abstractions::{
    remove_prefix, Container, ContainerSource, GlobalContainerProvider, ResolveContext,
    VerticleFactory,
};
use infrastructure_common::{FactoryError, FactoryResult, VerticleRef};
use std::sync::Arc;

/// 工厂声明的前缀
pub const PREFIX: &str = "di";

/// 基于容器的 Verticle 工厂
///
/// 工厂本身不持有状态，每次解析都向 [`ContainerSource`] 索取当前容器。
#[derive(Debug, Clone, Default)]
pub struct ContainerVerticleFactory<S = GlobalContainerProvider> {
    source: S,
}

impl ContainerVerticleFactory<GlobalContainerProvider> {
    /// 创建读取进程级全局容器的工厂
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ContainerSource> ContainerVerticleFactory<S> {
    /// 创建使用指定容器来源的工厂
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// 按标识符解析 Verticle
    pub fn resolve(&self, identifier: &str) -> FactoryResult<VerticleRef> {
        let name = strip_name(identifier)?;
        let container = self.container()?;

        if !container.contains(name) {
            return Err(FactoryError::invalid_argument(format!(
                "没有找到组件定义: {name}"
            )));
        }

        if !container.is_transient(name)? {
            return Err(FactoryError::invalid_argument(format!(
                "组件定义 {name} 必须使用瞬时生命周期"
            )));
        }

        Ok(container.instantiate(name)?)
    }

    fn container(&self) -> Result<Arc<dyn Container>, FactoryError> {
        self.source
            .current()
            .ok_or_else(|| FactoryError::illegal_state("尚未配置容器实例"))
    }
}

impl<S: ContainerSource> VerticleFactory for ContainerVerticleFactory<S> {
    fn prefix(&self) -> &str {
        PREFIX
    }

    fn blocking_create(&self) -> bool {
        true
    }

    fn create_verticle(
        &self,
        identifier: &str,
        _context: &ResolveContext,
    ) -> FactoryResult<VerticleRef> {
        self.resolve(identifier)
    }
}

/// 去掉前缀，返回容器内的组件名称
fn strip_name(identifier: &str) -> Result<&str, FactoryError> {
    if identifier.is_empty() {
        return Err(FactoryError::invalid_argument("Verticle 名称不能为空"));
    }

    let name = remove_prefix(identifier);
    if name.trim().is_empty() || identifier == PREFIX {
        return Err(FactoryError::invalid_argument(
            "Verticle 名称不能只有前缀",
        ));
    }

    Ok(name)
}

#[cfg(test)]
mod tests;
