//! 容器来源
//!
//! 工厂每次解析时都向来源索取当前活动容器，不跨调用持有容器引用，
//! 因此容器可以在运行期间被替换。

use crate::container::Container;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// 容器来源 trait
pub trait ContainerSource: Send + Sync {
    /// 当前活动容器，未设置时返回 `None`
    fn current(&self) -> Option<Arc<dyn Container>>;
}

impl ContainerSource for Arc<dyn Container> {
    fn current(&self) -> Option<Arc<dyn Container>> {
        Some(Arc::clone(self))
    }
}

/// 显式传递的容器句柄
///
/// 克隆后的句柄共享同一个槽位，启动代码设置容器后所有持有者立即可见。
#[derive(Clone, Default)]
pub struct ContainerHandle {
    slot: Arc<RwLock<Option<Arc<dyn Container>>>>,
}

impl ContainerHandle {
    /// 创建未设置容器的句柄
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建已设置容器的句柄
    pub fn with_container(container: Arc<dyn Container>) -> Self {
        let handle = Self::new();
        handle.set(container);
        handle
    }

    /// 设置容器，返回之前的容器
    pub fn set(&self, container: Arc<dyn Container>) -> Option<Arc<dyn Container>> {
        self.slot.write().replace(container)
    }

    /// 清除容器，返回之前的容器
    pub fn clear(&self) -> Option<Arc<dyn Container>> {
        self.slot.write().take()
    }

    /// 是否已设置容器
    pub fn is_set(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl ContainerSource for ContainerHandle {
    fn current(&self) -> Option<Arc<dyn Container>> {
        self.slot.read().clone()
    }
}

impl fmt::Debug for ContainerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerHandle")
            .field("is_set", &self.is_set())
            .finish()
    }
}

/// 全局容器槽位
static GLOBAL_CONTAINER: Lazy<RwLock<Option<Arc<dyn Container>>>> =
    Lazy::new(|| RwLock::new(None));

/// 设置全局容器，返回之前的容器
pub fn set_global_container(container: Arc<dyn Container>) -> Option<Arc<dyn Container>> {
    GLOBAL_CONTAINER.write().replace(container)
}

/// 清除全局容器，返回之前的容器
pub fn clear_global_container() -> Option<Arc<dyn Container>> {
    GLOBAL_CONTAINER.write().take()
}

/// 获取全局容器
pub fn global_container() -> Option<Arc<dyn Container>> {
    GLOBAL_CONTAINER.read().clone()
}

/// 进程级容器来源
///
/// 读取由 [`set_global_container`] 设置的容器。
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalContainerProvider;

impl ContainerSource for GlobalContainerProvider {
    fn current(&self) -> Option<Arc<dyn Container>> {
        global_container()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_common::{DependencyError, Lifetime, VerticleRef};

    struct EmptyContainer;

    impl Container for EmptyContainer {
        fn contains(&self, _name: &str) -> bool {
            false
        }

        fn lifetime_of(&self, name: &str) -> Result<Lifetime, DependencyError> {
            Err(DependencyError::not_registered(name))
        }

        fn instantiate(&self, name: &str) -> Result<VerticleRef, DependencyError> {
            Err(DependencyError::not_registered(name))
        }

        fn component_names(&self) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_handle_starts_empty() {
        let handle = ContainerHandle::new();
        assert!(!handle.is_set());
        assert!(handle.current().is_none());
    }

    #[test]
    fn test_cloned_handles_share_the_slot() {
        let handle = ContainerHandle::new();
        let observer = handle.clone();

        let container: Arc<dyn Container> = Arc::new(EmptyContainer);
        assert!(handle.set(Arc::clone(&container)).is_none());

        let current = observer.current().expect("容器应该已设置");
        assert!(Arc::ptr_eq(&current, &container));

        let previous = observer.clear().expect("应该返回之前的容器");
        assert!(Arc::ptr_eq(&previous, &container));
        assert!(!handle.is_set());
    }

    #[test]
    fn test_handle_swap_replaces_container() {
        let first: Arc<dyn Container> = Arc::new(EmptyContainer);
        let second: Arc<dyn Container> = Arc::new(EmptyContainer);
        let handle = ContainerHandle::with_container(Arc::clone(&first));

        let previous = handle.set(Arc::clone(&second)).unwrap();
        assert!(Arc::ptr_eq(&previous, &first));
        assert!(Arc::ptr_eq(&handle.current().unwrap(), &second));
    }

    #[test]
    fn test_fixed_container_source() {
        let container: Arc<dyn Container> = Arc::new(EmptyContainer);
        let current = container.current().unwrap();
        assert!(Arc::ptr_eq(&current, &container));
    }
}
