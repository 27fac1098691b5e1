//! 进程级容器来源测试
//!
//! 全局槽位在整个测试进程内共享，所有断言放在同一个测试函数中按顺序执行。

use async_trait::async_trait;
use container_verticle_factory::ContainerVerticleFactory;
use di_abstractions::{
    clear_global_container, global_container, set_global_container, ResolveContext,
    VerticleFactory,
};
use di_impl::DiContainerImpl;
use infrastructure_common::{BoxError, FactoryError, Lifetime, Verticle, VerticleContext};
use std::sync::Arc;

#[derive(Debug)]
struct NoopVerticle;

#[async_trait]
impl Verticle for NoopVerticle {
    fn name(&self) -> &str {
        "NoopVerticle"
    }

    async fn start(&self, _context: &VerticleContext) -> Result<(), BoxError> {
        Ok(())
    }
}

#[test]
fn test_global_container_late_binding() -> anyhow::Result<()> {
    let factory = ContainerVerticleFactory::new();
    let context = ResolveContext::default();

    // 未设置全局容器
    clear_global_container();
    assert!(global_container().is_none());
    assert!(matches!(
        factory.create_verticle("di:worker", &context),
        Err(FactoryError::IllegalState { .. })
    ));

    // 工厂创建之后再设置容器
    let container = DiContainerImpl::builder()
        .verticle("worker", Lifetime::Transient, || Ok(NoopVerticle))
        .build()?;
    assert!(set_global_container(Arc::new(container)).is_none());

    let first = factory.create_verticle("di:worker", &context)?;
    let second = factory.create_verticle("di:worker", &context)?;
    assert!(!Arc::ptr_eq(&first, &second));

    // 替换为不包含 worker 的容器
    assert!(set_global_container(Arc::new(DiContainerImpl::new())).is_some());
    assert!(matches!(
        factory.create_verticle("di:worker", &context),
        Err(FactoryError::InvalidArgument { .. })
    ));

    assert!(clear_global_container().is_some());
    assert!(matches!(
        factory.create_verticle("di:worker", &context),
        Err(FactoryError::IllegalState { .. })
    ));
    Ok(())
}
