//! 容器、工厂与部署器的端到端测试

use async_trait::async_trait;
use container_verticle_factory::{ContainerVerticleFactory, PREFIX};
use di_abstractions::{ContainerHandle, ResolveContext, VerticleFactory};
use di_impl::DiContainerImpl;
use infrastructure_common::{
    AppConfig, BoxError, DeploymentConfig, DeploymentError, FactoryError, Lifetime, Verticle,
    VerticleContext,
};
use infrastructure_composition::VerticleBootstrapper;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 测试 Verticle
#[derive(Debug)]
struct CountingVerticle {
    running: Arc<AtomicUsize>,
}

#[async_trait]
impl Verticle for CountingVerticle {
    fn name(&self) -> &str {
        "CountingVerticle"
    }

    async fn start(&self, _context: &VerticleContext) -> Result<(), BoxError> {
        self.running.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<(), BoxError> {
        self.running.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

fn scenario_container(running: &Arc<AtomicUsize>) -> anyhow::Result<DiContainerImpl> {
    let worker = Arc::clone(running);
    let shared = Arc::clone(running);
    let container = DiContainerImpl::builder()
        .verticle("worker", Lifetime::Transient, move || {
            Ok(CountingVerticle {
                running: Arc::clone(&worker),
            })
        })
        .verticle("shared", Lifetime::Singleton, move || {
            Ok(CountingVerticle {
                running: Arc::clone(&shared),
            })
        })
        .build()?;
    Ok(container)
}

#[test]
fn test_resolution_scenario() -> anyhow::Result<()> {
    let running = Arc::new(AtomicUsize::new(0));
    let handle = ContainerHandle::with_container(Arc::new(scenario_container(&running)?));
    let factory = ContainerVerticleFactory::with_source(handle);
    let context = ResolveContext::default();

    assert_eq!(factory.prefix(), PREFIX);
    assert!(factory.blocking_create());

    let a = factory.create_verticle("di:worker", &context)?;
    let b = factory.create_verticle("di:worker", &context)?;
    assert!(!Arc::ptr_eq(&a, &b));

    for identifier in ["di:shared", "di:", "di:ghost", "di", ""] {
        let error = factory.create_verticle(identifier, &context).unwrap_err();
        assert!(
            matches!(error, FactoryError::InvalidArgument { .. }),
            "{identifier:?} 应该返回参数无效, 实际 {error}"
        );
    }
    Ok(())
}

#[test]
fn test_unset_container_is_illegal_state() {
    let factory = ContainerVerticleFactory::with_source(ContainerHandle::new());
    let error = factory
        .create_verticle("di:worker", &ResolveContext::default())
        .unwrap_err();
    assert!(matches!(error, FactoryError::IllegalState { .. }));
    assert_eq!(factory.prefix(), "di");
}

#[tokio::test]
async fn test_deploy_and_undeploy_through_bootstrapper() -> anyhow::Result<()> {
    let running = Arc::new(AtomicUsize::new(0));
    let config = AppConfig {
        deployments: vec![DeploymentConfig::new("di:worker").with_instances(3)],
        ..AppConfig::default()
    };

    let runtime = VerticleBootstrapper::new(config)
        .with_container(Arc::new(scenario_container(&running)?))
        .bootstrap()
        .await?;
    assert_eq!(running.load(Ordering::SeqCst), 3);

    let extra = runtime.deployer.deploy("di:worker", 1).await?;
    assert_eq!(running.load(Ordering::SeqCst), 4);

    let rejected = runtime.deployer.deploy("di:shared", 1).await.unwrap_err();
    assert!(matches!(
        rejected,
        DeploymentError::CreationFailed {
            source: FactoryError::InvalidArgument { .. },
            ..
        }
    ));

    runtime.deployer.undeploy(extra).await?;
    assert_eq!(running.load(Ordering::SeqCst), 3);

    runtime.shutdown().await?;
    assert_eq!(running.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn test_container_hot_swap() -> anyhow::Result<()> {
    let running = Arc::new(AtomicUsize::new(0));
    let handle = ContainerHandle::with_container(Arc::new(DiContainerImpl::new()));

    let runtime = VerticleBootstrapper::new(AppConfig::default())
        .with_container_handle(handle.clone())
        .bootstrap()
        .await?;

    assert!(runtime.deployer.deploy("di:worker", 1).await.is_err());

    handle.set(Arc::new(scenario_container(&running)?));
    runtime.deployer.deploy("di:worker", 2).await?;
    assert_eq!(running.load(Ordering::SeqCst), 2);

    runtime.shutdown().await?;
    Ok(())
}
