//! 启动器
//!
//! 负责日志初始化、容器发布、工厂注册和配置中 Verticle 的部署

use crate::deployer::VerticleDeployer;
use container_verticle_factory::ContainerVerticleFactory;
use di_abstractions::{Container, ContainerHandle, VerticleFactory};
use infrastructure_common::{AppConfig, DeploymentResult, LoggingConfig};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// 初始化全局日志订阅器
///
/// `RUST_LOG` 优先于配置中的日志级别。已经初始化过时返回 `false`。
pub fn init_tracing(logging: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    let result = if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    result.is_ok()
}

/// 启动完成后的运行时
#[derive(Debug)]
pub struct VerticleRuntime {
    /// 部署器
    pub deployer: Arc<VerticleDeployer>,
    /// 工厂读取的容器句柄
    pub container_handle: ContainerHandle,
    /// 启动时部署的部署ID
    pub deployment_ids: Vec<Uuid>,
}

impl VerticleRuntime {
    /// 取消所有部署
    pub async fn shutdown(&self) -> DeploymentResult<()> {
        info!("关闭运行时，取消 {} 个部署", self.deployer.len());
        self.deployer.undeploy_all().await
    }
}

/// Verticle 启动器
///
/// 协调容器发布、工厂注册和配置部署的顺序
pub struct VerticleBootstrapper {
    /// 应用配置
    config: AppConfig,
    /// 容器句柄
    container_handle: ContainerHandle,
    /// 待发布的容器
    container: Option<Arc<dyn Container>>,
    /// 额外的工厂
    factories: Vec<Arc<dyn VerticleFactory>>,
}

impl VerticleBootstrapper {
    /// 创建新的启动器
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            container_handle: ContainerHandle::new(),
            container: None,
            factories: Vec::new(),
        }
    }

    /// 设置启动时发布的容器
    pub fn with_container(mut self, container: Arc<dyn Container>) -> Self {
        self.container = Some(container);
        self
    }

    /// 使用外部提供的容器句柄
    pub fn with_container_handle(mut self, handle: ContainerHandle) -> Self {
        self.container_handle = handle;
        self
    }

    /// 添加额外的工厂
    pub fn with_factory(mut self, factory: Arc<dyn VerticleFactory>) -> Self {
        self.factories.push(factory);
        self
    }

    /// 启动
    pub async fn bootstrap(self) -> DeploymentResult<VerticleRuntime> {
        info!("开始启动 Verticle 运行时");

        // 第一步：发布容器，必须早于任何解析请求
        if let Some(container) = self.container {
            debug!("发布容器，共 {} 个组件", container.component_names().len());
            self.container_handle.set(container);
        }

        // 第二步：注册工厂
        let deployer = Arc::new(VerticleDeployer::new());
        deployer.register_factory(Arc::new(ContainerVerticleFactory::with_source(
            self.container_handle.clone(),
        )));
        for factory in self.factories {
            deployer.register_factory(factory);
        }

        // 第三步：部署配置中的 Verticle
        let deployment_ids = deployer.deploy_configured(&self.config).await?;

        info!("Verticle 运行时启动完成，部署 {} 项", deployment_ids.len());
        Ok(VerticleRuntime {
            deployer,
            container_handle: self.container_handle,
            deployment_ids,
        })
    }
}
