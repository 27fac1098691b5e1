//! Verticle 部署器
//!
//! 按标识符前缀选择工厂、创建并启动 Verticle 实例，管理部署的生命周期。

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use di_abstractions::{prefix_of, ResolveContext, VerticleFactory};
use infrastructure_common::{
    AppConfig, DeploymentConfig, DeploymentError, DeploymentResult, VerticleContext, VerticleRef,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// 一次部署的运行时记录
struct Deployment {
    identifier: String,
    deployed_at: DateTime<Utc>,
    instances: Vec<VerticleRef>,
}

/// 部署摘要
#[derive(Debug, Clone)]
pub struct DeploymentInfo {
    /// 部署ID
    pub id: Uuid,
    /// 部署标识符
    pub identifier: String,
    /// 实例数
    pub instances: usize,
    /// 各实例的 Verticle 名称
    pub verticle_names: Vec<String>,
    /// 部署时间
    pub deployed_at: DateTime<Utc>,
}

/// Verticle 部署器
#[derive(Default)]
pub struct VerticleDeployer {
    /// 已注册的工厂，按前缀索引
    factories: DashMap<String, Arc<dyn VerticleFactory>>,
    /// 活跃部署
    deployments: DashMap<Uuid, Deployment>,
}

impl VerticleDeployer {
    /// 创建新的部署器
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册工厂，前缀已存在时替换并返回旧工厂
    pub fn register_factory(
        &self,
        factory: Arc<dyn VerticleFactory>,
    ) -> Option<Arc<dyn VerticleFactory>> {
        let prefix = factory.prefix().to_string();
        let previous = self.factories.insert(prefix.clone(), factory);
        if previous.is_some() {
            warn!("替换已注册的 Verticle 工厂: {}", prefix);
        } else {
            info!("注册 Verticle 工厂: {}", prefix);
        }
        previous
    }

    /// 注销工厂
    pub fn unregister_factory(&self, prefix: &str) -> Option<Arc<dyn VerticleFactory>> {
        let removed = self.factories.remove(prefix).map(|(_, factory)| factory);
        if removed.is_some() {
            info!("注销 Verticle 工厂: {}", prefix);
        }
        removed
    }

    /// 已注册的工厂前缀
    pub fn factory_prefixes(&self) -> Vec<String> {
        let mut prefixes: Vec<String> = self.factories.iter().map(|e| e.key().clone()).collect();
        prefixes.sort();
        prefixes
    }

    /// 部署 Verticle
    pub async fn deploy(&self, identifier: &str, instances: usize) -> DeploymentResult<Uuid> {
        self.deploy_with(&DeploymentConfig::new(identifier).with_instances(instances))
            .await
    }

    /// 按部署配置部署 Verticle
    pub async fn deploy_with(&self, deployment: &DeploymentConfig) -> DeploymentResult<Uuid> {
        let identifier = deployment.identifier.as_str();
        if deployment.instances == 0 {
            return Err(DeploymentError::InvalidInstances {
                identifier: identifier.to_string(),
            });
        }

        let factory = self.factory_for(identifier)?;
        let deployment_id = Uuid::new_v4();
        info!(
            "开始部署: {} (实例数 {}, 部署ID {})",
            identifier, deployment.instances, deployment_id
        );

        let mut started: Vec<VerticleRef> = Vec::with_capacity(deployment.instances);
        for index in 0..deployment.instances {
            let resolve_context =
                ResolveContext::new(deployment_id, index).with_config(deployment.config.clone());
            let verticle = match create_instance(&factory, identifier, resolve_context).await {
                Ok(verticle) => verticle,
                Err(e) => {
                    error!("Verticle 创建失败: {}, 原因: {}", identifier, e);
                    stop_all(identifier, &started).await;
                    return Err(e);
                }
            };

            let context = VerticleContext::new(deployment_id, identifier, index)
                .with_config(deployment.config.clone());
            if let Err(source) = verticle.start(&context).await {
                error!("Verticle 启动失败: {}, 原因: {}", identifier, source);
                stop_all(identifier, &started).await;
                return Err(DeploymentError::StartFailed {
                    identifier: identifier.to_string(),
                    source,
                });
            }

            debug!("实例已启动: {} #{}", identifier, index);
            started.push(verticle);
        }

        self.deployments.insert(
            deployment_id,
            Deployment {
                identifier: identifier.to_string(),
                deployed_at: Utc::now(),
                instances: started,
            },
        );

        info!("部署完成: {} ({})", identifier, deployment_id);
        Ok(deployment_id)
    }

    /// 部署配置中的所有 Verticle
    pub async fn deploy_configured(&self, config: &AppConfig) -> DeploymentResult<Vec<Uuid>> {
        let mut ids = Vec::with_capacity(config.deployments.len());
        for deployment in &config.deployments {
            ids.push(self.deploy_with(deployment).await?);
        }
        Ok(ids)
    }

    /// 取消部署，停止全部实例
    ///
    /// 所有实例都会被停止，返回第一个停止错误（如果有）。
    pub async fn undeploy(&self, deployment_id: Uuid) -> DeploymentResult<()> {
        let (_, deployment) = self
            .deployments
            .remove(&deployment_id)
            .ok_or(DeploymentError::NotDeployed { deployment_id })?;

        info!("取消部署: {} ({})", deployment.identifier, deployment_id);
        match stop_all(&deployment.identifier, &deployment.instances).await {
            Some(source) => Err(DeploymentError::StopFailed {
                identifier: deployment.identifier,
                source,
            }),
            None => Ok(()),
        }
    }

    /// 取消所有部署
    pub async fn undeploy_all(&self) -> DeploymentResult<()> {
        let mut first_error = None;
        for deployment_id in self.deployment_ids() {
            if let Err(e) = self.undeploy(deployment_id).await {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// 活跃部署ID列表
    pub fn deployment_ids(&self) -> Vec<Uuid> {
        self.deployments.iter().map(|e| *e.key()).collect()
    }

    /// 获取部署摘要
    pub fn deployment(&self, deployment_id: Uuid) -> Option<DeploymentInfo> {
        self.deployments.get(&deployment_id).map(|entry| DeploymentInfo {
            id: deployment_id,
            identifier: entry.identifier.clone(),
            instances: entry.instances.len(),
            verticle_names: entry.instances.iter().map(|v| v.name().to_string()).collect(),
            deployed_at: entry.deployed_at,
        })
    }

    /// 获取部署中的实例
    pub fn instances(&self, deployment_id: Uuid) -> Option<Vec<VerticleRef>> {
        self.deployments
            .get(&deployment_id)
            .map(|entry| entry.instances.clone())
    }

    /// 活跃部署数量
    pub fn len(&self) -> usize {
        self.deployments.len()
    }

    /// 是否没有活跃部署
    pub fn is_empty(&self) -> bool {
        self.deployments.is_empty()
    }

    fn factory_for(&self, identifier: &str) -> DeploymentResult<Arc<dyn VerticleFactory>> {
        prefix_of(identifier)
            .and_then(|prefix| self.factories.get(prefix))
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| DeploymentError::NoFactory {
                identifier: identifier.to_string(),
            })
    }
}

impl fmt::Debug for VerticleDeployer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerticleDeployer")
            .field("factories", &self.factory_prefixes())
            .field("deployments", &self.deployments.len())
            .finish()
    }
}

/// 创建单个实例，阻塞工厂在阻塞线程池中执行
async fn create_instance(
    factory: &Arc<dyn VerticleFactory>,
    identifier: &str,
    context: ResolveContext,
) -> DeploymentResult<VerticleRef> {
    let created = if factory.blocking_create() {
        let factory = Arc::clone(factory);
        let owned_identifier = identifier.to_string();
        tokio::task::spawn_blocking(move || factory.create_verticle(&owned_identifier, &context))
            .await
            .map_err(|e| DeploymentError::TaskFailed {
                message: e.to_string(),
            })?
    } else {
        factory.create_verticle(identifier, &context)
    };

    created.map_err(|source| DeploymentError::CreationFailed {
        identifier: identifier.to_string(),
        source,
    })
}

/// 停止实例，返回第一个停止错误
async fn stop_all(
    identifier: &str,
    instances: &[VerticleRef],
) -> Option<infrastructure_common::BoxError> {
    let mut first_error = None;
    for verticle in instances {
        if let Err(e) = verticle.stop().await {
            warn!("Verticle 停止失败: {}, 原因: {}", identifier, e);
            first_error.get_or_insert(e);
        }
    }
    first_error
}
