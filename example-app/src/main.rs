//! # 示例应用程序
//!
//! 演示如何通过依赖注入容器部署 Verticle

use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use di_impl::DiContainerImpl;
use infrastructure_common::{
    AppConfig, BoxError, DependencyResult, DeploymentConfig, Lifetime, Verticle, VerticleContext,
};
use infrastructure_composition::{init_tracing, load_app_config, VerticleBootstrapper};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "容器化 Verticle 部署示例")]
struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志级别，覆盖配置文件
    #[arg(long)]
    log_level: Option<String>,

    /// 未配置部署时 `di:worker` 的实例数
    #[arg(long, default_value_t = 2)]
    instances: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = prepare_config(&args).context("加载配置失败")?;
    init_tracing(&config.logging);
    info!("启动容器化 Verticle 示例应用");
    info!(
        "配置已加载: 来源 {}, 日志级别 {}, {} 个部署",
        args.config
            .as_deref()
            .map_or_else(|| "环境变量".to_string(), |p| p.display().to_string()),
        config.logging.level,
        config.deployments.len()
    );

    let container = build_container().context("构建容器失败")?;
    let runtime = VerticleBootstrapper::new(config)
        .with_container(Arc::new(container))
        .bootstrap()
        .await
        .context("启动运行时失败")?;

    for id in &runtime.deployment_ids {
        if let Some(deployment) = runtime.deployer.deployment(*id) {
            info!(
                "部署 {}: {} x{}",
                deployment.id, deployment.identifier, deployment.instances
            );
        }
    }

    // 单例定义不能作为 Verticle 部署
    if let Err(e) = runtime.deployer.deploy("di:shared", 1).await {
        warn!("预期的部署失败: {}", e);
    }

    runtime.shutdown().await.context("关闭运行时失败")?;
    info!("应用已关闭");
    Ok(())
}

/// 加载配置并应用命令行覆盖
fn prepare_config(args: &Args) -> anyhow::Result<AppConfig> {
    let mut config = load_app_config(args.config.as_deref())?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if config.deployments.is_empty() {
        config
            .deployments
            .push(DeploymentConfig::new("di:worker").with_instances(args.instances));
    }
    Ok(config)
}

/// 构建示例容器
fn build_container() -> DependencyResult<DiContainerImpl> {
    let processed = Arc::new(AtomicU64::new(0));

    let container = DiContainerImpl::builder()
        .verticle("worker", Lifetime::Transient, {
            let processed = Arc::clone(&processed);
            move || Ok(WorkerVerticle::new(Arc::clone(&processed)))
        })
        .verticle("shared", Lifetime::Singleton, || Ok(SharedVerticle))
        .instance("processed-counter", processed)
        .build()?;

    if let Err(errors) = container.validate() {
        for error in errors {
            warn!("容器验证失败: {}", error);
        }
    }

    Ok(container)
}

/// 示例工作 Verticle
#[derive(Debug)]
struct WorkerVerticle {
    id: Uuid,
    processed: Arc<AtomicU64>,
}

impl WorkerVerticle {
    fn new(processed: Arc<AtomicU64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            processed,
        }
    }
}

#[async_trait]
impl Verticle for WorkerVerticle {
    fn name(&self) -> &str {
        "WorkerVerticle"
    }

    async fn start(&self, context: &VerticleContext) -> Result<(), BoxError> {
        let total = self.processed.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "WorkerVerticle {} 启动: 部署 {} 实例 #{} (累计 {})",
            self.id, context.deployment_id, context.instance_index, total
        );
        Ok(())
    }

    async fn stop(&self) -> Result<(), BoxError> {
        info!("WorkerVerticle {} 停止", self.id);
        Ok(())
    }
}

/// 示例单例 Verticle
#[derive(Debug)]
struct SharedVerticle;

#[async_trait]
impl Verticle for SharedVerticle {
    fn name(&self) -> &str {
        "SharedVerticle"
    }

    async fn start(&self, _context: &VerticleContext) -> Result<(), BoxError> {
        Ok(())
    }
}
