//! # 基础设施组合层
//!
//! 这个 crate 把容器、Verticle 工厂和部署器组合成一个可运行的系统。
//!
//! ## 主要功能
//!
//! - **部署器**: 按前缀选择工厂，在阻塞线程池中创建 Verticle 并启动
//! - **配置源**: 从配置文件和环境变量加载部署配置
//! - **启动器**: 初始化日志、发布容器、注册工厂、部署配置中的 Verticle
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::{load_app_config, VerticleBootstrapper};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_app_config(None)?;
//!     let runtime = VerticleBootstrapper::new(config).bootstrap().await?;
//!
//!     let id = runtime.deployer.deploy("di:worker", 2).await?;
//!     runtime.deployer.undeploy(id).await?;
//!
//!     runtime.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod bootstrapper;
pub mod config_sources;
pub mod deployer;

pub use bootstrapper::{init_tracing, VerticleBootstrapper, VerticleRuntime};
pub use config_sources::{load_app_config, ENV_PREFIX, ENV_SEPARATOR};
pub use deployer::{DeploymentInfo, VerticleDeployer};

#[cfg(test)]
mod tests;
