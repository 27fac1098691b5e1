//! Verticle 基础接口定义
//!
//! 提供所有可部署运行单元必须实现的基础 trait

use crate::errors::BoxError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Verticle trait
///
/// 由运行时部署的可运行单元。实例创建后所有权交给运行时，
/// 运行时自行负责调用 `start` / `stop`。
#[async_trait]
pub trait Verticle: Send + Sync + Debug + 'static {
    /// Verticle 名称
    fn name(&self) -> &str;

    /// 启动 Verticle
    async fn start(&self, context: &VerticleContext) -> Result<(), BoxError>;

    /// 停止 Verticle
    async fn stop(&self) -> Result<(), BoxError> {
        Ok(())
    }
}

/// 共享的 Verticle 实例引用
pub type VerticleRef = Arc<dyn Verticle>;

/// Verticle 启动上下文
#[derive(Debug, Clone)]
pub struct VerticleContext {
    /// 所属部署ID
    pub deployment_id: uuid::Uuid,
    /// 部署标识符（带前缀）
    pub identifier: String,
    /// 实例序号，从 0 开始
    pub instance_index: usize,
    /// 部署配置
    pub config: serde_json::Value,
}

impl VerticleContext {
    /// 创建新的启动上下文
    pub fn new(deployment_id: uuid::Uuid, identifier: impl Into<String>, instance_index: usize) -> Self {
        Self {
            deployment_id,
            identifier: identifier.into(),
            instance_index,
            config: serde_json::Value::Null,
        }
    }

    /// 设置部署配置
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = config;
        self
    }
}
