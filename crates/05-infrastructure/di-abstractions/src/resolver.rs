//! 解析上下文
//!
//! 运行时在请求 Verticle 时附带的上下文信息

use uuid::Uuid;

/// 解析上下文
///
/// 由运行时构造并传给 [`VerticleFactory::create_verticle`](crate::VerticleFactory::create_verticle)，
/// 工厂可以忽略它。
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// 发起请求的部署ID
    pub deployment_id: Uuid,
    /// 实例序号
    pub instance_index: usize,
    /// 部署配置
    pub config: serde_json::Value,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new(deployment_id: Uuid, instance_index: usize) -> Self {
        Self {
            deployment_id,
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

impl Default for ResolveContext {
    fn default() -> Self {
        Self::new(Uuid::nil(), 0)
    }
}
