//! 部署配置定义

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 日志配置
    pub logging: LoggingConfig,
    /// 启动时部署的 Verticle 列表
    pub deployments: Vec<DeploymentConfig>,
}

impl AppConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "logging.level 不能为空".to_string(),
            });
        }

        for deployment in &self.deployments {
            deployment.validate()?;
        }

        Ok(())
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别（trace / debug / info / warn / error）
    pub level: String,
    /// 是否输出 JSON 格式日志
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// 单个部署配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// 带前缀的 Verticle 标识符，例如 `di:worker`
    pub identifier: String,
    /// 部署实例数
    #[serde(default = "default_instances")]
    pub instances: usize,
    /// 传给 Verticle 的配置
    #[serde(default)]
    pub config: serde_json::Value,
}

fn default_instances() -> usize {
    1
}

impl DeploymentConfig {
    /// 创建新的部署配置
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            instances: default_instances(),
            config: serde_json::Value::Null,
        }
    }

    /// 设置实例数
    pub fn with_instances(mut self, instances: usize) -> Self {
        self.instances = instances;
        self
    }

    /// 验证部署配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.identifier.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "deployments.identifier 不能为空".to_string(),
            });
        }
        if self.instances == 0 {
            return Err(ConfigError::ValidationError {
                message: format!("{} 的实例数必须大于 0", self.identifier),
            });
        }
        Ok(())
    }
}
