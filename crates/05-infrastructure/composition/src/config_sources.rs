//! 配置源加载
//!
//! 依次叠加配置文件和环境变量，绑定到 [`AppConfig`]

use infrastructure_common::{AppConfig, ConfigError, ConfigResult};
use std::path::Path;
use tracing::{debug, error, info};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "VERTICLE";

/// 环境变量层级分隔符，例如 `VERTICLE__LOGGING__LEVEL=debug`
pub const ENV_SEPARATOR: &str = "__";

/// 加载应用配置
///
/// 指定的配置文件必须存在，格式由扩展名决定（toml / json / yaml）。
/// 环境变量的优先级高于配置文件。
pub fn load_app_config(path: Option<&Path>) -> ConfigResult<AppConfig> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        info!("加载配置文件: {}", path.display());
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()
        .map_err(|e| {
            error!("配置构建失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

    let app_config: AppConfig = settings.try_deserialize().map_err(|e| {
        error!("配置绑定失败: {}", e);
        ConfigError::ParseError {
            source: Box::new(e),
        }
    })?;

    app_config.validate()?;
    debug!("配置加载成功: {} 个部署", app_config.deployments.len());
    Ok(app_config)
}
