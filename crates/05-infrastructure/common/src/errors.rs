//! 错误类型定义

use thiserror::Error;

/// 装箱的通用错误类型
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError { source: BoxError },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 依赖注入容器错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册: {name}")]
    ComponentNotRegistered { name: String },

    #[error("组件创建失败: {name}, 原因: {source}")]
    ComponentCreationFailed { name: String, source: BoxError },

    #[error("组件类型不匹配: {name}, 期望 {expected}, 实际 {actual}")]
    TypeMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("组件注册失败: {name}, 原因: {message}")]
    RegistrationError { name: String, message: String },
}

impl DependencyError {
    /// 创建组件未注册错误
    pub fn not_registered(name: impl Into<String>) -> Self {
        Self::ComponentNotRegistered { name: name.into() }
    }
}

/// Verticle 工厂错误类型
#[derive(Error, Debug)]
pub enum FactoryError {
    #[error("参数无效: {message}")]
    InvalidArgument { message: String },

    #[error("状态非法: {message}")]
    IllegalState { message: String },

    /// 容器自身的错误，原样透传
    #[error(transparent)]
    Dependency(#[from] DependencyError),
}

impl FactoryError {
    /// 创建参数无效错误
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// 创建状态非法错误
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState {
            message: message.into(),
        }
    }

    /// 是否为参数无效错误
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// 是否为状态非法错误
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, Self::IllegalState { .. })
    }
}

/// 部署错误类型
#[derive(Error, Debug)]
pub enum DeploymentError {
    #[error("没有找到前缀对应的 Verticle 工厂: {identifier}")]
    NoFactory { identifier: String },

    #[error("Verticle 创建失败: {identifier}, 原因: {source}")]
    CreationFailed {
        identifier: String,
        #[source]
        source: FactoryError,
    },

    #[error("Verticle 启动失败: {identifier}, 原因: {source}")]
    StartFailed { identifier: String, source: BoxError },

    #[error("Verticle 停止失败: {identifier}, 原因: {source}")]
    StopFailed { identifier: String, source: BoxError },

    #[error("部署不存在: {deployment_id}")]
    NotDeployed { deployment_id: uuid::Uuid },

    #[error("部署实例数无效: {identifier}, 实例数必须大于 0")]
    InvalidInstances { identifier: String },

    #[error("阻塞任务执行失败: {message}")]
    TaskFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type FactoryResult<T> = Result<T, FactoryError>;
pub type DeploymentResult<T> = Result<T, DeploymentError>;
