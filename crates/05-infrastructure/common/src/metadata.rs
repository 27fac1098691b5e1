//! 元数据定义
//!
//! 提供组件定义和类型的元数据信息

use crate::lifecycle::Lifetime;
use std::any::TypeId;
use std::collections::HashMap;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型名称
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径
    pub module_path: String,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        let full_name = std::any::type_name::<T>();
        Self {
            name: short_type_name(full_name).to_string(),
            id: TypeId::of::<T>(),
            module_path: full_name.to_string(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        &self.name
    }
}

/// 去掉模块路径，只保留最后一段类型名（忽略泛型参数中的路径）
fn short_type_name(full_name: &str) -> &str {
    let base = full_name.split('<').next().unwrap_or(full_name);
    base.rsplit("::").next().unwrap_or(base)
}

/// 组件描述符
///
/// 描述容器内一个按名称注册的组件定义
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    /// 组件名称（容器内唯一）
    pub name: String,
    /// 组件生命周期
    pub lifetime: Lifetime,
    /// 组件类型信息
    pub type_info: TypeInfo,
    /// 是否为 Verticle 定义
    pub verticle: bool,
    /// 组件优先级
    pub priority: i32,
    /// 组件元数据
    pub metadata: HashMap<String, String>,
}

impl ComponentDescriptor {
    /// 创建新的组件描述符
    pub fn new<T: ?Sized + 'static>(name: impl Into<String>, lifetime: Lifetime) -> Self {
        Self {
            name: name.into(),
            lifetime,
            type_info: TypeInfo::of::<T>(),
            verticle: false,
            priority: 0,
            metadata: HashMap::new(),
        }
    }

    /// 标记为 Verticle 定义
    pub fn as_verticle(mut self) -> Self {
        self.verticle = true;
        self
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 添加元数据
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct WorkerVerticle;

    #[test]
    fn test_type_info_short_name() {
        let info = TypeInfo::of::<WorkerVerticle>();
        assert_eq!(info.short_name(), "WorkerVerticle");
        assert!(info.module_path.ends_with("WorkerVerticle"));

        let generic = TypeInfo::of::<Vec<String>>();
        assert_eq!(generic.short_name(), "Vec");
    }

    #[test]
    fn test_descriptor_builder() {
        let descriptor = ComponentDescriptor::new::<WorkerVerticle>("worker", Lifetime::Transient)
            .as_verticle()
            .with_priority(5)
            .with_metadata("group", "ingest");

        assert_eq!(descriptor.name, "worker");
        assert!(descriptor.verticle);
        assert_eq!(descriptor.priority, 5);
        assert_eq!(descriptor.metadata.get("group").map(String::as_str), Some("ingest"));
    }
}
