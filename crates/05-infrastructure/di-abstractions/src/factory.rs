//! Verticle 工厂抽象接口
//!
//! 运行时按标识符前缀选择工厂，再由工厂创建 Verticle 实例

use crate::resolver::ResolveContext;
use infrastructure_common::{FactoryResult, VerticleRef};

/// 前缀与名称之间的分隔符
pub const PREFIX_SEPARATOR: char = ':';

/// Verticle 工厂 trait
///
/// 运行时通过 [`prefix`](VerticleFactory::prefix) 选择工厂。
pub trait VerticleFactory: Send + Sync {
    /// 工厂声明的命名空间前缀
    fn prefix(&self) -> &str;

    /// 创建过程是否会阻塞
    ///
    /// 返回 `true` 时运行时必须在阻塞线程池中调用 [`create_verticle`](VerticleFactory::create_verticle)，
    /// 不能占用异步调度线程。
    fn blocking_create(&self) -> bool {
        false
    }

    /// 根据带前缀的标识符创建新的 Verticle 实例
    fn create_verticle(
        &self,
        identifier: &str,
        context: &ResolveContext,
    ) -> FactoryResult<VerticleRef>;
}

/// 获取标识符的前缀部分
///
/// 没有分隔符或前缀为空时返回 `None`。
pub fn prefix_of(identifier: &str) -> Option<&str> {
    identifier
        .split_once(PREFIX_SEPARATOR)
        .map(|(prefix, _)| prefix)
        .filter(|prefix| !prefix.is_empty())
}

/// 去掉标识符的前缀和分隔符
///
/// 没有分隔符时原样返回。
pub fn remove_prefix(identifier: &str) -> &str {
    identifier
        .split_once(PREFIX_SEPARATOR)
        .map_or(identifier, |(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_of() {
        assert_eq!(prefix_of("di:worker"), Some("di"));
        assert_eq!(prefix_of("di:"), Some("di"));
        assert_eq!(prefix_of(":worker"), None);
        assert_eq!(prefix_of("worker"), None);
    }

    #[test]
    fn test_remove_prefix() {
        assert_eq!(remove_prefix("di:worker"), "worker");
        assert_eq!(remove_prefix("di:"), "");
        assert_eq!(remove_prefix("worker"), "worker");
        // 只去掉第一个分隔符之前的部分
        assert_eq!(remove_prefix("di:group:worker"), "group:worker");
    }
}
