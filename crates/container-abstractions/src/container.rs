//! 服务容器抽象接口

use crate::store::ConfigStore;
use persistence_common::{DependencyError, DependencyResult};
use std::any::Any;
use std::sync::Arc;

/// 服务容器 trait
///
/// 通用的服务定位器：按名称查找服务，同时提供配置存取能力。
/// 服务以 `Arc<dyn Any>` 形式存放，取出时由调用方按期望类型还原。
pub trait ServiceContainer: ConfigStore {
    /// 按名称解析服务
    fn resolve_by_name(&self, name: &str) -> DependencyResult<Arc<dyn Any + Send + Sync>>;

    /// 检查是否已注册指定名称的服务
    fn is_registered_by_name(&self, name: &str) -> bool;
}

/// 按名称解析服务并还原为具体类型
///
/// 服务注册时以 `Arc::new(value)` 包装，这里按 `T` 还原并克隆出
/// 调用方自有的一份。`T` 通常是 `Arc<dyn SomeTrait>` 这样的共享句柄。
pub fn resolve_typed<T>(container: &dyn ServiceContainer, name: &str) -> DependencyResult<T>
where
    T: Clone + Send + Sync + 'static,
{
    let service = container.resolve_by_name(name)?;
    service
        .downcast::<T>()
        .map(|typed| (*typed).clone())
        .map_err(|_| DependencyError::ServiceTypeMismatch {
            name: name.to_string(),
            expected: std::any::type_name::<T>().to_string(),
        })
}
