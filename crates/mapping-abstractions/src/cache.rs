//! 元数据缓存抽象接口

use container_abstractions::ServiceContainer;
use persistence_common::{ClassMetadata, FactoryResult};
use std::fmt::Debug;
use std::sync::Arc;

/// 元数据缓存 trait
///
/// 缓存注解读取器产出的类元数据，避免重复解析。
pub trait MetadataCache: Send + Sync + Debug {
    /// 读取缓存项
    fn get(&self, class_name: &str) -> Option<ClassMetadata>;

    /// 写入缓存项
    fn put(&self, class_name: &str, metadata: ClassMetadata);

    /// 获取缓存统计信息
    fn stats(&self) -> CacheStats;
}

/// 缓存工厂 trait
///
/// 外部协作者：按缓存配置名构建缓存句柄。注解型驱动每次构造
/// 都会向工厂索取一个新的句柄。
pub trait CacheFactory: Send + Sync {
    /// 构建缓存句柄
    fn build(
        &self,
        container: &dyn ServiceContainer,
        cache_key: &str,
    ) -> FactoryResult<Arc<dyn MetadataCache>>;
}

/// 缓存统计信息
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// 缓存命中次数
    pub hits: u64,
    /// 缓存未命中次数
    pub misses: u64,
    /// 缓存项数量
    pub size: usize,
    /// 最后更新时间
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl CacheStats {
    /// 计算命中率
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}
