//! 元数据缓存实现与默认缓存工厂

use container_abstractions::ServiceContainer;
use dashmap::DashMap;
use mapping_abstractions::{CacheFactory, CacheStats, MetadataCache};
use parking_lot::RwLock;
use persistence_common::{ClassMetadata, FactoryError, FactoryResult};
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// 缓存配置节的键前缀
pub const CACHE_SECTION_PREFIX: &str = "persistence.cache";

/// 内存元数据缓存
///
/// 基于并发哈希表的进程内缓存，带命中统计。可选的容量上限达到
/// 后不再接收新键，已有键仍可更新。
#[derive(Debug)]
pub struct InMemoryMetadataCache {
    namespace: Option<String>,
    max_size: Option<usize>,
    entries: DashMap<String, ClassMetadata>,
    hits: AtomicU64,
    misses: AtomicU64,
    last_updated: RwLock<chrono::DateTime<chrono::Utc>>,
}

impl InMemoryMetadataCache {
    /// 创建无上限的缓存
    pub fn new() -> Self {
        Self {
            namespace: None,
            max_size: None,
            entries: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            last_updated: RwLock::new(chrono::Utc::now()),
        }
    }

    /// 设置容量上限
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// 设置键命名空间
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// 带命名空间前缀的缓存键
    fn key(&self, class_name: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}:{class_name}"),
            None => class_name.to_string(),
        }
    }
}

impl Default for InMemoryMetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataCache for InMemoryMetadataCache {
    fn get(&self, class_name: &str) -> Option<ClassMetadata> {
        match self.entries.get(&self.key(class_name)) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn put(&self, class_name: &str, metadata: ClassMetadata) {
        let key = self.key(class_name);
        if let Some(max_size) = self.max_size {
            if self.entries.len() >= max_size && !self.entries.contains_key(&key) {
                warn!("元数据缓存已达容量上限 {}, 丢弃键 {}", max_size, key);
                return;
            }
        }
        self.entries.insert(key, metadata);
        *self.last_updated.write() = chrono::Utc::now();
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.entries.len(),
            last_updated: *self.last_updated.read(),
        }
    }
}

/// 缓存提供者配置
#[derive(Debug, Deserialize)]
struct CacheConfig {
    /// 缓存实现类型标签
    #[serde(default = "default_cache_class")]
    class: String,
    /// 容量上限
    #[serde(default)]
    max_size: Option<usize>,
    /// 键命名空间
    #[serde(default)]
    namespace: Option<String>,
}

fn default_cache_class() -> String {
    "memory".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            class: default_cache_class(),
            max_size: None,
            namespace: None,
        }
    }
}

/// 默认缓存工厂
///
/// 按 `persistence.cache.<名称>` 配置节构建缓存句柄；
/// 配置节缺省时按默认配置构建内存缓存。
#[derive(Debug, Default)]
pub struct DefaultCacheFactory;

impl DefaultCacheFactory {
    /// 创建新的缓存工厂
    pub fn new() -> Self {
        Self
    }
}

impl CacheFactory for DefaultCacheFactory {
    fn build(
        &self,
        container: &dyn ServiceContainer,
        cache_key: &str,
    ) -> FactoryResult<Arc<dyn MetadataCache>> {
        let section_key = format!("{CACHE_SECTION_PREFIX}.{cache_key}");
        let config = match container.get_section(&section_key)? {
            Some(section) => section.bind::<CacheConfig>()?,
            None => CacheConfig::default(),
        };

        debug!("构建缓存句柄: {} ({})", cache_key, config.class);
        match config.class.as_str() {
            "memory" => {
                let mut cache = InMemoryMetadataCache::new();
                if let Some(max_size) = config.max_size {
                    cache = cache.with_max_size(max_size);
                }
                if let Some(namespace) = config.namespace {
                    cache = cache.with_namespace(namespace);
                }
                Ok(Arc::new(cache))
            }
            other => Err(FactoryError::construction(
                other,
                format!("缓存配置 {section_key} 指定了未知的缓存类型"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use container_impl::StaticContainer;
    use serde_json::json;

    #[test]
    fn test_cache_hit_and_miss_counters() {
        let cache = InMemoryMetadataCache::new();
        assert!(cache.get("blog::Post").is_none());

        cache.put("blog::Post", ClassMetadata::new("blog::Post"));
        assert!(cache.get("blog::Post").is_some());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn test_max_size_rejects_new_keys() {
        let cache = InMemoryMetadataCache::new().with_max_size(1);
        cache.put("blog::Post", ClassMetadata::new("blog::Post"));
        cache.put("blog::Tag", ClassMetadata::new("blog::Tag"));

        assert_eq!(cache.stats().size, 1);
        // 已有键仍可更新
        cache.put(
            "blog::Post",
            ClassMetadata::new("blog::Post").with_table("posts"),
        );
        assert_eq!(
            cache.get("blog::Post").unwrap().table.as_deref(),
            Some("posts")
        );
    }

    #[test]
    fn test_namespace_prefixes_keys() {
        let cache = InMemoryMetadataCache::new().with_namespace("tenant_a");
        cache.put("blog::Post", ClassMetadata::new("blog::Post"));
        assert!(cache.get("blog::Post").is_some());
    }

    #[test]
    fn test_factory_builds_from_config_section() {
        let container = StaticContainer::builder()
            .with_config_value(json!({
                "persistence": {
                    "cache": {
                        "default": { "class": "memory", "max_size": 16 }
                    }
                }
            }))
            .build();

        let factory = DefaultCacheFactory::new();
        let cache = factory.build(&container, "default").unwrap();
        cache.put("blog::Post", ClassMetadata::new("blog::Post"));
        assert!(cache.get("blog::Post").is_some());
    }

    #[test]
    fn test_factory_defaults_for_missing_section() {
        let container = StaticContainer::builder().build();
        let factory = DefaultCacheFactory::new();
        assert!(factory.build(&container, "default").is_ok());
    }

    #[test]
    fn test_factory_rejects_unknown_cache_class() {
        let container = StaticContainer::builder()
            .with_config_value(json!({
                "persistence": { "cache": { "redis": { "class": "redis" } } }
            }))
            .build();

        let factory = DefaultCacheFactory::new();
        let result = factory.build(&container, "redis");
        assert!(matches!(result, Err(FactoryError::Construction { .. })));
    }
}
