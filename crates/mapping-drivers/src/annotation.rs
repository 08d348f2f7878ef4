//! 注解映射驱动及其读取器
//!
//! Rust 没有运行时反射，"注解"由 `#[entity]` 宏在进程启动时登记
//! 到全局实体注册表，读取器从注册表取元数据。

use mapping_abstractions::{AnnotationReader, MappingDriver, MetadataCache};
use persistence_common::{annotations, registry, ClassMetadata, MappingError, MappingResult};
use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

/// 注册表注解读取器
///
/// 从全局实体注册表读取宏登记的元数据。注册表为准，注册的类型
/// 加载器扩展"类型已知"的判定。
#[derive(Debug, Default)]
pub struct RegistryAnnotationReader;

impl RegistryAnnotationReader {
    /// 创建新的读取器
    pub fn new() -> Self {
        Self
    }
}

impl AnnotationReader for RegistryAnnotationReader {
    fn read(&self, class_name: &str) -> MappingResult<Option<ClassMetadata>> {
        if !registry::contains_entity(class_name) && !annotations::is_type_known(class_name) {
            return Ok(None);
        }

        Ok(registry::entity_descriptor(class_name).map(|descriptor| {
            let mut metadata = (descriptor.metadata)();
            if metadata.class_name.is_empty() {
                metadata.class_name = descriptor.class_name;
            }
            metadata
        }))
    }
}

/// 缓存注解读取器
///
/// 装饰另一个读取器，把读到的元数据写入缓存句柄，命中时
/// 跳过底层读取。
#[derive(Debug)]
pub struct CachingReader {
    inner: Arc<dyn AnnotationReader>,
    cache: Arc<dyn MetadataCache>,
}

impl CachingReader {
    /// 包装读取器与缓存句柄
    pub fn new(inner: Arc<dyn AnnotationReader>, cache: Arc<dyn MetadataCache>) -> Self {
        Self { inner, cache }
    }

    /// 缓存句柄
    pub fn cache(&self) -> &Arc<dyn MetadataCache> {
        &self.cache
    }
}

impl AnnotationReader for CachingReader {
    fn read(&self, class_name: &str) -> MappingResult<Option<ClassMetadata>> {
        if let Some(metadata) = self.cache.get(class_name) {
            return Ok(Some(metadata));
        }

        let result = self.inner.read(class_name)?;
        if let Some(metadata) = &result {
            self.cache.put(class_name, metadata.clone());
        }
        Ok(result)
    }
}

/// 注解映射驱动
///
/// 通过读取器加载属性标注元数据。`paths` 记录宿主声明的实体源
/// 码位置；实际的类清单以全局注册表为准。
#[derive(Debug)]
pub struct AnnotationMappingDriver {
    reader: Arc<dyn AnnotationReader>,
    paths: Vec<PathBuf>,
}

impl AnnotationMappingDriver {
    /// 创建新的注解驱动
    pub fn new(reader: Arc<dyn AnnotationReader>, paths: Vec<PathBuf>) -> Self {
        Self { reader, paths }
    }

    /// 读取器
    pub fn reader(&self) -> &Arc<dyn AnnotationReader> {
        &self.reader
    }

    /// 声明的实体源码位置
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl MappingDriver for AnnotationMappingDriver {
    fn load_metadata(&self, class_name: &str) -> MappingResult<ClassMetadata> {
        self.reader
            .read(class_name)?
            .ok_or_else(|| MappingError::MetadataNotFound {
                class_name: class_name.to_string(),
            })
    }

    fn all_class_names(&self) -> MappingResult<Vec<String>> {
        let mut names = registry::entity_names();
        names.sort();
        Ok(names)
    }

    fn is_transient(&self, class_name: &str) -> MappingResult<bool> {
        Ok(self.reader.read(class_name)?.is_none())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
