//! 静态映射驱动

use mapping_abstractions::MappingDriver;
use parking_lot::RwLock;
use persistence_common::{ClassMetadata, MappingError, MappingResult};
use std::any::Any;
use std::collections::HashMap;
use std::path::PathBuf;

/// 静态映射驱动
///
/// 元数据由程序代码直接登记的平凡驱动，适合测试和小规模固定
/// 映射。`paths` 仅作记录，驱动本身不做文件扫描。
#[derive(Debug, Default)]
pub struct StaticMappingDriver {
    paths: Vec<PathBuf>,
    metadata: RwLock<HashMap<String, ClassMetadata>>,
}

impl StaticMappingDriver {
    /// 创建新的静态驱动
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            metadata: RwLock::new(HashMap::new()),
        }
    }

    /// 记录的位置列表
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// 登记一个类的元数据
    pub fn add_metadata(&self, metadata: ClassMetadata) {
        self.metadata
            .write()
            .insert(metadata.class_name.clone(), metadata);
    }
}

impl MappingDriver for StaticMappingDriver {
    fn load_metadata(&self, class_name: &str) -> MappingResult<ClassMetadata> {
        self.metadata
            .read()
            .get(class_name)
            .cloned()
            .ok_or_else(|| MappingError::MetadataNotFound {
                class_name: class_name.to_string(),
            })
    }

    fn all_class_names(&self) -> MappingResult<Vec<String>> {
        let mut names: Vec<String> = self.metadata.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn is_transient(&self, class_name: &str) -> MappingResult<bool> {
        Ok(!self.metadata.read().contains_key(class_name))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
