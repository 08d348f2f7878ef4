//! 组合映射驱动

use mapping_abstractions::{CompositeMappingDriver, MappingDriver};
use parking_lot::RwLock;
use persistence_common::{ClassMetadata, MappingError, MappingResult};
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

/// 组合映射驱动
///
/// 按注册顺序用命名空间前缀匹配类名，把加载请求委派给第一个
/// 命中的子驱动；没有命中时回落到默认驱动。没有任何子驱动的
/// 组合驱动是合法的空驱动。
#[derive(Debug, Default)]
pub struct ChainMappingDriver {
    default_driver: RwLock<Option<Arc<dyn MappingDriver>>>,
    drivers: RwLock<Vec<(String, Arc<dyn MappingDriver>)>>,
}

impl ChainMappingDriver {
    /// 创建空的组合驱动
    pub fn new() -> Self {
        Self::default()
    }

    /// 已注册的 (命名空间, 子驱动) 列表，保持注册顺序
    pub fn drivers(&self) -> Vec<(String, Arc<dyn MappingDriver>)> {
        self.drivers.read().clone()
    }

    /// 当前的默认驱动
    pub fn default_driver(&self) -> Option<Arc<dyn MappingDriver>> {
        self.default_driver.read().clone()
    }

    /// 查找类名命中的子驱动
    fn driver_for(&self, class_name: &str) -> Option<Arc<dyn MappingDriver>> {
        self.drivers
            .read()
            .iter()
            .find(|(namespace, _)| class_name.starts_with(namespace.as_str()))
            .map(|(_, driver)| driver.clone())
    }
}

impl MappingDriver for ChainMappingDriver {
    fn load_metadata(&self, class_name: &str) -> MappingResult<ClassMetadata> {
        if let Some(driver) = self.driver_for(class_name) {
            return driver.load_metadata(class_name);
        }
        if let Some(default) = self.default_driver.read().clone() {
            return default.load_metadata(class_name);
        }
        Err(MappingError::ClassNotInNamespaces {
            class_name: class_name.to_string(),
        })
    }

    fn all_class_names(&self) -> MappingResult<Vec<String>> {
        let mut names = Vec::new();
        for (_, driver) in self.drivers.read().iter() {
            names.extend(driver.all_class_names()?);
        }
        if let Some(default) = self.default_driver.read().clone() {
            names.extend(default.all_class_names()?);
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn is_transient(&self, class_name: &str) -> MappingResult<bool> {
        if let Some(driver) = self.driver_for(class_name) {
            return driver.is_transient(class_name);
        }
        if let Some(default) = self.default_driver.read().clone() {
            return default.is_transient(class_name);
        }
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl CompositeMappingDriver for ChainMappingDriver {
    fn add_driver(&self, driver: Arc<dyn MappingDriver>, namespace: &str) {
        debug!("注册子驱动: 命名空间 {}", namespace);
        self.drivers
            .write()
            .push((namespace.to_string(), driver));
    }

    fn set_default_driver(&self, driver: Arc<dyn MappingDriver>) {
        debug!("设置默认驱动");
        *self.default_driver.write() = Some(driver);
    }
}
