//! 配置节相关的基础类型定义

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 配置节
///
/// 一个命名配置节下的键值数据。底层使用 `serde_json::Map`
/// （启用 `preserve_order`），键的迭代顺序即配置文档中的书写顺序。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSection {
    /// 配置数据
    pub data: serde_json::Map<String, Value>,
}

impl ConfigSection {
    /// 创建新的配置节
    pub fn new() -> Self {
        Self {
            data: serde_json::Map::new(),
        }
    }

    /// 插入配置项
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    /// 获取配置项
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// 检查配置项是否存在
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// 配置节是否为空
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 绑定到具体类型
    pub fn bind<T>(&self) -> Result<T, ConfigError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let value = Value::Object(self.data.clone());
        serde_json::from_value(value).map_err(|e| ConfigError::Bind { source: e })
    }
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self::new()
    }
}

impl From<serde_json::Map<String, Value>> for ConfigSection {
    fn from(data: serde_json::Map<String, Value>) -> Self {
        Self { data }
    }
}
