//! # 服务容器具体实现
//!
//! 提供基于内存服务表和 JSON 配置树的静态容器实现，
//! 配置可以从 TOML / JSON 文件或现成的 JSON 值装入。

use container_abstractions::{ConfigStore, ServiceContainer};
use persistence_common::{ConfigError, ConfigResult, ConfigSection, DependencyError, DependencyResult};
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// 静态服务容器
///
/// 服务表和配置树在构建时确定，之后只读。满足工厂对容器的
/// 全部要求：按名称解析服务、按点号路径读取配置节。
pub struct StaticContainer {
    /// 已注册的服务
    services: HashMap<String, Arc<dyn Any + Send + Sync>>,
    /// 配置树根节点
    config: Value,
}

impl StaticContainer {
    /// 创建容器构建器
    pub fn builder() -> StaticContainerBuilder {
        StaticContainerBuilder::new()
    }

    /// 从嵌套路径获取配置值
    fn get_nested_value(&self, path: &str) -> Option<&Value> {
        let mut current = &self.config;
        for part in path.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }
}

impl ConfigStore for StaticContainer {
    fn get_section(&self, key: &str) -> ConfigResult<Option<ConfigSection>> {
        match self.get_nested_value(key) {
            Some(Value::Object(map)) => Ok(Some(ConfigSection::from(map.clone()))),
            Some(_) => Err(ConfigError::type_conversion(format!(
                "配置节 {key} 不是对象类型"
            ))),
            None => Ok(None),
        }
    }

    fn get_value(&self, key: &str) -> ConfigResult<Option<Value>> {
        Ok(self.get_nested_value(key).cloned())
    }

    fn contains_key(&self, key: &str) -> bool {
        self.get_nested_value(key).is_some()
    }
}

impl ServiceContainer for StaticContainer {
    fn resolve_by_name(&self, name: &str) -> DependencyResult<Arc<dyn Any + Send + Sync>> {
        self.services
            .get(name)
            .cloned()
            .ok_or_else(|| DependencyError::ServiceNotRegistered {
                name: name.to_string(),
            })
    }

    fn is_registered_by_name(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }
}

/// 静态容器构建器
pub struct StaticContainerBuilder {
    services: HashMap<String, Arc<dyn Any + Send + Sync>>,
    config: Value,
}

impl StaticContainerBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
            config: Value::Object(serde_json::Map::new()),
        }
    }

    /// 注册服务
    ///
    /// 服务以 `Arc::new(value)` 包装存放；共享句柄（如
    /// `Arc<dyn SomeTrait>`）直接作为 `T` 传入即可。
    pub fn with_service<T>(mut self, name: impl Into<String>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        let name = name.into();
        debug!("注册服务: {}", name);
        self.services.insert(name, Arc::new(value));
        self
    }

    /// 合并一棵现成的 JSON 配置树
    pub fn with_config_value(mut self, value: Value) -> Self {
        merge_values(&mut self.config, value);
        self
    }

    /// 装入 TOML 配置文件并合并
    pub fn add_config_toml<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("装入 TOML 配置文件: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        let parsed: toml::Value = toml::from_str(&content).map_err(ConfigError::parse)?;

        Ok(self.with_config_value(toml_to_json(&parsed)))
    }

    /// 装入 JSON 配置文件并合并
    pub fn add_config_json<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("装入 JSON 配置文件: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        let parsed: Value = serde_json::from_str(&content).map_err(ConfigError::parse)?;

        Ok(self.with_config_value(parsed))
    }

    /// 构建容器
    pub fn build(self) -> StaticContainer {
        info!("构建静态容器，注册了 {} 个服务", self.services.len());
        StaticContainer {
            services: self.services,
            config: self.config,
        }
    }
}

impl Default for StaticContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 深度合并两棵 JSON 树
///
/// 对象按键递归合并，其余类型后来者覆盖先来者。
fn merge_values(base: &mut Value, incoming: Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(incoming_map)) => {
            for (key, value) in incoming_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, incoming) => *base = incoming,
    }
}

/// 将 TOML 值转换为 JSON 值
fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number(serde_json::Number::from(*i)),
        toml::Value::Float(f) => Value::Number(
            serde_json::Number::from_f64(*f).unwrap_or_else(|| serde_json::Number::from(0)),
        ),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Array(arr) => Value::Array(arr.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use container_abstractions::resolve_typed;
    use serde_json::json;
    use std::io::Write;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct StaticGreeter;

    impl Greeter for StaticGreeter {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    #[test]
    fn test_nested_section_lookup() {
        let container = StaticContainer::builder()
            .with_config_value(json!({
                "persistence": {
                    "driver": {
                        "orm_default": { "class": "chain" }
                    }
                }
            }))
            .build();

        let section = container
            .get_section("persistence.driver.orm_default")
            .unwrap()
            .unwrap();
        assert_eq!(section.get("class"), Some(&json!("chain")));

        assert!(container
            .get_section("persistence.driver.missing")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_scalar_path_is_not_a_section() {
        let container = StaticContainer::builder()
            .with_config_value(json!({ "persistence": { "flag": true } }))
            .build();

        assert!(container.get_section("persistence.flag").is_err());
        assert!(container.contains_key("persistence.flag"));
    }

    #[test]
    fn test_config_merge_overlays_later_sources() {
        let container = StaticContainer::builder()
            .with_config_value(json!({ "a": { "x": 1, "y": 1 } }))
            .with_config_value(json!({ "a": { "y": 2 } }))
            .build();

        assert_eq!(container.get_value("a.x").unwrap(), Some(json!(1)));
        assert_eq!(container.get_value("a.y").unwrap(), Some(json!(2)));
    }

    #[test]
    fn test_service_resolution_roundtrip() {
        let greeter: Arc<dyn Greeter> = Arc::new(StaticGreeter);
        let container = StaticContainer::builder()
            .with_service("app.greeter", greeter)
            .build();

        assert!(container.is_registered_by_name("app.greeter"));

        let resolved: Arc<dyn Greeter> = resolve_typed(&container, "app.greeter").unwrap();
        assert_eq!(resolved.greet(), "hello");
    }

    #[test]
    fn test_missing_service_reports_not_registered() {
        let container = StaticContainer::builder().build();

        let result = container.resolve_by_name("app.missing");
        assert!(matches!(
            result,
            Err(DependencyError::ServiceNotRegistered { .. })
        ));
    }

    #[test]
    fn test_wrong_service_type_reports_mismatch() {
        let container = StaticContainer::builder()
            .with_service("app.number", 42_u64)
            .build();

        let result: DependencyResult<String> = resolve_typed(&container, "app.number");
        assert!(matches!(
            result,
            Err(DependencyError::ServiceTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_toml_config_file_loads_into_tree() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[persistence.driver.files]\nclass = \"yaml\"\npaths = [\"mappings\"]"
        )
        .unwrap();

        let container = StaticContainer::builder()
            .add_config_toml(file.path())
            .unwrap()
            .build();

        let section = container
            .get_section("persistence.driver.files")
            .unwrap()
            .unwrap();
        assert_eq!(section.get("class"), Some(&json!("yaml")));
        assert_eq!(section.get("paths"), Some(&json!(["mappings"])));
    }
}
