//! 驱动配置绑定
//!
//! 一次驱动实例化对应的配置。由配置节绑定而来，与组件默认值
//! 合并，实例产出后即丢弃。

use persistence_common::{ConfigSection, FactoryError, FactoryResult};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// 驱动配置
#[derive(Debug, Clone, Deserialize)]
pub struct DriverConfig {
    /// 驱动变体标签，必填
    #[serde(default)]
    pub class: Option<String>,
    /// 扫描映射元数据的位置，单个值规整为单元素序列
    #[serde(default, deserialize_with = "one_or_many_paths")]
    pub paths: Vec<PathBuf>,
    /// 映射文件后缀过滤，仅文件型驱动有意义
    #[serde(default)]
    pub extension: Option<String>,
    /// 全局基础文件名，仅显式声明时应用
    #[serde(default)]
    pub global_basename: Option<String>,
    /// 缓存提供者配置名，仅注解型驱动使用
    #[serde(default = "default_cache_name")]
    pub cache: String,
    /// 兜底驱动的配置名，仅组合型驱动使用
    #[serde(default)]
    pub default_driver: Option<String>,
    /// 命名空间到嵌套配置名的映射，保持文档顺序；
    /// 值为 null 的条目表示跳过
    #[serde(default, deserialize_with = "ordered_driver_map")]
    pub drivers: Vec<(String, Option<String>)>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            class: None,
            paths: Vec::new(),
            extension: None,
            global_basename: None,
            cache: default_cache_name(),
            default_driver: None,
            drivers: Vec::new(),
        }
    }
}

impl DriverConfig {
    /// 从配置节绑定，缺省节按默认值处理
    pub fn from_section(section: Option<ConfigSection>) -> FactoryResult<Self> {
        match section {
            Some(section) => Ok(section.bind::<Self>()?),
            None => Ok(Self::default()),
        }
    }

    /// 取出必填的驱动变体标签
    pub fn require_class(&self, config_key: &str) -> FactoryResult<String> {
        self.class
            .clone()
            .ok_or_else(|| FactoryError::MissingConfiguration {
                key: config_key.to_string(),
            })
    }
}

fn default_cache_name() -> String {
    "default".to_string()
}

/// 接受单个值或序列的位置列表
fn one_or_many_paths<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(PathBuf),
        Many(Vec<PathBuf>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(path) => vec![path],
        OneOrMany::Many(paths) => paths,
    })
}

/// 保持文档顺序的命名空间映射
fn ordered_driver_map<'de, D>(deserializer: D) -> Result<Vec<(String, Option<String>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DriverMapVisitor;

    impl<'de> Visitor<'de> for DriverMapVisitor {
        type Value = Vec<(String, Option<String>)>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("命名空间到驱动配置名的映射")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::new();
            while let Some(entry) = map.next_entry::<String, Option<String>>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(DriverMapVisitor)
}
