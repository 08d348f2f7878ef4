//! 配置存取抽象接口

use persistence_common::{ConfigResult, ConfigSection};
use serde_json::Value;

/// 配置存取 trait
///
/// 定义从配置树读取配置节与配置值的统一接口。
/// 键使用点号分隔的嵌套路径，例如 `persistence.driver.orm_default`。
pub trait ConfigStore: Send + Sync {
    /// 获取配置节
    ///
    /// 路径不存在时返回 `Ok(None)`；路径存在但不是对象时返回类型转换错误。
    fn get_section(&self, key: &str) -> ConfigResult<Option<ConfigSection>>;

    /// 获取单个配置值
    fn get_value(&self, key: &str) -> ConfigResult<Option<Value>>;

    /// 检查配置键是否存在
    fn contains_key(&self, key: &str) -> bool;
}
