//! 注解子系统
//!
//! 持有进程级的类型加载器回调。加载器回答"该类名是否可加载"，
//! 注解读取器在读取元数据前先经由加载器确认类型存在。
//! 重复注册同一个加载器是无害的：查询对所有加载器取或。

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// 类型加载器回调
///
/// 对给定的类名返回 true 表示该类型已知且可加载。
pub type TypeLoader = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// 已注册的类型加载器
static TYPE_LOADERS: Lazy<RwLock<Vec<TypeLoader>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// 注册类型加载器
pub fn register_type_loader(loader: TypeLoader) {
    debug!("注册注解类型加载器");
    TYPE_LOADERS.write().push(loader);
}

/// 检查类型是否被任一加载器认可
pub fn is_type_known(class_name: &str) -> bool {
    TYPE_LOADERS
        .read()
        .iter()
        .any(|loader| (loader.as_ref())(class_name))
}

/// 已注册的加载器数量
pub fn loader_count() -> usize {
    TYPE_LOADERS.read().len()
}
