//! 全局实体注册表
//!
//! 实体类型在进程启动时（由 `#[entity]` 宏生成的 ctor 函数）
//! 登记到这里；注解驱动通过注册表读取元数据。

use crate::entity::EntityDescriptor;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// 全局实体注册表
static ENTITY_REGISTRY: Lazy<RwLock<HashMap<String, EntityDescriptor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// 注册实体描述符
///
/// 重复注册同一个类名是无害的，后注册者覆盖先注册者。
pub fn register_entity(descriptor: EntityDescriptor) {
    debug!("注册实体类型: {}", descriptor.class_name);
    ENTITY_REGISTRY
        .write()
        .insert(descriptor.class_name.clone(), descriptor);
}

/// 获取指定类名的实体描述符
pub fn entity_descriptor(class_name: &str) -> Option<EntityDescriptor> {
    ENTITY_REGISTRY.read().get(class_name).cloned()
}

/// 检查类名是否已注册
pub fn contains_entity(class_name: &str) -> bool {
    ENTITY_REGISTRY.read().contains_key(class_name)
}

/// 所有已注册的实体类名
pub fn entity_names() -> Vec<String> {
    ENTITY_REGISTRY.read().keys().cloned().collect()
}
