//! 实体类型基础接口定义

use crate::metadata::ClassMetadata;

/// 实体类型 trait
///
/// 由 `#[entity]` 宏实现。实体类型在进程启动时将自身的描述符
/// 登记到全局实体注册表，供注解读取器与类型加载器查询。
pub trait Entity {
    /// 实体类名（完整模块路径）
    fn class_name() -> &'static str;

    /// 由属性标注产出的映射元数据
    fn mapping() -> ClassMetadata;
}

/// 实体描述符
///
/// 注册表中一个实体类型的登记项。`metadata` 是惰性的元数据工厂，
/// 只有在驱动实际加载该类时才会被调用。
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    /// 实体类名（完整模块路径）
    pub class_name: String,
    /// 元数据工厂函数
    pub metadata: fn() -> ClassMetadata,
}

impl EntityDescriptor {
    /// 创建新的实体描述符
    pub fn new(class_name: impl Into<String>, metadata: fn() -> ClassMetadata) -> Self {
        Self {
            class_name: class_name.into(),
            metadata,
        }
    }

    /// 从实体类型创建描述符
    pub fn of<T: Entity>() -> Self {
        Self {
            class_name: T::class_name().to_string(),
            metadata: T::mapping,
        }
    }
}
