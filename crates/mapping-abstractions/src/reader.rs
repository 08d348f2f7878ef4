//! 注解读取器抽象接口

use persistence_common::{ClassMetadata, MappingResult};
use std::fmt::Debug;

/// 注解读取器 trait
///
/// 从源代码标注中提取映射元数据。对未知的类返回 `Ok(None)`，
/// 由驱动决定如何报告缺失。
pub trait AnnotationReader: Send + Sync + Debug {
    /// 读取指定类的标注元数据
    fn read(&self, class_name: &str) -> MappingResult<Option<ClassMetadata>>;
}
