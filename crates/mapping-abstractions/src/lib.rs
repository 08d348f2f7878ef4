//! # Mapping Abstractions
//!
//! 这个 crate 定义了映射驱动体系的核心抽象：
//!
//! - [`MappingDriver`] - 映射驱动能力契约（按类名加载元数据）
//! - [`FileMappingDriver`] / [`CompositeMappingDriver`] - 能力扩展接口
//! - [`DriverHandle`] - 构造产物的能力视图组合
//! - [`AnnotationReader`] - 注解读取器
//! - [`MetadataCache`] / [`CacheFactory`] - 元数据缓存及其工厂
//!
//! 驱动能力不通过运行时类型检查发现，而是在构造时由
//! [`DriverHandle`] 显式声明。

pub mod cache;
pub mod driver;
pub mod reader;

pub use cache::*;
pub use driver::*;
pub use reader::*;
