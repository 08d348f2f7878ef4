//! # Mapping Drivers
//!
//! 这个 crate 提供具体的映射驱动实现：
//!
//! - [`AnnotationMappingDriver`] - 基于实体注册表读取属性标注元数据
//! - [`YamlMappingDriver`] / [`TomlMappingDriver`] / [`JsonMappingDriver`] -
//!   从文件系统扫描映射文件的文件型驱动
//! - [`ChainMappingDriver`] - 按命名空间委派的组合驱动
//! - [`StaticMappingDriver`] - 程序内登记元数据的静态驱动
//!
//! 以及配套的注解读取器、缓存读取器与内存缓存实现。

pub mod annotation;
pub mod cache;
pub mod chain;
pub mod file;
pub mod locator;
pub mod static_driver;

pub use annotation::*;
pub use cache::*;
pub use chain::*;
pub use file::*;
pub use locator::*;
pub use static_driver::*;
