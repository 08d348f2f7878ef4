//! # Persistence Common
//!
//! 这个 crate 提供了 Relmap 持久化层的公共类型和全局注册设施。
//!
//! ## 核心组件
//!
//! - [`ClassMetadata`] - 实体类的映射元数据
//! - [`ConfigSection`] - 配置节及类型化绑定
//! - [`Entity`] - 实体类型 trait
//! - 全局实体注册表与注解子系统
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 同步调用链，共享状态线程安全
//! - 注册优于反射：实体类型在进程启动时登记自身

pub mod annotations;
pub mod configuration;
pub mod entity;
pub mod errors;
pub mod metadata;
pub mod registry;

pub use configuration::*;
pub use entity::*;
pub use errors::*;
pub use metadata::*;
