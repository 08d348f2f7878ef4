//! # Driver Factory
//!
//! 这个 crate 实现配置驱动的映射驱动工厂：从容器的配置存取读取
//! 命名配置节，决定构造哪种驱动变体，注入缓存注解读取器等协作
//! 者，递归装配组合驱动，返回可用的驱动实例。
//!
//! ## 解析流程
//!
//! ```text
//! 配置节 persistence.driver.<key>
//!         │ 绑定 DriverConfig，合并默认值
//!         ▼
//! 驱动类型注册表（标签 → 能力 + 构造闭包）
//!         │ 按能力选择构造分支：注解 / 文件 / 兜底
//!         ▼
//! DriverHandle（实例 + 能力视图）
//!         │ 全局基础文件名、组合驱动后处理（递归解析子配置）
//!         ▼
//! Arc<dyn MappingDriver>
//! ```

pub mod config;
pub mod factory;
pub mod registry;

pub use config::DriverConfig;
pub use factory::{DriverFactory, ResolveContext};
pub use registry::{
    available_classes, driver_class, driver_classes, register_driver_class, ConstructFn,
    DriverArgs, DriverCapabilities, DriverClassEntry,
};

/// 驱动配置节的键前缀
pub const DRIVER_SECTION_PREFIX: &str = "persistence.driver";

/// 缓存工厂在容器中的服务名
pub const CACHE_FACTORY_SERVICE: &str = "persistence.cache_factory";
