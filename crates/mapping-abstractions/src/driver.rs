//! 映射驱动抽象接口

use persistence_common::{ClassMetadata, MappingResult};
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// 映射驱动 trait
///
/// 映射驱动从某种来源（注解、文件、内存表）为实体类加载持久化
/// 映射元数据。所有驱动都必须实现此 trait。
pub trait MappingDriver: Send + Sync + Debug {
    /// 加载指定类的映射元数据
    fn load_metadata(&self, class_name: &str) -> MappingResult<ClassMetadata>;

    /// 列出该驱动可见的所有实体类名
    fn all_class_names(&self) -> MappingResult<Vec<String>>;

    /// 类是否为瞬态（不参与持久化）
    fn is_transient(&self, class_name: &str) -> MappingResult<bool>;

    /// 以 `Any` 形式暴露自身，供调用方还原具体驱动类型
    fn as_any(&self) -> &dyn Any;
}

/// 文件型映射驱动 trait
///
/// 从文件系统位置扫描映射文件的驱动。全局基础文件名指向一个
/// 集中存放多个类元数据的共享文件。
pub trait FileMappingDriver: MappingDriver {
    /// 设置全局基础文件名
    fn set_global_basename(&self, basename: &str);

    /// 当前的全局基础文件名
    fn global_basename(&self) -> Option<String>;

    /// 映射文件的后缀
    fn extension(&self) -> String;
}

/// 组合型映射驱动 trait
///
/// 按命名空间把加载请求委派给子驱动的驱动，未命中时回落到
/// 可选的默认驱动。
pub trait CompositeMappingDriver: MappingDriver {
    /// 在指定命名空间下注册子驱动
    fn add_driver(&self, driver: Arc<dyn MappingDriver>, namespace: &str);

    /// 设置默认驱动
    fn set_default_driver(&self, driver: Arc<dyn MappingDriver>);
}

/// 驱动句柄
///
/// 构造函数的产物：驱动实例加上它在构造时声明的能力视图。
/// 工厂按能力视图做后处理，不做运行时类型探测。
#[derive(Debug, Clone)]
pub struct DriverHandle {
    driver: Arc<dyn MappingDriver>,
    file: Option<Arc<dyn FileMappingDriver>>,
    composite: Option<Arc<dyn CompositeMappingDriver>>,
}

impl DriverHandle {
    /// 创建无附加能力的驱动句柄
    pub fn plain(driver: Arc<dyn MappingDriver>) -> Self {
        Self {
            driver,
            file: None,
            composite: None,
        }
    }

    /// 创建文件型驱动句柄
    pub fn file<T>(driver: Arc<T>) -> Self
    where
        T: FileMappingDriver + 'static,
    {
        Self {
            driver: driver.clone(),
            file: Some(driver),
            composite: None,
        }
    }

    /// 创建组合型驱动句柄
    pub fn composite<T>(driver: Arc<T>) -> Self
    where
        T: CompositeMappingDriver + 'static,
    {
        Self {
            driver: driver.clone(),
            composite: Some(driver),
            file: None,
        }
    }

    /// 文件能力视图
    pub fn as_file(&self) -> Option<&Arc<dyn FileMappingDriver>> {
        self.file.as_ref()
    }

    /// 组合能力视图
    pub fn as_composite(&self) -> Option<&Arc<dyn CompositeMappingDriver>> {
        self.composite.as_ref()
    }

    /// 取出驱动实例，所有权归调用方
    pub fn into_driver(self) -> Arc<dyn MappingDriver> {
        self.driver
    }
}
