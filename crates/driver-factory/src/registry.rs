//! 驱动类型注册表
//!
//! 配置中的 `class` 标签在这里解析为能力标志加构造闭包。内置
//! 类型在首次访问时装入；宿主可以登记自定义类型，带注解或文件
//! 能力的自定义类型走对应的构造分支，等价于原有“子类特化”的
//! 语义而无需运行时类型检查。

use mapping_abstractions::{AnnotationReader, DriverHandle};
use mapping_drivers::{
    AnnotationMappingDriver, ChainMappingDriver, JsonMappingDriver, StaticMappingDriver,
    TomlMappingDriver, YamlMappingDriver,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use persistence_common::{FactoryError, FactoryResult};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// 驱动能力标志
///
/// 决定工厂选择哪个构造分支以及允许哪些后处理。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverCapabilities {
    /// 注解型：构造时注入缓存注解读取器
    pub annotation: bool,
    /// 文件型：接受后缀过滤与全局基础文件名
    pub file: bool,
    /// 组合型：接受子驱动与默认驱动注册
    pub composite: bool,
}

impl DriverCapabilities {
    /// 无附加能力
    pub const fn none() -> Self {
        Self {
            annotation: false,
            file: false,
            composite: false,
        }
    }

    /// 注解能力
    pub const fn annotation() -> Self {
        Self {
            annotation: true,
            file: false,
            composite: false,
        }
    }

    /// 文件能力
    pub const fn file() -> Self {
        Self {
            annotation: false,
            file: true,
            composite: false,
        }
    }

    /// 组合能力
    pub const fn composite() -> Self {
        Self {
            annotation: false,
            file: false,
            composite: true,
        }
    }
}

/// 驱动构造参数
///
/// 工厂按构造分支准备参数，构造闭包拒绝不匹配的形态。
#[derive(Debug, Clone)]
pub enum DriverArgs {
    /// 注解分支：缓存注解读取器加位置列表
    Annotation {
        /// 缓存注解读取器
        reader: Arc<dyn AnnotationReader>,
        /// 实体源码位置
        paths: Vec<PathBuf>,
    },
    /// 文件分支：位置列表加后缀过滤
    File {
        /// 映射文件位置
        paths: Vec<PathBuf>,
        /// 映射文件后缀
        extension: String,
    },
    /// 兜底分支：仅位置列表
    Paths {
        /// 映射文件位置
        paths: Vec<PathBuf>,
    },
}

impl DriverArgs {
    /// 参数形态名称，用于错误消息
    fn shape(&self) -> &'static str {
        match self {
            Self::Annotation { .. } => "annotation",
            Self::File { .. } => "file",
            Self::Paths { .. } => "paths",
        }
    }
}

/// 驱动构造函数类型
pub type ConstructFn = Arc<dyn Fn(DriverArgs) -> FactoryResult<DriverHandle> + Send + Sync>;

/// 驱动类型登记项
#[derive(Clone)]
pub struct DriverClassEntry {
    /// 类型标签
    pub class: String,
    /// 类型描述
    pub description: String,
    /// 能力标志
    pub capabilities: DriverCapabilities,
    /// 构造闭包
    pub construct: ConstructFn,
}

impl std::fmt::Debug for DriverClassEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverClassEntry")
            .field("class", &self.class)
            .field("description", &self.description)
            .field("capabilities", &self.capabilities)
            .field("construct", &"<function>")
            .finish()
    }
}

impl DriverClassEntry {
    /// 创建新的登记项
    pub fn new(
        class: impl Into<String>,
        description: impl Into<String>,
        capabilities: DriverCapabilities,
        construct: ConstructFn,
    ) -> Self {
        Self {
            class: class.into(),
            description: description.into(),
            capabilities,
            construct,
        }
    }

    /// 调用构造闭包
    pub fn build(&self, args: DriverArgs) -> FactoryResult<DriverHandle> {
        (self.construct.as_ref())(args)
    }
}

/// 全局驱动类型注册表
static DRIVER_CLASSES: Lazy<RwLock<HashMap<String, DriverClassEntry>>> =
    Lazy::new(|| RwLock::new(builtin_driver_classes()));

/// 登记驱动类型
///
/// 同名标签后登记者覆盖先登记者。
pub fn register_driver_class(entry: DriverClassEntry) {
    debug!("登记驱动类型: {}", entry.class);
    DRIVER_CLASSES.write().insert(entry.class.clone(), entry);
}

/// 查找驱动类型登记项
pub fn driver_class(class: &str) -> Option<DriverClassEntry> {
    DRIVER_CLASSES.read().get(class).cloned()
}

/// 所有已登记的 (标签, 描述) 列表
pub fn driver_classes() -> Vec<(String, String)> {
    let mut classes: Vec<(String, String)> = DRIVER_CLASSES
        .read()
        .values()
        .map(|entry| (entry.class.clone(), entry.description.clone()))
        .collect();
    classes.sort();
    classes
}

/// 所有已登记的标签
pub fn available_classes() -> Vec<String> {
    let mut classes: Vec<String> = DRIVER_CLASSES.read().keys().cloned().collect();
    classes.sort();
    classes
}

/// 构造闭包收到不匹配参数时的错误
fn unexpected_args(class: &str, args: &DriverArgs) -> FactoryError {
    FactoryError::construction(
        class,
        format!("构造参数形态不匹配: {}", args.shape()),
    )
}

/// 内置驱动类型
fn builtin_driver_classes() -> HashMap<String, DriverClassEntry> {
    let entries = [
        DriverClassEntry::new(
            "annotation",
            "基于实体属性标注的注解驱动",
            DriverCapabilities::annotation(),
            Arc::new(|args: DriverArgs| match args {
                DriverArgs::Annotation { reader, paths } => Ok(DriverHandle::plain(Arc::new(
                    AnnotationMappingDriver::new(reader, paths),
                ))),
                other => Err(unexpected_args("annotation", &other)),
            }) as ConstructFn,
        ),
        DriverClassEntry::new(
            "yaml",
            "YAML 映射文件驱动",
            DriverCapabilities::file(),
            Arc::new(|args: DriverArgs| match args {
                DriverArgs::File { paths, extension } => Ok(DriverHandle::file(Arc::new(
                    YamlMappingDriver::new(paths, extension),
                ))),
                DriverArgs::Paths { paths } => Ok(DriverHandle::file(Arc::new(
                    YamlMappingDriver::with_default_extension(paths),
                ))),
                other => Err(unexpected_args("yaml", &other)),
            }) as ConstructFn,
        ),
        DriverClassEntry::new(
            "toml",
            "TOML 映射文件驱动",
            DriverCapabilities::file(),
            Arc::new(|args: DriverArgs| match args {
                DriverArgs::File { paths, extension } => Ok(DriverHandle::file(Arc::new(
                    TomlMappingDriver::new(paths, extension),
                ))),
                DriverArgs::Paths { paths } => Ok(DriverHandle::file(Arc::new(
                    TomlMappingDriver::with_default_extension(paths),
                ))),
                other => Err(unexpected_args("toml", &other)),
            }) as ConstructFn,
        ),
        DriverClassEntry::new(
            "json",
            "JSON 映射文件驱动",
            DriverCapabilities::file(),
            Arc::new(|args: DriverArgs| match args {
                DriverArgs::File { paths, extension } => Ok(DriverHandle::file(Arc::new(
                    JsonMappingDriver::new(paths, extension),
                ))),
                DriverArgs::Paths { paths } => Ok(DriverHandle::file(Arc::new(
                    JsonMappingDriver::with_default_extension(paths),
                ))),
                other => Err(unexpected_args("json", &other)),
            }) as ConstructFn,
        ),
        DriverClassEntry::new(
            "chain",
            "按命名空间委派的组合驱动",
            DriverCapabilities::composite(),
            Arc::new(|args: DriverArgs| match args {
                DriverArgs::Paths { .. } => {
                    Ok(DriverHandle::composite(Arc::new(ChainMappingDriver::new())))
                }
                other => Err(unexpected_args("chain", &other)),
            }) as ConstructFn,
        ),
        DriverClassEntry::new(
            "static",
            "程序内登记元数据的静态驱动",
            DriverCapabilities::none(),
            Arc::new(|args: DriverArgs| match args {
                DriverArgs::Paths { paths } => Ok(DriverHandle::plain(Arc::new(
                    StaticMappingDriver::new(paths),
                ))),
                other => Err(unexpected_args("static", &other)),
            }) as ConstructFn,
        ),
    ];

    entries
        .into_iter()
        .map(|entry| (entry.class.clone(), entry))
        .collect()
}
