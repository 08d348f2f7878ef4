//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置键不存在
    #[error("配置键不存在: {key}")]
    KeyNotFound {
        /// 请求的配置键
        key: String,
    },

    /// 配置类型转换失败
    #[error("配置类型转换失败: {message}")]
    TypeConversion {
        /// 失败原因
        message: String,
    },

    /// 配置绑定失败
    #[error("配置绑定失败: {source}")]
    Bind {
        /// 底层序列化错误
        #[from]
        source: serde_json::Error,
    },

    /// 配置文件读取失败
    #[error("配置文件读取失败: {path}, 原因: {source}")]
    FileRead {
        /// 文件路径
        path: String,
        /// 底层 I/O 错误
        source: std::io::Error,
    },

    /// 配置解析失败
    #[error("配置解析失败: {source}")]
    Parse {
        /// 底层解析错误
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ConfigError {
    /// 创建类型转换错误
    pub fn type_conversion(message: impl Into<String>) -> Self {
        Self::TypeConversion {
            message: message.into(),
        }
    }

    /// 创建解析错误
    pub fn parse<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parse {
            source: Box::new(source),
        }
    }
}

/// 服务依赖错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    /// 服务未注册
    #[error("服务未注册: {name}")]
    ServiceNotRegistered {
        /// 服务名称
        name: String,
    },

    /// 服务类型不匹配
    #[error("服务类型不匹配: {name}, 期望类型: {expected}")]
    ServiceTypeMismatch {
        /// 服务名称
        name: String,
        /// 期望的类型名称
        expected: String,
    },
}

/// 映射驱动运行时错误类型
#[derive(Error, Debug)]
pub enum MappingError {
    /// 元数据不存在
    #[error("未找到类的映射元数据: {class_name}")]
    MetadataNotFound {
        /// 实体类名
        class_name: String,
    },

    /// 映射文件不存在
    #[error("未找到类的映射文件: {class_name}, 搜索路径: {searched}")]
    MappingFileNotFound {
        /// 实体类名
        class_name: String,
        /// 已搜索的路径列表
        searched: String,
    },

    /// 映射文件解析失败
    #[error("映射文件解析失败: {path}, 原因: {source}")]
    Parse {
        /// 文件路径
        path: String,
        /// 底层解析错误
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 映射文件读取失败
    #[error("映射文件读取失败: {path}, 原因: {source}")]
    Io {
        /// 文件路径
        path: String,
        /// 底层 I/O 错误
        source: std::io::Error,
    },

    /// 类不属于任何已映射的命名空间
    #[error("类不属于任何已映射的命名空间: {class_name}")]
    ClassNotInNamespaces {
        /// 实体类名
        class_name: String,
    },
}

impl MappingError {
    /// 创建解析错误
    pub fn parse<E>(path: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parse {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

/// 驱动工厂错误类型
#[derive(Error, Debug)]
pub enum FactoryError {
    /// 驱动配置缺少 class 项
    #[error("驱动配置缺少 class 项: {key}")]
    MissingConfiguration {
        /// 配置键
        key: String,
    },

    /// 未知的驱动类型
    #[error("未知的驱动类型: {class}, 可用类型: {available:?}")]
    UnknownDriverClass {
        /// 请求的驱动类型标签
        class: String,
        /// 已注册的驱动类型标签
        available: Vec<String>,
    },

    /// 驱动构造失败
    #[error("驱动构造失败: {class}, 原因: {message}")]
    Construction {
        /// 驱动类型标签
        class: String,
        /// 失败原因
        message: String,
    },

    /// 检测到循环驱动配置
    #[error("检测到循环驱动配置: {chain}")]
    CyclicConfiguration {
        /// 配置键引用链
        chain: String,
    },

    /// 配置错误
    #[error("配置错误: {source}")]
    Config {
        /// 底层配置错误
        #[from]
        source: ConfigError,
    },

    /// 服务依赖错误
    #[error("服务依赖错误: {source}")]
    Dependency {
        /// 底层依赖错误
        #[from]
        source: DependencyError,
    },
}

impl FactoryError {
    /// 创建构造失败错误
    pub fn construction(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Construction {
            class: class.into(),
            message: message.into(),
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
/// 服务依赖结果类型别名
pub type DependencyResult<T> = Result<T, DependencyError>;
/// 映射驱动结果类型别名
pub type MappingResult<T> = Result<T, MappingError>;
/// 驱动工厂结果类型别名
pub type FactoryResult<T> = Result<T, FactoryError>;
