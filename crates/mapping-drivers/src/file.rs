//! 文件型映射驱动
//!
//! 映射文件是以类名为键的文档：每类一个文件，或在设置了全局
//! 基础文件名时共享一个集中文件。三种格式驱动共用同一套定位
//! 与缓存逻辑，只在解析函数上有差别。

use crate::locator::{display_path, FileLocator};
use mapping_abstractions::{FileMappingDriver, MappingDriver};
use parking_lot::RwLock;
use persistence_common::{ClassMetadata, MappingError, MappingResult};
use std::any::Any;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 映射文档解析函数
///
/// 输入文件内容，输出 `类名 → 元数据` 表。
pub type ParseFn = fn(path: &Path, content: &str) -> MappingResult<HashMap<String, ClassMetadata>>;

/// 文件型驱动公共核心
///
/// 持有定位器、全局基础文件名和共享文件的惰性缓存。
/// 设置新的基础文件名会使缓存失效。
#[derive(Debug)]
pub struct FileDriverCore {
    locator: FileLocator,
    global_basename: RwLock<Option<String>>,
    global_cache: RwLock<Option<HashMap<String, ClassMetadata>>>,
    parse: ParseFn,
}

impl FileDriverCore {
    /// 创建新的驱动核心
    pub fn new(locator: FileLocator, parse: ParseFn) -> Self {
        Self {
            locator,
            global_basename: RwLock::new(None),
            global_cache: RwLock::new(None),
            parse,
        }
    }

    /// 定位器
    pub fn locator(&self) -> &FileLocator {
        &self.locator
    }

    /// 设置全局基础文件名并使共享文件缓存失效
    pub fn set_global_basename(&self, basename: &str) {
        debug!("设置全局基础文件名: {}", basename);
        *self.global_basename.write() = Some(basename.to_string());
        *self.global_cache.write() = None;
    }

    /// 当前的全局基础文件名
    pub fn global_basename(&self) -> Option<String> {
        self.global_basename.read().clone()
    }

    /// 读取并解析单个映射文件
    fn parse_file(&self, path: &Path) -> MappingResult<HashMap<String, ClassMetadata>> {
        let content = std::fs::read_to_string(path).map_err(|e| MappingError::Io {
            path: display_path(path),
            source: e,
        })?;
        let mut documents = (self.parse)(path, &content)?;
        for (class_name, metadata) in &mut documents {
            if metadata.class_name.is_empty() {
                metadata.class_name = class_name.clone();
            }
        }
        Ok(documents)
    }

    /// 共享文件内容，按需装载并缓存
    fn global_documents(&self) -> MappingResult<HashMap<String, ClassMetadata>> {
        let basename = match self.global_basename.read().clone() {
            Some(basename) => basename,
            None => return Ok(HashMap::new()),
        };

        if let Some(cached) = self.global_cache.read().as_ref() {
            return Ok(cached.clone());
        }

        let documents = match self.locator.find_basename(&basename) {
            Some(path) => self.parse_file(&path)?,
            None => HashMap::new(),
        };
        *self.global_cache.write() = Some(documents.clone());
        Ok(documents)
    }

    /// 加载指定类的元数据
    ///
    /// 先查共享文件，再按约定查每类文件。
    pub fn load_metadata(&self, class_name: &str) -> MappingResult<ClassMetadata> {
        if let Some(metadata) = self.global_documents()?.remove(class_name) {
            return Ok(metadata);
        }

        let path = self.locator.find(class_name)?;
        self.parse_file(&path)?
            .remove(class_name)
            .ok_or_else(|| MappingError::MetadataNotFound {
                class_name: class_name.to_string(),
            })
    }

    /// 列出所有可见的类名
    ///
    /// 共享文件本身不算实体类，按约定扫描时剔除。
    pub fn all_class_names(&self) -> MappingResult<Vec<String>> {
        let mut names: Vec<String> = self.global_documents()?.into_keys().collect();
        let scanned = self.locator.all_class_names()?;
        match self.global_basename.read().as_deref() {
            Some(basename) => names.extend(scanned.into_iter().filter(|name| name != basename)),
            None => names.extend(scanned),
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// 类是否为瞬态
    pub fn is_transient(&self, class_name: &str) -> MappingResult<bool> {
        if self.global_documents()?.contains_key(class_name) {
            return Ok(false);
        }
        Ok(!self.locator.exists(class_name))
    }
}

/// YAML 映射驱动
///
/// 从 `.orm.yml` 文档加载映射元数据。
#[derive(Debug)]
pub struct YamlMappingDriver {
    core: FileDriverCore,
}

impl YamlMappingDriver {
    /// 缺省的映射文件后缀
    pub const DEFAULT_EXTENSION: &'static str = ".orm.yml";

    /// 以指定后缀创建驱动
    pub fn new(paths: Vec<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            core: FileDriverCore::new(FileLocator::new(paths, extension), parse_yaml),
        }
    }

    /// 以缺省后缀创建驱动
    pub fn with_default_extension(paths: Vec<PathBuf>) -> Self {
        Self::new(paths, Self::DEFAULT_EXTENSION)
    }

    /// 搜索位置列表
    pub fn paths(&self) -> &[PathBuf] {
        self.core.locator().paths()
    }
}

impl MappingDriver for YamlMappingDriver {
    fn load_metadata(&self, class_name: &str) -> MappingResult<ClassMetadata> {
        self.core.load_metadata(class_name)
    }

    fn all_class_names(&self) -> MappingResult<Vec<String>> {
        self.core.all_class_names()
    }

    fn is_transient(&self, class_name: &str) -> MappingResult<bool> {
        self.core.is_transient(class_name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FileMappingDriver for YamlMappingDriver {
    fn set_global_basename(&self, basename: &str) {
        self.core.set_global_basename(basename);
    }

    fn global_basename(&self) -> Option<String> {
        self.core.global_basename()
    }

    fn extension(&self) -> String {
        self.core.locator().extension().to_string()
    }
}

/// TOML 映射驱动
///
/// 从 `.orm.toml` 文档加载映射元数据。
#[derive(Debug)]
pub struct TomlMappingDriver {
    core: FileDriverCore,
}

impl TomlMappingDriver {
    /// 缺省的映射文件后缀
    pub const DEFAULT_EXTENSION: &'static str = ".orm.toml";

    /// 以指定后缀创建驱动
    pub fn new(paths: Vec<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            core: FileDriverCore::new(FileLocator::new(paths, extension), parse_toml),
        }
    }

    /// 以缺省后缀创建驱动
    pub fn with_default_extension(paths: Vec<PathBuf>) -> Self {
        Self::new(paths, Self::DEFAULT_EXTENSION)
    }

    /// 搜索位置列表
    pub fn paths(&self) -> &[PathBuf] {
        self.core.locator().paths()
    }
}

impl MappingDriver for TomlMappingDriver {
    fn load_metadata(&self, class_name: &str) -> MappingResult<ClassMetadata> {
        self.core.load_metadata(class_name)
    }

    fn all_class_names(&self) -> MappingResult<Vec<String>> {
        self.core.all_class_names()
    }

    fn is_transient(&self, class_name: &str) -> MappingResult<bool> {
        self.core.is_transient(class_name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FileMappingDriver for TomlMappingDriver {
    fn set_global_basename(&self, basename: &str) {
        self.core.set_global_basename(basename);
    }

    fn global_basename(&self) -> Option<String> {
        self.core.global_basename()
    }

    fn extension(&self) -> String {
        self.core.locator().extension().to_string()
    }
}

/// JSON 映射驱动
///
/// 从 `.orm.json` 文档加载映射元数据。
#[derive(Debug)]
pub struct JsonMappingDriver {
    core: FileDriverCore,
}

impl JsonMappingDriver {
    /// 缺省的映射文件后缀
    pub const DEFAULT_EXTENSION: &'static str = ".orm.json";

    /// 以指定后缀创建驱动
    pub fn new(paths: Vec<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            core: FileDriverCore::new(FileLocator::new(paths, extension), parse_json),
        }
    }

    /// 以缺省后缀创建驱动
    pub fn with_default_extension(paths: Vec<PathBuf>) -> Self {
        Self::new(paths, Self::DEFAULT_EXTENSION)
    }

    /// 搜索位置列表
    pub fn paths(&self) -> &[PathBuf] {
        self.core.locator().paths()
    }
}

impl MappingDriver for JsonMappingDriver {
    fn load_metadata(&self, class_name: &str) -> MappingResult<ClassMetadata> {
        self.core.load_metadata(class_name)
    }

    fn all_class_names(&self) -> MappingResult<Vec<String>> {
        self.core.all_class_names()
    }

    fn is_transient(&self, class_name: &str) -> MappingResult<bool> {
        self.core.is_transient(class_name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FileMappingDriver for JsonMappingDriver {
    fn set_global_basename(&self, basename: &str) {
        self.core.set_global_basename(basename);
    }

    fn global_basename(&self) -> Option<String> {
        self.core.global_basename()
    }

    fn extension(&self) -> String {
        self.core.locator().extension().to_string()
    }
}

fn parse_yaml(path: &Path, content: &str) -> MappingResult<HashMap<String, ClassMetadata>> {
    serde_yaml::from_str(content).map_err(|e| MappingError::parse(display_path(path), e))
}

fn parse_toml(path: &Path, content: &str) -> MappingResult<HashMap<String, ClassMetadata>> {
    toml::from_str(content).map_err(|e| MappingError::parse(display_path(path), e))
}

fn parse_json(path: &Path, content: &str) -> MappingResult<HashMap<String, ClassMetadata>> {
    serde_json::from_str(content).map_err(|e| MappingError::parse(display_path(path), e))
}
