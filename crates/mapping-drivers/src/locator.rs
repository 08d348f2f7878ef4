//! 映射文件定位器

use persistence_common::{MappingError, MappingResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 映射文件定位器
///
/// 在一组文件系统位置中按约定查找映射文件：类名中的 `::` 替换为
/// `.`，再拼接文件后缀。位置按声明顺序搜索，先到先得。
#[derive(Debug, Clone)]
pub struct FileLocator {
    paths: Vec<PathBuf>,
    extension: String,
}

impl FileLocator {
    /// 创建新的定位器
    pub fn new(paths: Vec<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            paths,
            extension: extension.into(),
        }
    }

    /// 搜索位置列表
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// 映射文件后缀
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// 类名对应的映射文件名
    pub fn file_name_for(&self, class_name: &str) -> String {
        format!("{}{}", class_name.replace("::", "."), self.extension)
    }

    /// 查找类的映射文件
    pub fn find(&self, class_name: &str) -> MappingResult<PathBuf> {
        let file_name = self.file_name_for(class_name);
        for path in &self.paths {
            let candidate = path.join(&file_name);
            if candidate.is_file() {
                debug!("定位到映射文件: {}", candidate.display());
                return Ok(candidate);
            }
        }

        Err(MappingError::MappingFileNotFound {
            class_name: class_name.to_string(),
            searched: self
                .paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// 检查类的映射文件是否存在
    pub fn exists(&self, class_name: &str) -> bool {
        let file_name = self.file_name_for(class_name);
        self.paths.iter().any(|path| path.join(&file_name).is_file())
    }

    /// 查找指定基础文件名的共享文件
    pub fn find_basename(&self, basename: &str) -> Option<PathBuf> {
        let file_name = format!("{}{}", basename, self.extension);
        self.paths
            .iter()
            .map(|path| path.join(&file_name))
            .find(|candidate| candidate.is_file())
    }

    /// 扫描搜索位置，列出所有按约定命名的类
    ///
    /// 不存在的位置跳过；可读目录中的 I/O 失败会向上报告。
    pub fn all_class_names(&self) -> MappingResult<Vec<String>> {
        let mut names = Vec::new();
        for path in &self.paths {
            if !path.is_dir() {
                continue;
            }
            let entries = std::fs::read_dir(path).map_err(|e| MappingError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
            for entry in entries {
                let entry = entry.map_err(|e| MappingError::Io {
                    path: path.display().to_string(),
                    source: e,
                })?;
                if !entry.path().is_file() {
                    continue;
                }
                let file_name = entry.file_name();
                if let Some(stem) = file_name
                    .to_str()
                    .and_then(|name| name.strip_suffix(&self.extension))
                {
                    names.push(stem.replace('.', "::"));
                }
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }
}

/// 返回给定路径用于错误消息的展示形式
pub(crate) fn display_path(path: &Path) -> String {
    path.display().to_string()
}
