//! 驱动解析工厂

use crate::config::DriverConfig;
use crate::registry;
use crate::registry::DriverArgs;
use crate::{CACHE_FACTORY_SERVICE, DRIVER_SECTION_PREFIX};
use container_abstractions::{resolve_typed, ServiceContainer};
use mapping_abstractions::{
    AnnotationReader, CacheFactory, CompositeMappingDriver, FileMappingDriver, MappingDriver,
};
use mapping_drivers::{CachingReader, RegistryAnnotationReader};
use persistence_common::{annotations, registry as entity_registry, FactoryError, FactoryResult};
use std::sync::{Arc, Once};
use tracing::debug;

/// 类型加载器的进程级一次性注册
static TYPE_LOADER_REGISTRATION: Once = Once::new();

/// 确保注解类型加载器已注册
///
/// 加载器回答“该类名是否可加载”，即全局实体注册表是否认识它。
/// 注解子系统本身容忍重复注册，这里仍以 `Once` 保证至多一次。
fn ensure_type_loader_registered() {
    TYPE_LOADER_REGISTRATION.call_once(|| {
        annotations::register_type_loader(Arc::new(entity_registry::contains_entity));
    });
}

/// 解析上下文
///
/// 记录当前递归解析经过的配置键，把循环引用转换为
/// [`FactoryError::CyclicConfiguration`] 报告。
#[derive(Debug, Default)]
pub struct ResolveContext {
    /// 当前解析链
    resolution_chain: Vec<String>,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 把配置键压入解析链
    pub fn push_key(&mut self, config_key: &str) -> FactoryResult<()> {
        if self.resolution_chain.iter().any(|key| key == config_key) {
            let mut chain = self.resolution_chain.join(" -> ");
            chain.push_str(" -> ");
            chain.push_str(config_key);
            return Err(FactoryError::CyclicConfiguration { chain });
        }
        self.resolution_chain.push(config_key.to_string());
        Ok(())
    }

    /// 从解析链弹出最近的配置键
    pub fn pop_key(&mut self) {
        self.resolution_chain.pop();
    }
}

/// 映射驱动工厂
///
/// 对每个配置键，按固定优先级选择构造分支（注解、文件、兜底），
/// 再按能力视图做全局基础文件名与组合驱动后处理。所有失败立即
/// 向调用方传播，不做重试。
#[derive(Debug, Default)]
pub struct DriverFactory;

impl DriverFactory {
    /// 创建新的工厂
    pub fn new() -> Self {
        Self
    }

    /// 解析配置键对应的映射驱动
    ///
    /// 配置节位于 `persistence.driver.<config_key>`；节缺失按默认值
    /// 处理，因而缺少 `class` 时报告
    /// [`FactoryError::MissingConfiguration`]。
    pub fn resolve(
        &self,
        container: &dyn ServiceContainer,
        config_key: &str,
    ) -> FactoryResult<Arc<dyn MappingDriver>> {
        let mut context = ResolveContext::new();
        self.resolve_with_context(container, config_key, &mut context)
    }

    /// 在给定解析上下文中解析配置键
    fn resolve_with_context(
        &self,
        container: &dyn ServiceContainer,
        config_key: &str,
        context: &mut ResolveContext,
    ) -> FactoryResult<Arc<dyn MappingDriver>> {
        context.push_key(config_key)?;

        let section_key = format!("{DRIVER_SECTION_PREFIX}.{config_key}");
        let config = DriverConfig::from_section(container.get_section(&section_key)?)?;
        let class = config.require_class(config_key)?;

        let entry = registry::driver_class(&class).ok_or_else(|| {
            FactoryError::UnknownDriverClass {
                class: class.clone(),
                available: registry::available_classes(),
            }
        })?;

        debug!("解析驱动配置: {} ({})", config_key, class);

        let handle = if entry.capabilities.annotation {
            ensure_type_loader_registered();

            let cache_factory: Arc<dyn CacheFactory> =
                resolve_typed(container, CACHE_FACTORY_SERVICE)?;
            let cache = cache_factory.build(container, &config.cache)?;
            let reader: Arc<dyn AnnotationReader> = Arc::new(CachingReader::new(
                Arc::new(RegistryAnnotationReader::new()),
                cache,
            ));

            entry.build(DriverArgs::Annotation {
                reader,
                paths: config.paths.clone(),
            })?
        } else if let (Some(extension), true) = (config.extension.clone(), entry.capabilities.file)
        {
            entry.build(DriverArgs::File {
                paths: config.paths.clone(),
                extension,
            })?
        } else {
            entry.build(DriverArgs::Paths {
                paths: config.paths.clone(),
            })?
        };

        if let Some(basename) = &config.global_basename {
            if let Some(file) = handle.as_file() {
                file.set_global_basename(basename);
            }
        }

        if let Some(composite) = handle.as_composite() {
            if let Some(default_key) = &config.default_driver {
                let default = self.resolve_with_context(container, default_key, context)?;
                composite.set_default_driver(default);
            }

            for (namespace, driver_key) in &config.drivers {
                let Some(driver_key) = driver_key else {
                    continue;
                };
                let driver = self.resolve_with_context(container, driver_key, context)?;
                composite.add_driver(driver, namespace);
            }
        }

        context.pop_key();
        Ok(handle.into_driver())
    }
}
