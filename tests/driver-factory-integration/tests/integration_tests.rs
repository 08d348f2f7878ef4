//! 驱动工厂的集中集成测试

use container_impl::StaticContainer;
use driver_factory::{
    register_driver_class, DriverArgs, DriverCapabilities, DriverClassEntry, DriverFactory,
    CACHE_FACTORY_SERVICE,
};
use driver_factory_integration_tests::{Gadget, Widget};
use mapping_abstractions::{
    CacheFactory, DriverHandle, FileMappingDriver, MappingDriver,
};
use mapping_drivers::{
    AnnotationMappingDriver, ChainMappingDriver, DefaultCacheFactory, YamlMappingDriver,
};
use persistence_common::{annotations, registry, Entity, FactoryError};
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;

fn container_with(config: Value) -> StaticContainer {
    let cache_factory: Arc<dyn CacheFactory> = Arc::new(DefaultCacheFactory::new());
    StaticContainer::builder()
        .with_service(CACHE_FACTORY_SERVICE, cache_factory)
        .with_config_value(config)
        .build()
}

#[test]
fn test_entity_macro_registers_widget() {
    assert_eq!(
        Widget::class_name(),
        "driver_factory_integration_tests::Widget"
    );
    assert!(registry::contains_entity(Widget::class_name()));
    assert!(registry::contains_entity(Gadget::class_name()));

    let mapping = Widget::mapping();
    assert_eq!(mapping.table.as_deref(), Some("widgets"));
    assert_eq!(mapping.fields.len(), 3);
    assert!(mapping.field("id").unwrap().id);
    assert_eq!(
        mapping.field("label").unwrap().column_name(),
        "widget_label"
    );
    assert_eq!(mapping.field("stock").unwrap().column_name(), "stock");
}

#[test]
fn test_file_variant_scenario() {
    // 配置 {class: yaml, paths: "/a", extension: ".yml"} 走文件分支，
    // 单个路径规整为单元素序列
    let container = container_with(json!({
        "persistence": {
            "driver": {
                "files": { "class": "yaml", "paths": "/a", "extension": ".yml" }
            }
        }
    }));

    let driver = DriverFactory::new().resolve(&container, "files").unwrap();
    let yaml = driver
        .as_any()
        .downcast_ref::<YamlMappingDriver>()
        .expect("期望 YamlMappingDriver");
    assert_eq!(yaml.paths(), &[std::path::PathBuf::from("/a")]);
    assert_eq!(yaml.extension(), ".yml");
}

#[test]
fn test_chain_scenario_with_null_entry() {
    // 配置顺序注册非空子驱动，null 条目跳过且无副作用
    let container = container_with(json!({
        "persistence": {
            "driver": {
                "orm_default": {
                    "class": "chain",
                    "default_driver": "annotated",
                    "drivers": {
                        "app::entity": "entity_files",
                        "app::other": null,
                    },
                },
                "annotated": { "class": "annotation", "paths": "src" },
                "entity_files": { "class": "yaml", "paths": "mappings" },
            }
        }
    }));

    let driver = DriverFactory::new()
        .resolve(&container, "orm_default")
        .unwrap();
    let chain = driver
        .as_any()
        .downcast_ref::<ChainMappingDriver>()
        .expect("期望 ChainMappingDriver");

    let drivers = chain.drivers();
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0].0, "app::entity");
    assert!(chain.default_driver().is_some());

    let default = chain.default_driver().unwrap();
    assert!(default
        .as_any()
        .downcast_ref::<AnnotationMappingDriver>()
        .is_some());
}

#[test]
fn test_end_to_end_chain_loads_metadata() {
    // 文件驱动接入真实映射文件，注解驱动接入宏注册的实体，
    // 组合驱动按命名空间把两路请求分发到位
    let mappings = tempfile::tempdir().unwrap();
    fs::write(
        mappings.path().join("blog.Post.orm.yml"),
        "blog::Post:\n  table: posts\n  fields:\n    - field: id\n      id: true\n",
    )
    .unwrap();

    let container = container_with(json!({
        "persistence": {
            "cache": { "default": { "class": "memory" } },
            "driver": {
                "orm_default": {
                    "class": "chain",
                    "default_driver": "annotated",
                    "drivers": { "blog": "blog_files" },
                },
                "annotated": { "class": "annotation", "paths": "src" },
                "blog_files": {
                    "class": "yaml",
                    "paths": mappings.path().to_str().unwrap(),
                },
            }
        }
    }));

    let driver = DriverFactory::new()
        .resolve(&container, "orm_default")
        .unwrap();

    // 命名空间命中：文件驱动
    let post = driver.load_metadata("blog::Post").unwrap();
    assert_eq!(post.table.as_deref(), Some("posts"));

    // 未命中命名空间：回落到注解默认驱动
    let widget = driver.load_metadata(Widget::class_name()).unwrap();
    assert_eq!(widget.table.as_deref(), Some("widgets"));

    let names = driver.all_class_names().unwrap();
    assert!(names.contains(&"blog::Post".to_string()));
    assert!(names.contains(&Widget::class_name().to_string()));
}

#[test]
fn test_type_loader_registered_at_most_once() {
    let container = container_with(json!({
        "persistence": {
            "driver": { "annotated": { "class": "annotation" } }
        }
    }));

    let factory = DriverFactory::new();
    factory.resolve(&container, "annotated").unwrap();
    let count_after_first = annotations::loader_count();
    factory.resolve(&container, "annotated").unwrap();
    factory.resolve(&container, "annotated").unwrap();

    assert_eq!(annotations::loader_count(), count_after_first);
    assert!(annotations::is_type_known(Widget::class_name()));
}

#[test]
fn test_global_basename_from_configuration() {
    let mappings = tempfile::tempdir().unwrap();
    fs::write(
        mappings.path().join("shared.orm.yml"),
        "blog::Tag:\n  table: tags\n",
    )
    .unwrap();

    let container = container_with(json!({
        "persistence": {
            "driver": {
                "files": {
                    "class": "yaml",
                    "paths": mappings.path().to_str().unwrap(),
                    "global_basename": "shared",
                }
            }
        }
    }));

    let driver = DriverFactory::new().resolve(&container, "files").unwrap();
    let yaml = driver
        .as_any()
        .downcast_ref::<YamlMappingDriver>()
        .unwrap();
    assert_eq!(yaml.global_basename(), Some("shared".to_string()));

    let tag = driver.load_metadata("blog::Tag").unwrap();
    assert_eq!(tag.table.as_deref(), Some("tags"));
}

#[test]
fn test_custom_annotation_class_routes_annotation_branch() {
    // 带注解能力的自定义类型等价于注解驱动的特化，
    // 工厂为它注入缓存注解读取器
    register_driver_class(DriverClassEntry::new(
        "audited_annotation",
        "带审计的注解驱动特化",
        DriverCapabilities::annotation(),
        Arc::new(|args: DriverArgs| match args {
            DriverArgs::Annotation { reader, paths } => Ok(DriverHandle::plain(Arc::new(
                AnnotationMappingDriver::new(reader, paths),
            ))),
            _ => Err(FactoryError::construction(
                "audited_annotation",
                "构造参数形态不匹配",
            )),
        }),
    ));

    let container = container_with(json!({
        "persistence": {
            "driver": {
                "audited": { "class": "audited_annotation", "paths": "src" }
            }
        }
    }));

    let driver = DriverFactory::new().resolve(&container, "audited").unwrap();
    let metadata = driver.load_metadata(Gadget::class_name()).unwrap();
    assert_eq!(metadata.class_name, Gadget::class_name());
}

#[test]
fn test_toml_config_source_end_to_end() {
    // TOML 配置文件与 JSON 值产出同样的解析结果
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("app.toml");
    fs::write(
        &config_path,
        concat!(
            "[persistence.driver.orm_default]\n",
            "class = \"chain\"\n",
            "default_driver = \"annotated\"\n",
            "\n",
            "[persistence.driver.orm_default.drivers]\n",
            "\"blog\" = \"blog_files\"\n",
            "\n",
            "[persistence.driver.annotated]\n",
            "class = \"annotation\"\n",
            "paths = \"src\"\n",
            "\n",
            "[persistence.driver.blog_files]\n",
            "class = \"yaml\"\n",
            "paths = [\"mappings\"]\n",
        ),
    )
    .unwrap();

    let cache_factory: Arc<dyn CacheFactory> = Arc::new(DefaultCacheFactory::new());
    let container = StaticContainer::builder()
        .with_service(CACHE_FACTORY_SERVICE, cache_factory)
        .add_config_toml(&config_path)
        .unwrap()
        .build();

    let driver = DriverFactory::new()
        .resolve(&container, "orm_default")
        .unwrap();
    let chain = driver
        .as_any()
        .downcast_ref::<ChainMappingDriver>()
        .unwrap();
    assert_eq!(chain.drivers().len(), 1);
    assert!(chain.default_driver().is_some());
}

#[test]
fn test_missing_class_and_unknown_class_errors() {
    let container = container_with(json!({
        "persistence": {
            "driver": {
                "no_class": { "paths": "/a" },
                "bad_class": { "class": "smoke-signals" },
            }
        }
    }));

    let factory = DriverFactory::new();
    assert!(matches!(
        factory.resolve(&container, "no_class"),
        Err(FactoryError::MissingConfiguration { .. })
    ));
    assert!(matches!(
        factory.resolve(&container, "bad_class"),
        Err(FactoryError::UnknownDriverClass { .. })
    ));
}

#[test]
fn test_repeated_resolution_builds_independent_graphs() {
    let container = container_with(json!({
        "persistence": {
            "driver": {
                "orm_default": {
                    "class": "chain",
                    "drivers": { "blog": "blog_files" },
                },
                "blog_files": { "class": "yaml", "paths": "mappings" },
            }
        }
    }));

    let factory = DriverFactory::new();
    let first = factory.resolve(&container, "orm_default").unwrap();
    let second = factory.resolve(&container, "orm_default").unwrap();

    assert!(!Arc::ptr_eq(&first, &second));

    let first_chain = first.as_any().downcast_ref::<ChainMappingDriver>().unwrap();
    let second_chain = second
        .as_any()
        .downcast_ref::<ChainMappingDriver>()
        .unwrap();
    assert_eq!(first_chain.drivers().len(), second_chain.drivers().len());
    assert_eq!(first_chain.drivers()[0].0, second_chain.drivers()[0].0);
    // 子驱动同样是独立实例
    assert!(!Arc::ptr_eq(
        &first_chain.drivers()[0].1,
        &second_chain.drivers()[0].1
    ));
}
