//! # 示例应用程序
//!
//! 演示如何用配置驱动的工厂装配映射驱动链：
//! 文件驱动负责 `blog` 命名空间，注解驱动兜底。

use clap::Parser;
use container_impl::StaticContainer;
use driver_factory::{DriverFactory, CACHE_FACTORY_SERVICE};
use entity_macros::entity;
use mapping_abstractions::{CacheFactory, MappingDriver};
use mapping_drivers::DefaultCacheFactory;
use persistence_common::Entity;
use std::sync::Arc;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "demo-app")]
#[command(about = "Relmap 驱动工厂示例应用")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "demos/demo-app/config/app.toml")]
    config: String,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// 示例实体：用户
#[entity(table = "users")]
#[derive(Debug)]
pub struct User {
    /// 标识字段
    #[column(id, column_type = "u64")]
    pub id: u64,
    /// 登录名
    #[column(name = "login_name")]
    pub login: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&args.log_level))
        .init();

    info!("启动 Relmap 示例应用");

    // 构建容器：配置文件 + 缓存工厂服务
    let cache_factory: Arc<dyn CacheFactory> = Arc::new(DefaultCacheFactory::new());
    let container = StaticContainer::builder()
        .with_service(CACHE_FACTORY_SERVICE, cache_factory)
        .add_config_toml(&args.config)?
        .build();

    // 解析驱动链
    let factory = DriverFactory::new();
    let driver = factory.resolve(&container, "orm_default")?;

    // 演示元数据加载
    demonstrate_metadata(driver.as_ref())?;

    info!("示例应用结束");
    Ok(())
}

/// 演示通过驱动链加载元数据
fn demonstrate_metadata(driver: &dyn MappingDriver) -> anyhow::Result<()> {
    let names = driver.all_class_names()?;
    info!("驱动链可见 {} 个实体类", names.len());
    for name in &names {
        info!("  - {}", name);
    }

    // 注解路径：宏注册的实体
    let user = driver.load_metadata(User::class_name())?;
    info!(
        "实体 {} 映射到表 {:?}, {} 个字段",
        user.class_name,
        user.table,
        user.fields.len()
    );

    // 文件路径：mappings 目录下的 YAML 文档
    let post = driver.load_metadata("blog::Post")?;
    info!("实体 {} 映射到表 {:?}", post.class_name, post.table);

    Ok(())
}

/// 解析日志级别参数
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
