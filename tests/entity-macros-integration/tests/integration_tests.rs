//! 实体宏的集中集成测试

use entity_macros::entity;
use persistence_common::{registry, Entity};

/// 带表名与列细化的实体
#[entity(table = "orders")]
#[derive(Debug)]
pub struct Order {
    /// 标识字段
    #[column(id, column_type = "u64")]
    pub id: u64,
    /// 重命名列
    #[column(name = "placed_at")]
    pub created: String,
    /// 约定列
    pub total: i64,
}

/// 自定义类名的实体
#[entity(name = "legacy::Invoice", table = "invoices")]
#[derive(Debug)]
pub struct Invoice {
    /// 标识字段
    #[column(id)]
    pub id: u64,
}

/// 无参数的最简实体
#[entity]
#[derive(Debug)]
pub struct Note {
    /// 正文
    pub body: String,
}

#[test]
fn test_entity_trait_implementation() {
    assert_eq!(Order::class_name(), concat!(module_path!(), "::Order"));

    let mapping = Order::mapping();
    assert_eq!(mapping.class_name, Order::class_name());
    assert_eq!(mapping.table.as_deref(), Some("orders"));
    assert_eq!(mapping.fields.len(), 3);

    let id = mapping.field("id").unwrap();
    assert!(id.id);
    assert_eq!(id.field_type.as_deref(), Some("u64"));

    let created = mapping.field("created").unwrap();
    assert_eq!(created.column_name(), "placed_at");
    assert!(!created.id);

    assert_eq!(mapping.field("total").unwrap().column_name(), "total");
}

#[test]
fn test_custom_class_name() {
    assert_eq!(Invoice::class_name(), "legacy::Invoice");
    assert_eq!(Invoice::mapping().table.as_deref(), Some("invoices"));
}

#[test]
fn test_entity_without_arguments() {
    let mapping = Note::mapping();
    assert!(mapping.table.is_none());
    assert_eq!(mapping.fields.len(), 1);
    assert_eq!(mapping.fields[0].field, "body");
}

#[test]
fn test_startup_registration_in_global_registry() {
    // ctor 生成的注册函数在 main 之前运行
    for class_name in [Order::class_name(), Invoice::class_name(), Note::class_name()] {
        assert!(
            registry::contains_entity(class_name),
            "实体未注册: {class_name}"
        );
    }

    let descriptor = registry::entity_descriptor(Invoice::class_name()).unwrap();
    let metadata = (descriptor.metadata)();
    assert_eq!(metadata.table.as_deref(), Some("invoices"));
}

#[test]
fn test_registry_lists_registered_entities() {
    let names = registry::entity_names();
    assert!(names.contains(&Order::class_name().to_string()));
}
