//! 驱动工厂集成测试的公共设施
//!
//! 测试本体位于 `tests/` 目录；这里提供测试共用的实体类型，
//! 保证 `#[entity]` 注册在所有测试二进制中都已发生。

use entity_macros::entity;

/// 测试用实体：带表名与列细化
#[entity(table = "widgets")]
#[derive(Debug)]
pub struct Widget {
    /// 标识字段
    #[column(id, column_type = "u64")]
    pub id: u64,
    /// 重命名列
    #[column(name = "widget_label")]
    pub label: String,
    /// 约定列
    pub stock: i32,
}

/// 测试用实体：无任何参数的最简形式
#[entity]
#[derive(Debug)]
pub struct Gadget {
    /// 标识字段
    #[column(id)]
    pub id: u64,
}
