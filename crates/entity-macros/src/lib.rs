//! # Entity Macros
//!
//! 这个 crate 提供实体类型的自动注册过程宏。
//!
//! ## 核心宏
//!
//! - [`entity`] - 实体注册宏
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use entity_macros::entity;
//!
//! #[entity(table = "posts")]
//! pub struct Post {
//!     #[column(id)]
//!     pub id: u64,
//!     #[column(name = "post_title")]
//!     pub title: String,
//!     pub body: String,
//! }
//! ```
//!
//! 宏会为结构体实现 `persistence_common::Entity`，并生成一个
//! `ctor` 启动函数，把实体描述符登记到全局实体注册表。
//! 使用方 crate 需要依赖 `persistence-common` 与 `ctor`。

use proc_macro::TokenStream;

mod entity;

/// 实体注册宏
///
/// # 参数
///
/// - `table = "表名"` - 目标表名
/// - `name = "类名"` - 覆盖默认的 `module_path!() + 结构体名`
///
/// # 字段属性
///
/// 字段可以用 `#[column(...)]` 细化映射：
///
/// - `name = "列名"` - 目标列名
/// - `column_type = "类型"` - 字段类型标识
/// - `id` - 标识字段
#[proc_macro_attribute]
pub fn entity(args: TokenStream, input: TokenStream) -> TokenStream {
    entity::entity_impl(args, input)
}
