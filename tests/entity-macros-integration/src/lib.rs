//! 实体宏集成测试的公共设施
//!
//! 测试本体位于 `tests/` 目录。
