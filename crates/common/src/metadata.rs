//! 实体类映射元数据类型定义

use serde::{Deserialize, Serialize};

/// 字段映射
///
/// 描述实体结构体中一个字段到数据列的映射。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// 字段名
    pub field: String,
    /// 目标列名，缺省时按约定使用字段名
    #[serde(default)]
    pub column: Option<String>,
    /// 字段类型标识
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,
    /// 是否为标识字段
    #[serde(default)]
    pub id: bool,
}

impl FieldMapping {
    /// 创建新的字段映射
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            column: None,
            field_type: None,
            id: false,
        }
    }

    /// 设置目标列名
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// 设置字段类型
    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    /// 标记为标识字段
    pub fn with_id(mut self, id: bool) -> Self {
        self.id = id;
        self
    }

    /// 实际生效的列名
    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.field)
    }
}

/// 实体类映射元数据
///
/// 映射驱动的产出物：一个实体类的持久化映射描述。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetadata {
    /// 实体类名（完整模块路径）
    #[serde(default)]
    pub class_name: String,
    /// 目标表名
    #[serde(default)]
    pub table: Option<String>,
    /// 字段映射列表，保持声明顺序
    #[serde(default)]
    pub fields: Vec<FieldMapping>,
}

impl ClassMetadata {
    /// 创建新的类元数据
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            table: None,
            fields: Vec::new(),
        }
    }

    /// 设置目标表名
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// 追加字段映射
    pub fn with_field(mut self, field: FieldMapping) -> Self {
        self.fields.push(field);
        self
    }

    /// 查找指定字段的映射
    pub fn field(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|f| f.field == name)
    }

    /// 标识字段列表
    pub fn identifier_fields(&self) -> Vec<&FieldMapping> {
        self.fields.iter().filter(|f| f.id).collect()
    }
}
