//! Form definition served to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::submission::GENDER_OPTIONS;

/// Input widget type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Tel,
    Select,
    Radio,
    Textarea,
}

/// One field descriptor of a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    /// Free-form rules such as `minLength`, `max` or `pattern`
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub validation: Map<String, Value>,
    /// Choices for `select` and `radio` fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub order: i32,
}

/// A versioned form definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: Uuid,
    pub version: String,
    pub fields: Vec<FormField>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FormSchema {
    /// Fields ordered by their `order` value; ties keep stored order
    pub fn sorted_fields(&self) -> Vec<FormField> {
        let mut fields = self.fields.clone();
        fields.sort_by_key(|field| field.order);
        fields
    }

    /// Definition served when no active schema has been stored
    pub fn fallback() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::nil(),
            version: "1.0.0".to_string(),
            fields: fallback_fields(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

fn field(
    name: &str,
    label: &str,
    field_type: FieldType,
    required: bool,
    placeholder: &str,
    validation: Value,
    order: i32,
) -> FormField {
    FormField {
        name: name.to_string(),
        label: label.to_string(),
        field_type,
        required,
        placeholder: placeholder.to_string(),
        validation: validation.as_object().cloned().unwrap_or_default(),
        options: Vec::new(),
        order,
    }
}

fn fallback_fields() -> Vec<FormField> {
    let mut gender = field("gender", "性别", FieldType::Select, true, "", json!({}), 3);
    gender.options = GENDER_OPTIONS.iter().map(|o| o.to_string()).collect();

    vec![
        field(
            "name",
            "姓名",
            FieldType::Text,
            true,
            "请输入您的姓名",
            json!({"minLength": 2, "maxLength": 20}),
            1,
        ),
        field(
            "age",
            "年龄",
            FieldType::Number,
            true,
            "请输入您的年龄",
            json!({"min": 1, "max": 150}),
            2,
        ),
        gender,
        field(
            "phone",
            "联系电话",
            FieldType::Tel,
            true,
            "请输入手机号码",
            json!({"pattern": r"^1[3-9]\d{9}$"}),
            4,
        ),
        field(
            "idCard",
            "身份证号",
            FieldType::Text,
            true,
            "请输入18位身份证号码",
            json!({"pattern": r"^[1-9]\d{5}(18|19|20)\d{2}(0[1-9]|1[0-2])(0[1-9]|[12]\d|3[01])\d{3}[0-9Xx]$"}),
            5,
        ),
        field(
            "address",
            "户籍地址",
            FieldType::Textarea,
            false,
            "请输入户籍地址（省市区街道等详细信息）",
            json!({"maxLength": 200}),
            6,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_schema() {
        let schema = FormSchema::fallback();
        let names: Vec<_> = schema.fields.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(schema.version, "1.0.0");
        assert_eq!(names, vec!["name", "age", "gender", "phone", "idCard", "address"]);
        assert_eq!(schema.fields[2].options, vec!["男", "女", "其他"]);
        assert!(!schema.fields[5].required);
    }

    #[test]
    fn test_sorted_fields() {
        let mut schema = FormSchema::fallback();
        schema.fields.reverse();

        let orders: Vec<_> = schema.sorted_fields().iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_field_wire_format() {
        let json = serde_json::to_value(&FormSchema::fallback().fields[3]).unwrap();
        assert_eq!(json["type"], "tel");
        assert_eq!(json["validation"]["pattern"], r"^1[3-9]\d{9}$");
        assert!(json.get("options").is_none());
    }

    #[test]
    fn test_fields_omit_empty_attributes() {
        let json = serde_json::to_value(&FormSchema::fallback().fields[2]).unwrap();
        assert_eq!(json["name"], "gender");
        assert_eq!(json["options"], json!(["男", "女", "其他"]));
        assert!(json.get("placeholder").is_none());
        assert!(json.get("validation").is_none());
    }
}
