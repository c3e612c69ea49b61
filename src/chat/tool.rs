use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::LlmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolType {
    #[default]
    Function,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// Always a decoded object, whatever encoding the provider used.
    #[serde(default, deserialize_with = "deserialize_arguments")]
    pub arguments: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub index: u32,
    pub function: FunctionCall,
    #[serde(rename = "type", default)]
    pub r#type: ToolType,
}

impl ToolCall {
    /// Object arguments are used as-is, `null` becomes `{}`, and any other
    /// value is wrapped as `{"input": value}`.
    pub fn new(
        id: impl Into<String>,
        index: u32,
        name: impl Into<String>,
        arguments: Value,
    ) -> Self {
        let arguments = match arguments {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("input".to_string(), other);
                map
            }
        };

        Self {
            id: id.into(),
            index,
            function: FunctionCall {
                name: name.into(),
                arguments,
            },
            r#type: ToolType::Function,
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn arguments(&self) -> Value {
        Value::Object(self.function.arguments.clone())
    }
}

/// Decode tool call arguments sent either as an object or as a string
/// holding a JSON object.
///
/// Some API versions double-encode the arguments; this tolerates both.
pub fn decode_arguments(raw: &Value) -> Result<Map<String, Value>, LlmError> {
    match raw {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map.clone()),
        Value::String(encoded) if encoded.trim().is_empty() => Ok(Map::new()),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(Value::Null) => Ok(Map::new()),
            Ok(other) => Err(LlmError::parse(
                "tool call arguments must encode a JSON object",
                <serde_json::Error as de::Error>::custom(format!("got {other}")),
            )),
            Err(e) => Err(LlmError::parse("tool call arguments are not valid JSON", e)),
        },
        other => Err(LlmError::parse(
            "tool call arguments must be an object or a JSON string",
            <serde_json::Error as de::Error>::custom(format!("got {other}")),
        )),
    }
}

fn deserialize_arguments<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    decode_arguments(&raw).map_err(de::Error::custom)
}

/// JSON-schema-like description of a tool parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyDefinition {
    #[serde(rename = "type", default)]
    pub r#type: String,

    #[serde(default)]
    pub description: String,

    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyDefinition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertyDefinition>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl PropertyDefinition {
    /// Convert a JSON schema into a property tree.
    ///
    /// A property given as a bare scalar, e.g. `"a": "number"`, is read as
    /// `{"type": "number"}`. Non-object schemas yield an empty definition.
    pub fn from_schema(schema: &Value) -> Self {
        let Value::Object(fields) = schema else {
            return Self::default();
        };

        let mut definition = Self {
            r#type: string_field(fields, "type"),
            description: string_field(fields, "description"),
            additional_properties: fields.get("additionalProperties").and_then(Value::as_bool),
            default: fields.get("default").filter(|v| !v.is_null()).cloned(),
            ..Self::default()
        };

        if let Some(Value::Object(properties)) = fields.get("properties") {
            for (name, property) in properties {
                let child = match property {
                    Value::Object(_) => Self::from_schema(property),
                    Value::String(type_name) => Self::scalar(type_name.clone()),
                    other => Self::scalar(other.to_string()),
                };
                definition.properties.insert(name.clone(), child);
            }
        }

        if let Some(Value::Array(required)) = fields.get("required") {
            definition.required = required
                .iter()
                .filter_map(|name| name.as_str().map(str::to_string))
                .collect();
        }

        if let Some(items) = fields.get("items").filter(|v| v.is_object()) {
            definition.items = Some(Box::new(Self::from_schema(items)));
        }

        if let Some(Value::Array(values)) = fields.get("enum") {
            definition.enum_values = values.clone();
        }

        definition
    }

    fn scalar(type_name: String) -> Self {
        Self {
            r#type: type_name,
            ..Self::default()
        }
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub strict: bool,
    pub parameters: PropertyDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type", default)]
    pub r#type: ToolType,
    pub function: FunctionDefinition,
}

impl ToolDefinition {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: &Value,
    ) -> Self {
        Self {
            r#type: ToolType::Function,
            function: FunctionDefinition {
                name: name.into(),
                description: description.into(),
                strict: false,
                parameters: PropertyDefinition::from_schema(parameters),
            },
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.function.strict = strict;
        self
    }
}

/// Wire-level tool choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoiceType {
    #[default]
    Auto,
    /// Force at least one tool call.
    Any,
    None,
    Required,
}
