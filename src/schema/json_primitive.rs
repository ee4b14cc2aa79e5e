use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Coarse classification of the JSON values flowing through an aggregate.
///
/// Used to declare the element type of an aggregate argument and the
/// column types of a [`DelimitedSource`](crate::source::DelimitedSource).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JsonPrimitive {
    /// JSON null
    Null,
    /// JSON boolean
    Bool,
    /// Integer number
    Int,
    /// Floating-point number
    Float,
    /// String
    String,
    /// JSON object (map)
    Object,
    /// JSON array
    Array,
}

impl JsonPrimitive {
    /// Classify a serde_json `Value`.
    pub fn of_value(v: &Value) -> JsonPrimitive {
        match v {
            Value::Null => JsonPrimitive::Null,
            Value::Bool(_) => JsonPrimitive::Bool,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    JsonPrimitive::Int
                } else {
                    JsonPrimitive::Float
                }
            }
            Value::String(_) => JsonPrimitive::String,
            Value::Array(_) => JsonPrimitive::Array,
            Value::Object(_) => JsonPrimitive::Object,
        }
    }

    /// Common type of two element types seen in the same column.
    ///
    /// `Int` + `Float` -> `Float`; `Null` yields the other side; any other
    /// mix keeps the left (first seen) type.
    pub fn promote(a: JsonPrimitive, b: JsonPrimitive) -> JsonPrimitive {
        use JsonPrimitive::*;
        if a == b { return a; }
        match (a, b) {
            (Int, Float) | (Float, Int) => Float,
            (Null, y) => y,
            (x, _) => x,
        }
    }

    /// Parse a column type name as written in a table declaration
    /// (`string`, `int`, `bigint`, `double`, `boolean`, ...).
    pub fn from_type_name(name: &str) -> Option<JsonPrimitive> {
        match name.trim().to_ascii_lowercase().as_str() {
            "string" | "varchar" | "text" | "char" => Some(JsonPrimitive::String),
            "int" | "integer" | "bigint" | "smallint" | "tinyint" => Some(JsonPrimitive::Int),
            "float" | "double" | "real" | "decimal" => Some(JsonPrimitive::Float),
            "bool" | "boolean" => Some(JsonPrimitive::Bool),
            "map" | "struct" | "object" => Some(JsonPrimitive::Object),
            "array" | "list" => Some(JsonPrimitive::Array),
            "null" | "void" => Some(JsonPrimitive::Null),
            _ => None,
        }
    }
}

impl fmt::Display for JsonPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JsonPrimitive::Null => "null",
            JsonPrimitive::Bool => "bool",
            JsonPrimitive::Int => "int",
            JsonPrimitive::Float => "float",
            JsonPrimitive::String => "string",
            JsonPrimitive::Object => "object",
            JsonPrimitive::Array => "array",
        };
        f.write_str(s)
    }
}
