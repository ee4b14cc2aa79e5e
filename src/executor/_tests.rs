#[cfg(test)]
pub mod fixtures {
    use indexmap::IndexMap;
    use serde_json::{json, Value};

    use crate::JsonPrimitive;

    /// Tab-delimited table of `(str string, countVal int)`.
    pub const COLLECT_TSV: &str = "twelve\t12\ntwelve\t1\neleven\t11\neleven\t10\n";

    pub fn collect_schema() -> IndexMap<String, JsonPrimitive> {
        IndexMap::from([
            ("str".to_string(), JsonPrimitive::String),
            ("countVal".to_string(), JsonPrimitive::Int),
        ])
    }

    pub fn collect_rows() -> Vec<Value> {
        vec![
            json!({ "str": "twelve", "countVal": 12 }),
            json!({ "str": "twelve", "countVal": 1 }),
            json!({ "str": "eleven", "countVal": 11 }),
            json!({ "str": "eleven", "countVal": 10 }),
        ]
    }

    /// Same shape with string values and some gaps.
    pub fn rows_with_nulls() -> Vec<Value> {
        vec![
            json!({ "g": "a", "v": "x" }),
            json!({ "g": "a", "v": null }),
            json!({ "g": "b" }),
            json!({ "g": "a", "v": "y" }),
            json!({ "g": "b", "v": "z" }),
            json!({ "g": null, "v": "w" }),
        ]
    }
}
