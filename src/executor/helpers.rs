use serde_json::{Map, Value};

pub struct Helpers;

impl Helpers {
    /// Stable string key for a tuple of group-key values.
    pub fn canonical_tuple(vals: &[Value]) -> String {
        // arrays of plain values always serialize
        serde_json::to_string(vals).unwrap_or_default()
    }

    /// Column value of a row; a missing column or a non-object row reads as NULL.
    pub fn column<'a>(row: &'a Value, name: &str) -> &'a Value {
        static NULL: Value = Value::Null;
        row.as_object().and_then(|m| m.get(name)).unwrap_or(&NULL)
    }

    /// Pick `base`, or `base_1`, `base_2`, ... if already taken in `row`.
    pub fn unique_name(row: &Map<String, Value>, base: &str) -> String {
        let mut name = base.to_string();
        let mut k = 1usize;
        while row.contains_key(&name) {
            name = format!("{}_{}", base, k);
            k += 1;
        }
        name
    }
}
