use serde_json::Value;

/// Compact JSON text of a collected list, e.g. `["twelve","eleven"]`.
pub fn to_json_text(items: &[Value]) -> String {
    let parts: Vec<String> = items.iter().map(Value::to_string).collect();
    format!("[{}]", parts.join(","))
}

/// Join a collected list with `sep`, like `concat_ws(sep, collect(x))`.
///
/// Strings are written raw; any other element as compact JSON.
pub fn join_with(items: &[Value], sep: &str) -> String {
    items.iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_text_keeps_order_and_quotes_strings() {
        let items = vec![json!("twelve"), json!("eleven")];
        assert_eq!(to_json_text(&items), r#"["twelve","eleven"]"#);
        assert_eq!(to_json_text(&[]), "[]");
    }

    #[test]
    fn json_text_renders_compound_values() {
        let items = vec![json!(1), json!([2, 3]), json!({ "a": true })];
        assert_eq!(to_json_text(&items), r#"[1,[2,3],{"a":true}]"#);
    }

    #[test]
    fn join_writes_strings_raw() {
        assert_eq!(join_with(&[json!("11"), json!("10")], ","), "11,10");
        assert_eq!(join_with(&[json!("12"), json!("1")], ","), "12,1");
        assert_eq!(join_with(&[json!(1), json!(2.5), json!(true)], "|"), "1|2.5|true");
        assert_eq!(join_with(&[], ","), "");
    }
}
