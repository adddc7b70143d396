use loomview_core::Result;
use serde::Serialize;
use serde_json::Value;

use crate::figure::Figure;

/// Key under which every trace carries its internal identifier.
const TRACE_UID: &str = "uid";

/// Convert a figure into a JSON tree without trace identifiers.
///
/// Non-finite numbers become `null`.
pub fn to_json(figure: &Figure) -> Result<Value> {
    let mut value = serde_json::to_value(figure)?;
    if let Some(traces) = value.get_mut("data").and_then(Value::as_array_mut) {
        for trace in traces {
            if let Some(obj) = trace.as_object_mut() {
                obj.remove(TRACE_UID);
            }
        }
    }
    Ok(value)
}

/// Compact JSON text of a figure, without trace identifiers.
pub fn to_json_string(figure: &Figure) -> Result<String> {
    Ok(serde_json::to_string(&to_json(figure)?)?)
}

/// Compact JSON text of any serializable value.
pub fn dict_to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Bar, Pie, Scattergl};
    use loomview_core::Label;

    fn has_uid(value: &Value) -> bool {
        match value {
            Value::Object(map) => map.contains_key(TRACE_UID) || map.values().any(has_uid),
            Value::Array(items) => items.iter().any(has_uid),
            _ => false,
        }
    }

    #[test]
    fn test_strips_uids() {
        let fig = Figure::new()
            .with_trace(Bar::new(vec![Label::from("A")], vec![2]))
            .with_trace(Bar::new(vec![Label::from("B")], vec![3]));
        assert!(has_uid(&serde_json::to_value(&fig).unwrap()));

        let text = to_json_string(&fig).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert!(!has_uid(&parsed));
        assert_eq!(parsed["data"][1]["x"][0], "B");
        assert_eq!(parsed["data"][1]["type"], "bar");
    }

    #[test]
    fn test_compact_and_deterministic() {
        let fig = Figure::new().with_trace(Pie::new(
            vec![Label::from("A"), Label::Number(2.0)],
            vec![60, 40],
            0.7,
        ));
        let a = to_json_string(&fig).unwrap();
        let b = to_json_string(&fig).unwrap();
        assert_eq!(a, b);
        assert!(!a.contains('\n'));
        assert!(!a.contains(": "));
        let parsed: Value = serde_json::from_str(&a).unwrap();
        assert_eq!(parsed["data"][0]["labels"][1], 2.0);
        assert_eq!(parsed["data"][0]["values"][0], 60);
    }

    #[test]
    fn test_non_finite_is_null() {
        let fig = Figure::new().with_trace(Scattergl::markers(vec![f64::NAN], vec![1.0]));
        let value = to_json(&fig).unwrap();
        assert_eq!(value["data"][0]["x"][0], Value::Null);
    }

    #[test]
    fn test_dict_to_json() {
        let text = dict_to_json(&serde_json::json!({"style": "pie"})).unwrap();
        assert_eq!(text, r#"{"style":"pie"}"#);
    }
}
