use crate::dom::{JsonNode, NodeKind};
use crate::error::GridJsonError;

/// Builds a document tree from an already-parsed [`serde_json::Value`].
///
/// Trees built this way carry no source positions, comments, or blank
/// lines, so none of the forced-break rules apply; the layout engine
/// treats them like any other tree. `recursion_limit` guards against
/// cyclic structures reaching us through a `Serialize` impl.
pub(crate) fn value_to_node(
    element: &serde_json::Value,
    prop_name: Option<&str>,
    recursion_limit: usize,
) -> Result<JsonNode, GridJsonError> {
    if recursion_limit == 0 {
        return Err(GridJsonError::DepthLimit);
    }

    let mut node = JsonNode::default();
    if let Some(name) = prop_name {
        node.name = serde_json::to_string(name).unwrap_or_else(|_| format!("\"{name}\""));
    }

    match element {
        serde_json::Value::Null => {
            node.kind = NodeKind::Null;
            node.text = "null".to_string();
        }
        serde_json::Value::Bool(val) => {
            node.kind = if *val { NodeKind::True } else { NodeKind::False };
            node.text = val.to_string();
        }
        serde_json::Value::Number(num) => {
            node.kind = NodeKind::Number;
            node.text = num.to_string();
        }
        serde_json::Value::String(val) => {
            node.kind = NodeKind::String;
            node.text = serde_json::to_string(val).unwrap_or_else(|_| format!("\"{val}\""));
        }
        serde_json::Value::Array(items) => {
            node.kind = NodeKind::Array;
            node.children = items
                .iter()
                .map(|child| value_to_node(child, None, recursion_limit - 1))
                .collect::<Result<_, _>>()?;
        }
        serde_json::Value::Object(map) => {
            node.kind = NodeKind::Object;
            for (key, value) in map {
                node.children
                    .push(value_to_node(value, Some(key), recursion_limit - 1)?);
            }
        }
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_scalars_with_exact_literals() {
        let node = value_to_node(&json!(2.5), None, 10).unwrap();
        assert_eq!(node.kind, NodeKind::Number);
        assert_eq!(node.text, "2.5");

        let node = value_to_node(&json!("say \"hi\""), None, 10).unwrap();
        assert_eq!(node.text, r#""say \"hi\"""#);
    }

    #[test]
    fn object_children_carry_quoted_names() {
        let node = value_to_node(&json!({"a": [1, null]}), None, 10).unwrap();
        assert_eq!(node.kind, NodeKind::Object);
        assert_eq!(node.children[0].name, "\"a\"");
        assert_eq!(node.children[0].children[1].kind, NodeKind::Null);
    }

    #[test]
    fn recursion_limit_trips_on_deep_nesting() {
        let deep = json!([[[[1]]]]);
        assert!(value_to_node(&deep, None, 3).is_err());
        assert!(value_to_node(&deep, None, 10).is_ok());
    }
}
