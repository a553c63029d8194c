// Collapsible JSON view for the structured data section
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub indent: usize,
    pub key: Option<String>,
    pub text: String,
    pub collapsed: bool,
}

impl TreeLine {
    pub fn plain(&self) -> String {
        let pad = "  ".repeat(self.indent);
        match &self.key {
            Some(key) => format!("{pad}{key}: {}", self.text),
            None => format!("{pad}{}", self.text),
        }
    }
}

fn scalar(value: &Value) -> String {
    // serde_json quotes strings and never fails on a Value
    serde_json::to_string(value).unwrap_or_default()
}

fn summary(value: &Value) -> String {
    match value {
        Value::Object(map) => format!("{{…}} {} key{}", map.len(), if map.len() == 1 { "" } else { "s" }),
        Value::Array(items) => format!("[…] {} item{}", items.len(), if items.len() == 1 { "" } else { "s" }),
        other => scalar(other),
    }
}

/// Flattens `value` into display lines. Containers deeper than `expand_depth`
/// collapse to a one-line summary; depth 0 collapses the root itself.
pub fn tree_lines(value: &Value, expand_depth: usize) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    walk(value, None, 0, expand_depth, &mut lines);
    lines
}

fn walk(value: &Value, key: Option<String>, depth: usize, expand_depth: usize, out: &mut Vec<TreeLine>) {
    let (open, close, children): (&str, &str, Vec<(String, &Value)>) = match value {
        Value::Object(map) if !map.is_empty() => {
            ("{", "}", map.iter().map(|(k, v)| (k.clone(), v)).collect())
        }
        Value::Array(items) if !items.is_empty() => {
            ("[", "]", items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect())
        }
        Value::Object(_) => {
            out.push(TreeLine { indent: depth, key, text: "{}".into(), collapsed: false });
            return;
        }
        Value::Array(_) => {
            out.push(TreeLine { indent: depth, key, text: "[]".into(), collapsed: false });
            return;
        }
        scalar_value => {
            out.push(TreeLine { indent: depth, key, text: scalar(scalar_value), collapsed: false });
            return;
        }
    };

    if depth >= expand_depth {
        out.push(TreeLine { indent: depth, key, text: summary(value), collapsed: true });
        return;
    }

    out.push(TreeLine { indent: depth, key, text: open.into(), collapsed: false });
    for (child_key, child) in children {
        walk(child, Some(child_key), depth + 1, expand_depth, out);
    }
    out.push(TreeLine { indent: depth, key: None, text: close.into(), collapsed: false });
}

/// Deepest container nesting, so the expand control knows when to stop.
pub fn max_depth(value: &Value) -> usize {
    match value {
        Value::Object(map) if !map.is_empty() => 1 + map.values().map(max_depth).max().unwrap_or(0),
        Value::Array(items) if !items.is_empty() => 1 + items.iter().map(max_depth).max().unwrap_or(0),
        _ => 0,
    }
}
