//! Tree outline rendering for logs and demo output.

use crate::Node;

pub fn outline(root: &Node, cap: usize) -> Vec<String> {
    fn walk(node: &Node, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let indent = "  ".repeat(depth);
        match node {
            Node::Element {
                name,
                attributes,
                children,
                ..
            } => {
                let mut line = format!("{indent}<{name}");
                for (k, v) in attributes {
                    match v {
                        Some(v) => line.push_str(&format!(r#" {k}="{v}""#)),
                        None => line.push_str(&format!(" {k}")),
                    }
                }
                line.push('>');
                out.push(line);
                for c in children {
                    walk(c, depth + 1, out, left);
                }
            }
            Node::Text { text, .. } => {
                let t = text.replace('\n', " ");
                let t = t.trim();
                if !t.is_empty() {
                    let show = if t.chars().count() > 40 {
                        let head: String = t.chars().take(40).collect();
                        format!("{head}…")
                    } else {
                        t.to_string()
                    };
                    out.push(format!("{indent}\"{show}\""));
                }
            }
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(root, 0, &mut out, &mut left);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Id;
    use std::sync::Arc;

    #[test]
    fn outline_shows_attributes_and_respects_the_cap() {
        let root = Node::Element {
            id: Id(0),
            name: Arc::<str>::from("div"),
            attributes: vec![("data-proof-checked".to_string(), Some("1".to_string()))],
            children: vec![
                Node::Text {
                    id: Id(0),
                    text: "mot".to_string(),
                },
                Node::Text {
                    id: Id(0),
                    text: "autre".to_string(),
                },
            ],
        };

        let lines = outline(&root, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"<div data-proof-checked="1">"#);
        assert_eq!(lines[1], "  \"mot\"");
    }
}
