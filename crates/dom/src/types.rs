use std::sync::Arc;

pub type NodeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Id(pub NodeId);

#[derive(Debug)]
pub enum Node {
    Element {
        id: Id,
        name: Arc<str>,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
}

impl Node {
    pub fn id(&self) -> Id {
        match self {
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
        }
    }

    pub fn set_id(&mut self, new_id: Id) {
        match self {
            Node::Element { id, .. } => *id = new_id,
            Node::Text { id, .. } => *id = new_id,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Element { children, .. } => Some(children),
            Node::Text { .. } => None,
        }
    }

    /// Text content of a text node; `None` for elements.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Text { text, .. } => Some(text),
            Node::Element { .. } => None,
        }
    }

    /// First value of the named attribute (ASCII-case-insensitive name match).
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .and_then(|(_, v)| v.as_deref()),
            Node::Text { .. } => None,
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        match self {
            Node::Element { attributes, .. } => {
                attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
            }
            Node::Text { .. } => false,
        }
    }

    /// Whether the named attribute's value contains `token` as a
    /// whitespace-delimited word.
    pub fn attr_has_token(&self, name: &str, token: &str) -> bool {
        self.attr(name).is_some_and(|v| {
            v.split_whitespace()
                .any(|t| t.eq_ignore_ascii_case(token))
        })
    }

    /// Set or replace an attribute. First match on the name wins.
    pub fn set_attr(&mut self, name: &str, value: Option<String>) {
        if let Node::Element { attributes, .. } = self {
            if let Some(slot) = attributes.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                slot.1 = value;
            } else {
                attributes.push((name.to_string(), value));
            }
        }
    }
}
