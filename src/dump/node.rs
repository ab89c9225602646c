//! Captured value tree, independent of the output format.

/// One captured value. Produced by [`Dumper`](super::Dumper), consumed by
/// [`render`](super::render).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    Str {
        value: String,
        /// Character count of the original string.
        length: usize,
    },
    Seq {
        label: String,
        len: usize,
        items: Vec<Node>,
        collapsed: bool,
    },
    Map {
        label: String,
        len: usize,
        entries: Vec<(Node, Node)>,
        collapsed: bool,
    },
    Object {
        class: String,
        fields: Vec<(String, Node)>,
        omitted: usize,
        collapsed: bool,
    },
    /// A shared allocation reached again while it was still being dumped.
    Recursion,
    /// A value that could not be inspected right now (locked, borrowed).
    Unavailable(String),
}

impl Node {
    /// True when a string value was cut by the length limit.
    pub fn is_truncated(&self) -> bool {
        match self {
            Node::Str { value, length } => value.chars().count() < *length,
            _ => false,
        }
    }

    /// Entries that were captured but not shown because of the item limit.
    pub fn omitted(&self) -> usize {
        match self {
            Node::Seq { len, items, collapsed: false, .. } => len - items.len(),
            Node::Map { len, entries, collapsed: false, .. } => len - entries.len(),
            Node::Object { omitted, .. } => *omitted,
            _ => 0,
        }
    }
}
