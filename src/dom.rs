use std::fmt;

/// A location in the input text. Lines and columns are zero-indexed;
/// `offset` counts characters, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The kind of a document-tree node.
///
/// The seven JSON value kinds, plus pseudo-kinds for comments and preserved
/// blank lines. Comments and blanks appear as children of the surrounding
/// container when they couldn't be attached to a neighboring value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    True,
    False,
    String,
    Number,
    Object,
    Array,
    /// A preserved blank line. Forces its container into expanded layout.
    BlankLine,
    /// A standalone `// ...` comment.
    LineComment,
    /// A standalone `/* ... */` comment.
    BlockComment,
}

/// One node of the parsed document tree.
///
/// Scalar nodes keep their exact source text in `text` so the original
/// number formatting and string escapes survive reformatting. Container
/// nodes keep their children in source order; object children carry their
/// quoted key in `name`.
///
/// The width fields at the bottom are filled in by a single measuring pass
/// before layout begins and are read-only afterwards.
#[derive(Debug, Clone)]
pub struct JsonNode {
    pub kind: NodeKind,
    pub pos: Position,
    /// 0 for scalars and empty containers, else 1 + max child complexity.
    pub complexity: usize,
    /// Quoted property key, or empty for array elements and the root.
    pub name: String,
    /// Exact source text for scalars and comments; empty for containers.
    pub text: String,
    pub children: Vec<JsonNode>,

    /// Comment bound immediately before this value (same line).
    pub prefix_comment: String,
    /// Comment(s) between a property key and its value.
    pub middle_comment: String,
    /// True when the middle comment demands a line break between the key
    /// and the value (line comment, or a break existed in the source).
    pub middle_break: bool,
    /// Comment bound after this value, before or just after its comma.
    pub postfix_comment: String,
    /// True when the postfix comment is a line comment and must end its line.
    pub postfix_is_line: bool,

    pub name_width: usize,
    pub text_width: usize,
    pub prefix_width: usize,
    pub middle_width: usize,
    pub postfix_width: usize,
    /// Width of this node rendered inline with everything attached,
    /// excluding indentation and any trailing comma.
    pub min_width: usize,
    /// True when something in the subtree (blank line, line comment,
    /// multi-line comment, forced middle break) rules out single-line
    /// rendering.
    pub needs_own_lines: bool,
}

impl Default for JsonNode {
    fn default() -> Self {
        Self {
            kind: NodeKind::Null,
            pos: Position::default(),
            complexity: 0,
            name: String::new(),
            text: String::new(),
            children: Vec::new(),
            prefix_comment: String::new(),
            middle_comment: String::new(),
            middle_break: false,
            postfix_comment: String::new(),
            postfix_is_line: false,
            name_width: 0,
            text_width: 0,
            prefix_width: 0,
            middle_width: 0,
            postfix_width: 0,
            min_width: 0,
            needs_own_lines: false,
        }
    }
}

impl JsonNode {
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Object | NodeKind::Array)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, NodeKind::LineComment | NodeKind::BlockComment)
    }

    /// True for pseudo-children that never take a trailing comma.
    pub fn is_decoration(&self) -> bool {
        self.is_comment() || self.kind == NodeKind::BlankLine
    }

    /// Recomputes `complexity` for this node and everything below it in a
    /// single post-order walk.
    pub fn annotate_complexity(&mut self) {
        for child in &mut self.children {
            child.annotate_complexity();
        }
        self.complexity = match self.kind {
            NodeKind::Object | NodeKind::Array => self
                .children
                .iter()
                .map(|ch| ch.complexity + 1)
                .max()
                .unwrap_or(0),
            _ => 0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(kind: NodeKind, text: &str) -> JsonNode {
        JsonNode { kind, text: text.to_string(), ..JsonNode::default() }
    }

    #[test]
    fn complexity_of_leaves_and_empty_containers_is_zero() {
        let mut number = scalar(NodeKind::Number, "3.5");
        number.annotate_complexity();
        assert_eq!(number.complexity, 0);

        let mut empty = JsonNode { kind: NodeKind::Array, ..JsonNode::default() };
        empty.annotate_complexity();
        assert_eq!(empty.complexity, 0);
    }

    #[test]
    fn complexity_is_one_plus_deepest_child() {
        let inner = JsonNode {
            kind: NodeKind::Array,
            children: vec![scalar(NodeKind::Number, "1")],
            ..JsonNode::default()
        };
        let mut outer = JsonNode {
            kind: NodeKind::Object,
            children: vec![inner, scalar(NodeKind::True, "true")],
            ..JsonNode::default()
        };
        outer.annotate_complexity();
        assert_eq!(outer.complexity, 2);
        assert_eq!(outer.children[0].complexity, 1);
    }
}
