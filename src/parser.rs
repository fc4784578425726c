use crate::dom::{JsonNode, NodeKind, Position};
use crate::error::GridJsonError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::options::{CommentPolicy, FormatOptions};

const COMMENTS_NOT_ALLOWED: &str = "comments are not allowed with the current options";

/// Cursor over the token stream with a "current token" the parser can
/// consult after a value has been consumed (used to learn which source
/// line a value ended on).
struct Cursor<I>
where
    I: Iterator<Item = Result<Token, GridJsonError>>,
{
    iter: I,
    current: Option<Token>,
}

impl<I> Cursor<I>
where
    I: Iterator<Item = Result<Token, GridJsonError>>,
{
    fn new(iter: I) -> Self {
        Self { iter, current: None }
    }

    fn advance(&mut self) -> Result<bool, GridJsonError> {
        match self.iter.next() {
            None => {
                self.current = None;
                Ok(false)
            }
            Some(Ok(token)) => {
                self.current = Some(token);
                Ok(true)
            }
            Some(Err(err)) => Err(err),
        }
    }

    fn current(&self) -> Result<&Token, GridJsonError> {
        self.current
            .as_ref()
            .ok_or_else(|| GridJsonError::Malformed("token cursor used before advancing".into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    Empty,
    Element,
    Comma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PropPhase {
    BeforeName,
    AfterName,
    AfterColon,
    AfterValue,
    AfterComma,
}

/// Recursive-descent parser producing the document tree, with comments and
/// blank lines bound to the nodes they decorate as they stream past.
pub(crate) struct Parser<'a> {
    options: &'a FormatOptions,
}

impl<'a> Parser<'a> {
    pub fn new(options: &'a FormatOptions) -> Self {
        Self { options }
    }

    /// Parses the whole input. With `single_element`, a second top-level
    /// value is an error; standalone comments and blank lines around the
    /// value are still collected (subject to policy).
    pub fn parse_top_level(
        &self,
        input: &str,
        single_element: bool,
    ) -> Result<Vec<JsonNode>, GridJsonError> {
        let mut cursor = Cursor::new(Lexer::new(input));
        let mut nodes: Vec<JsonNode> = Vec::new();
        let mut element_seen = false;

        loop {
            if !cursor.advance()? {
                return Ok(nodes);
            }
            let node = self.parse_value(&mut cursor)?;
            match node.kind {
                NodeKind::BlankLine => {
                    if self.options.preserve_blank_lines {
                        nodes.push(node);
                    }
                }
                NodeKind::LineComment | NodeKind::BlockComment => {
                    match self.options.comment_policy {
                        CommentPolicy::TreatAsError => {
                            return Err(GridJsonError::syntax(COMMENTS_NOT_ALLOWED, node.pos));
                        }
                        CommentPolicy::Preserve => nodes.push(node),
                        CommentPolicy::Remove => {}
                    }
                }
                _ => {
                    if single_element && element_seen {
                        return Err(GridJsonError::syntax(
                            "unexpected second top-level element",
                            node.pos,
                        ));
                    }
                    nodes.push(node);
                    element_seen = true;
                }
            }
        }
    }

    fn parse_value<I>(&self, cursor: &mut Cursor<I>) -> Result<JsonNode, GridJsonError>
    where
        I: Iterator<Item = Result<Token, GridJsonError>>,
    {
        let token = cursor.current()?.clone();
        match token.kind {
            TokenKind::BeginArray => self.parse_array(cursor),
            TokenKind::BeginObject => self.parse_object(cursor),
            TokenKind::EndArray
            | TokenKind::EndObject
            | TokenKind::Comma
            | TokenKind::Colon => Err(GridJsonError::syntax("unexpected token", token.pos)),
            _ => Ok(leaf(&token)),
        }
    }

    fn parse_array<I>(&self, cursor: &mut Cursor<I>) -> Result<JsonNode, GridJsonError>
    where
        I: Iterator<Item = Result<Token, GridJsonError>>,
    {
        let start = cursor.current()?.pos;
        let mut children: Vec<JsonNode> = Vec::new();
        // A comment that may yet become the prefix of the next element.
        let mut pending: Option<JsonNode> = None;
        // Index of the element still close enough to claim a postfix comment.
        let mut postfix_target: Option<usize> = None;
        let mut postfix_line = usize::MAX;
        let mut state = ListState::Empty;

        loop {
            let token = next_or_eof(cursor, start)?;

            // A held comment stops being claimable once we leave its line.
            if let Some(comment) = pending.take() {
                let stale =
                    comment.pos.line != token.pos.line || token.kind == TokenKind::EndArray;
                if !stale {
                    pending = Some(comment);
                } else if let Some(idx) = postfix_target {
                    children[idx].postfix_is_line = comment.kind == NodeKind::LineComment;
                    children[idx].postfix_comment = comment.text;
                } else {
                    children.push(comment);
                }
            }

            if postfix_target.is_some() && postfix_line != token.pos.line {
                postfix_target = None;
            }

            match token.kind {
                TokenKind::EndArray => {
                    if state == ListState::Comma && !self.options.allow_trailing_commas {
                        return Err(GridJsonError::syntax(
                            "array may not end with a comma with the current options",
                            token.pos,
                        ));
                    }
                    break;
                }
                TokenKind::Comma => {
                    if state != ListState::Element {
                        return Err(GridJsonError::syntax("unexpected comma in array", token.pos));
                    }
                    state = ListState::Comma;
                }
                TokenKind::BlankLine => {
                    if self.options.preserve_blank_lines {
                        children.push(leaf(&token));
                    }
                }
                TokenKind::BlockComment => {
                    if !self.keep_comment(&token)? {
                        continue;
                    }
                    if let Some(held) = pending.take() {
                        children.push(held);
                    }
                    let comment = leaf(&token);
                    if comment.text.contains('\n') {
                        children.push(comment);
                        continue;
                    }
                    if let Some(idx) = postfix_target {
                        if state == ListState::Element {
                            children[idx].postfix_comment = comment.text;
                            children[idx].postfix_is_line = false;
                            postfix_target = None;
                            continue;
                        }
                    }
                    pending = Some(comment);
                }
                TokenKind::LineComment => {
                    if !self.keep_comment(&token)? {
                        continue;
                    }
                    if let Some(held) = pending.take() {
                        children.push(held);
                        children.push(leaf(&token));
                        continue;
                    }
                    if let Some(idx) = postfix_target {
                        children[idx].postfix_comment = token.text.clone();
                        children[idx].postfix_is_line = true;
                        postfix_target = None;
                        continue;
                    }
                    children.push(leaf(&token));
                }
                TokenKind::False
                | TokenKind::True
                | TokenKind::Null
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::BeginArray
                | TokenKind::BeginObject => {
                    if state == ListState::Element {
                        return Err(GridJsonError::syntax(
                            "comma missing between array elements",
                            token.pos,
                        ));
                    }
                    let mut element = self.parse_value(cursor)?;
                    state = ListState::Element;
                    if let Some(held) = pending.take() {
                        element.prefix_comment = held.text;
                    }
                    children.push(element);
                    postfix_target = Some(children.len() - 1);
                    postfix_line = cursor.current()?.pos.line;
                }
                TokenKind::Colon | TokenKind::EndObject => {
                    return Err(GridJsonError::syntax("unexpected token in array", token.pos));
                }
            }
        }

        Ok(JsonNode {
            kind: NodeKind::Array,
            pos: start,
            children,
            ..JsonNode::default()
        })
    }

    fn parse_object<I>(&self, cursor: &mut Cursor<I>) -> Result<JsonNode, GridJsonError>
    where
        I: Iterator<Item = Result<Token, GridJsonError>>,
    {
        let start = cursor.current()?.pos;
        let mut children: Vec<JsonNode> = Vec::new();

        let mut prop_name: Option<Token> = None;
        let mut prop_value: Option<JsonNode> = None;
        let mut value_end_line = usize::MAX;
        // Comments waiting in front of the next property.
        let mut leading: Vec<JsonNode> = Vec::new();
        // Comments between the current property's name and value.
        let mut middles: Vec<Token> = Vec::new();
        // A comment seen after the current property's value.
        let mut trailing: Option<JsonNode> = None;
        let mut trailing_after_comma = false;

        let mut phase = PropPhase::BeforeName;

        loop {
            let token = next_or_eof(cursor, start)?;

            let on_new_line = value_end_line != token.pos.line;
            let at_end = token.kind == TokenKind::EndObject;
            let next_name_starts =
                token.kind == TokenKind::String && phase == PropPhase::AfterComma;
            let extra_trailing = trailing.is_some()
                && matches!(token.kind, TokenKind::BlockComment | TokenKind::LineComment);

            if prop_name.is_some()
                && prop_value.is_some()
                && (on_new_line || at_end || next_name_starts || extra_trailing)
            {
                // A comment after the comma on the same line belongs to the
                // element that starts right here, not the one just finished.
                let carry = if next_name_starts && trailing_after_comma && !on_new_line {
                    trailing.take()
                } else {
                    None
                };

                if let (Some(name), Some(value)) = (prop_name.take(), prop_value.take()) {
                    attach_property(
                        &mut children,
                        name,
                        value,
                        value_end_line,
                        &mut leading,
                        &mut middles,
                        trailing.take(),
                    );
                }
                if let Some(comment) = carry {
                    leading.push(comment);
                }
            }

            match token.kind {
                TokenKind::BlankLine => {
                    if !self.options.preserve_blank_lines {
                        continue;
                    }
                    if matches!(phase, PropPhase::AfterName | PropPhase::AfterColon) {
                        continue;
                    }
                    children.append(&mut leading);
                    children.push(leaf(&token));
                }
                TokenKind::BlockComment | TokenKind::LineComment => {
                    if !self.keep_comment(&token)? {
                        continue;
                    }
                    if phase == PropPhase::BeforeName || prop_name.is_none() {
                        leading.push(leaf(&token));
                    } else if matches!(phase, PropPhase::AfterName | PropPhase::AfterColon) {
                        middles.push(token);
                    } else {
                        trailing = Some(leaf(&token));
                        trailing_after_comma = phase == PropPhase::AfterComma;
                    }
                }
                TokenKind::EndObject => {
                    if matches!(phase, PropPhase::AfterName | PropPhase::AfterColon) {
                        return Err(GridJsonError::syntax("unexpected end of object", token.pos));
                    }
                    if phase == PropPhase::AfterComma && !self.options.allow_trailing_commas {
                        return Err(GridJsonError::syntax(
                            "object may not end with a comma with the current options",
                            token.pos,
                        ));
                    }
                    break;
                }
                TokenKind::String => match phase {
                    PropPhase::BeforeName | PropPhase::AfterComma => {
                        prop_name = Some(token);
                        phase = PropPhase::AfterName;
                    }
                    PropPhase::AfterColon => {
                        prop_value = Some(self.parse_value(cursor)?);
                        value_end_line = cursor.current()?.pos.line;
                        phase = PropPhase::AfterValue;
                    }
                    _ => {
                        return Err(GridJsonError::syntax(
                            "unexpected string while processing object",
                            token.pos,
                        ));
                    }
                },
                TokenKind::False
                | TokenKind::True
                | TokenKind::Null
                | TokenKind::Number
                | TokenKind::BeginArray
                | TokenKind::BeginObject => {
                    if phase != PropPhase::AfterColon {
                        return Err(GridJsonError::syntax(
                            "unexpected value while processing object",
                            token.pos,
                        ));
                    }
                    prop_value = Some(self.parse_value(cursor)?);
                    value_end_line = cursor.current()?.pos.line;
                    phase = PropPhase::AfterValue;
                }
                TokenKind::Colon => {
                    if phase != PropPhase::AfterName {
                        return Err(GridJsonError::syntax("unexpected colon", token.pos));
                    }
                    phase = PropPhase::AfterColon;
                }
                TokenKind::Comma => {
                    if phase != PropPhase::AfterValue {
                        return Err(GridJsonError::syntax("unexpected comma", token.pos));
                    }
                    phase = PropPhase::AfterComma;
                }
                TokenKind::EndArray => {
                    return Err(GridJsonError::syntax("unexpected ']' in object", token.pos));
                }
            }
        }

        Ok(JsonNode {
            kind: NodeKind::Object,
            pos: start,
            children,
            ..JsonNode::default()
        })
    }

    /// Ok(true) to keep the comment, Ok(false) to drop it silently.
    fn keep_comment(&self, token: &Token) -> Result<bool, GridJsonError> {
        match self.options.comment_policy {
            CommentPolicy::Preserve => Ok(true),
            CommentPolicy::Remove => Ok(false),
            CommentPolicy::TreatAsError => {
                Err(GridJsonError::syntax(COMMENTS_NOT_ALLOWED, token.pos))
            }
        }
    }
}

fn next_or_eof<I>(cursor: &mut Cursor<I>, start: Position) -> Result<Token, GridJsonError>
where
    I: Iterator<Item = Result<Token, GridJsonError>>,
{
    if !cursor.advance()? {
        return Err(GridJsonError::syntax(
            "unexpected end of input inside container started",
            start,
        ));
    }
    Ok(cursor.current()?.clone())
}

fn leaf(token: &Token) -> JsonNode {
    let kind = match token.kind {
        TokenKind::False => NodeKind::False,
        TokenKind::True => NodeKind::True,
        TokenKind::Null => NodeKind::Null,
        TokenKind::Number => NodeKind::Number,
        TokenKind::String => NodeKind::String,
        TokenKind::BlankLine => NodeKind::BlankLine,
        TokenKind::BlockComment => NodeKind::BlockComment,
        TokenKind::LineComment => NodeKind::LineComment,
        // parse_value screens out structural tokens before calling here
        _ => NodeKind::Null,
    };
    JsonNode {
        kind,
        pos: token.pos,
        text: token.text.clone(),
        ..JsonNode::default()
    }
}

/// Finishes one object property: binds middle/prefix/postfix comments and
/// appends the resulting node (plus any unclaimed standalone comments) to
/// the container's child list.
fn attach_property(
    children: &mut Vec<JsonNode>,
    name: Token,
    mut element: JsonNode,
    value_end_line: usize,
    leading: &mut Vec<JsonNode>,
    middles: &mut Vec<Token>,
    trailing: Option<JsonNode>,
) {
    element.name = name.text;

    if !middles.is_empty() {
        let mut combined = String::new();
        for (i, comment) in middles.iter().enumerate() {
            if i > 0 {
                combined.push('\n');
            }
            combined.push_str(&comment.text);
        }
        let any_line_comment = middles.iter().any(|c| c.kind == TokenKind::LineComment);
        let last_end = middles
            .last()
            .map(|c| c.pos.line + c.text.matches('\n').count())
            .unwrap_or(0);
        element.middle_break =
            any_line_comment || combined.contains('\n') || element.pos.line > last_end;
        element.middle_comment = combined;
        middles.clear();
    }

    if let Some(last) = leading.pop() {
        children.append(leading);
        if last.kind == NodeKind::BlockComment && last.pos.line == element.pos.line {
            element.prefix_comment = last.text;
        } else {
            children.push(last);
        }
    }

    children.push(element);

    if let Some(after) = trailing {
        let attachable = !after.text.contains('\n') && after.pos.line == value_end_line;
        if attachable {
            if let Some(owner) = children.last_mut() {
                owner.postfix_is_line = after.kind == NodeKind::LineComment;
                owner.postfix_comment = after.text;
            }
        } else {
            children.push(after);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(input: &str, options: &FormatOptions) -> JsonNode {
        let mut nodes = Parser::new(options).parse_top_level(input, true).unwrap();
        assert_eq!(nodes.len(), 1);
        nodes.remove(0)
    }

    fn preserve_all() -> FormatOptions {
        FormatOptions {
            comment_policy: CommentPolicy::Preserve,
            preserve_blank_lines: true,
            ..FormatOptions::default()
        }
    }

    #[test]
    fn object_children_keep_key_order_and_source_text() {
        let node = parse_one(r#"{"b": 2.50, "a": "x"}"#, &FormatOptions::default());
        assert_eq!(node.kind, NodeKind::Object);
        assert_eq!(node.children[0].name, "\"b\"");
        assert_eq!(node.children[0].text, "2.50");
        assert_eq!(node.children[1].name, "\"a\"");
    }

    #[test]
    fn comments_are_rejected_by_default() {
        let err = Parser::new(&FormatOptions::default())
            .parse_top_level("[1, /*c*/ 2]", true)
            .unwrap_err();
        assert!(err.to_string().contains("not allowed"));
    }

    #[test]
    fn array_comment_attachment() {
        let node = parse_one("[ /*a*/ 1, 2 /*b*/, 3 ]", &preserve_all());
        assert_eq!(node.children.len(), 3);
        assert_eq!(node.children[0].prefix_comment, "/*a*/");
        assert_eq!(node.children[1].postfix_comment, "/*b*/");
        assert!(!node.children[1].postfix_is_line);
    }

    #[test]
    fn line_comment_after_value_becomes_postfix() {
        let node = parse_one("[1, 2 // tail\n]", &preserve_all());
        assert_eq!(node.children[1].postfix_comment, "// tail");
        assert!(node.children[1].postfix_is_line);
    }

    #[test]
    fn comment_after_comma_next_line_prefixes_next_element() {
        let node = parse_one("{\"a\": 1,\n/*next*/ \"b\": 2}", &preserve_all());
        assert_eq!(node.children[0].postfix_comment, "");
        assert_eq!(node.children[1].prefix_comment, "/*next*/");
    }

    #[test]
    fn middle_comment_without_break_stays_attachable() {
        let node = parse_one("{\"a\": /*m*/ 1}", &preserve_all());
        let prop = &node.children[0];
        assert_eq!(prop.middle_comment, "/*m*/");
        assert!(!prop.middle_break);
    }

    #[test]
    fn middle_line_comment_forces_break() {
        let node = parse_one("{\"a\": //m\n1}", &preserve_all());
        let prop = &node.children[0];
        assert_eq!(prop.middle_comment, "//m");
        assert!(prop.middle_break);
    }

    #[test]
    fn middle_block_comment_followed_by_newline_forces_break() {
        let node = parse_one("{\"a\": /*m*/\n1}", &preserve_all());
        assert!(node.children[0].middle_break);
    }

    #[test]
    fn blank_lines_become_pseudo_children_when_preserved() {
        let node = parse_one("[1,\n\n2]", &preserve_all());
        assert_eq!(node.children.len(), 3);
        assert_eq!(node.children[1].kind, NodeKind::BlankLine);

        let node = parse_one("[1,\n\n2]", &FormatOptions::default());
        assert_eq!(node.children.len(), 2);
    }

    #[test]
    fn trailing_commas_are_rejected_unless_allowed() {
        let opts = FormatOptions::default();
        assert!(Parser::new(&opts).parse_top_level("[1, 2,]", true).is_err());
        assert!(Parser::new(&opts).parse_top_level("{\"a\": 1,}", true).is_err());

        let relaxed = FormatOptions { allow_trailing_commas: true, ..FormatOptions::default() };
        assert!(Parser::new(&relaxed).parse_top_level("[1, 2,]", true).is_ok());
        assert!(Parser::new(&relaxed).parse_top_level("{\"a\": 1,}", true).is_ok());
    }

    #[test]
    fn second_top_level_element_is_an_error() {
        assert!(Parser::new(&FormatOptions::default())
            .parse_top_level("1 2", true)
            .is_err());
    }

    #[test]
    fn missing_comma_is_an_error() {
        assert!(Parser::new(&FormatOptions::default())
            .parse_top_level("[1 2]", true)
            .is_err());
    }
}
