use crate::dom::Position;
use crate::error::GridJsonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    String,
    Number,
    Null,
    True,
    False,
    BlockComment,
    LineComment,
    BlankLine,
    Comma,
    Colon,
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Position,
}

/// Character-level scanner for JSON with comments and blank-line markers.
///
/// Whitespace is skipped, except that a line containing nothing else yields
/// a [`TokenKind::BlankLine`] token so the parser can preserve it. Comment
/// tokens carry their delimiters; line comments are trimmed of trailing
/// whitespace and never include their terminating newline.
pub(crate) struct Lexer {
    chars: Vec<char>,
    cursor: usize,
    pos: Position,
    start: Position,
    start_cursor: usize,
    line_has_content: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            cursor: 0,
            pos: Position::default(),
            start: Position::default(),
            start_cursor: 0,
            line_has_content: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    fn bump(&mut self) {
        let ch = self.chars[self.cursor];
        self.cursor += 1;
        self.pos.offset += 1;
        if ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 0;
            self.line_has_content = false;
        } else {
            self.pos.column += 1;
            if !matches!(ch, ' ' | '\t' | '\r') {
                self.line_has_content = true;
            }
        }
    }

    fn mark(&mut self) {
        self.start = self.pos;
        self.start_cursor = self.cursor;
    }

    /// Token whose text is the marked span of the input.
    fn span_token(&self, kind: TokenKind, trim_end: bool) -> Token {
        let mut text: String = self.chars[self.start_cursor..self.cursor].iter().collect();
        if trim_end {
            text.truncate(text.trim_end().len());
        }
        Token { kind, text, pos: self.start }
    }

    fn fixed_token(&self, kind: TokenKind, text: &str) -> Token {
        Token { kind, text: text.to_string(), pos: self.start }
    }

    fn error(&self, message: &str) -> GridJsonError {
        GridJsonError::syntax(message, self.pos)
    }

    fn symbol(&mut self, kind: TokenKind, text: &str) -> Token {
        self.mark();
        self.bump();
        self.fixed_token(kind, text)
    }

    fn keyword(&mut self, kind: TokenKind, word: &str) -> Result<Token, GridJsonError> {
        self.mark();
        for expected in word.chars() {
            match self.peek() {
                Some(ch) if ch == expected => self.bump(),
                Some(_) => return Err(self.error("invalid keyword")),
                None => return Err(self.error("unexpected end of input in keyword")),
            }
        }
        Ok(self.fixed_token(kind, word))
    }

    fn string(&mut self) -> Result<Token, GridJsonError> {
        self.mark();
        self.bump();

        let mut escaped = false;
        let mut pending_hex = 0usize;
        loop {
            let ch = self.peek().ok_or_else(|| self.error("unterminated string"))?;

            if pending_hex > 0 {
                if !ch.is_ascii_hexdigit() {
                    return Err(self.error("bad unicode escape in string"));
                }
                pending_hex -= 1;
                self.bump();
                continue;
            }

            if escaped {
                if !matches!(ch, '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' | 'u') {
                    return Err(self.error("bad escape character in string"));
                }
                if ch == 'u' {
                    pending_hex = 4;
                }
                escaped = false;
                self.bump();
                continue;
            }

            if is_control(ch) {
                return Err(self.error("control character in string"));
            }

            self.bump();
            match ch {
                '"' => return Ok(self.span_token(TokenKind::String, false)),
                '\\' => escaped = true,
                _ => {}
            }
        }
    }

    fn comment(&mut self) -> Result<Token, GridJsonError> {
        self.mark();
        self.bump();
        let block = match self.peek() {
            Some('*') => true,
            Some('/') => false,
            _ => return Err(self.error("bad character after '/'")),
        };
        self.bump();

        if block {
            let mut starred = false;
            loop {
                let ch = self
                    .peek()
                    .ok_or_else(|| self.error("unterminated block comment"))?;
                self.bump();
                if starred && ch == '/' {
                    return Ok(self.span_token(TokenKind::BlockComment, false));
                }
                starred = ch == '*';
            }
        }

        while let Some(ch) = self.peek() {
            if ch == '\n' {
                self.bump();
                break;
            }
            self.bump();
        }
        Ok(self.span_token(TokenKind::LineComment, true))
    }

    fn number(&mut self) -> Result<Token, GridJsonError> {
        self.mark();
        let mut phase = NumPhase::Start;
        loop {
            let ch = match self.peek() {
                Some(ch) => ch,
                None if phase.is_terminal() => {
                    return Ok(self.span_token(TokenKind::Number, false));
                }
                None => return Err(self.error("unexpected end of input in number")),
            };

            match phase.step(ch) {
                NumStep::To(next) => {
                    phase = next;
                    self.bump();
                }
                NumStep::End => return Ok(self.span_token(TokenKind::Number, false)),
                NumStep::Bad => return Err(self.error("bad character in number")),
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, GridJsonError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ch = self.peek()?;
            match ch {
                ' ' | '\t' | '\r' => self.bump(),
                '\n' => {
                    if !self.line_has_content {
                        self.mark();
                        self.bump();
                        return Some(Ok(self.fixed_token(TokenKind::BlankLine, "\n")));
                    }
                    self.bump();
                }
                '{' => return Some(Ok(self.symbol(TokenKind::BeginObject, "{"))),
                '}' => return Some(Ok(self.symbol(TokenKind::EndObject, "}"))),
                '[' => return Some(Ok(self.symbol(TokenKind::BeginArray, "["))),
                ']' => return Some(Ok(self.symbol(TokenKind::EndArray, "]"))),
                ':' => return Some(Ok(self.symbol(TokenKind::Colon, ":"))),
                ',' => return Some(Ok(self.symbol(TokenKind::Comma, ","))),
                't' => return Some(self.keyword(TokenKind::True, "true")),
                'f' => return Some(self.keyword(TokenKind::False, "false")),
                'n' => return Some(self.keyword(TokenKind::Null, "null")),
                '"' => return Some(self.string()),
                '/' => return Some(self.comment()),
                '-' | '0'..='9' => return Some(self.number()),
                _ => return Some(Err(self.error("unexpected character"))),
            }
        }
    }
}

fn is_control(ch: char) -> bool {
    let code = ch as u32;
    code <= 0x1F || code == 0x7F || (0x80..=0x9F).contains(&code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumPhase {
    Start,
    Signed,
    ZeroInt,
    Int,
    Dot,
    Frac,
    ExpMark,
    ExpSigned,
    Exp,
}

enum NumStep {
    To(NumPhase),
    End,
    Bad,
}

impl NumPhase {
    /// Phases at which end-of-input still yields a complete number.
    fn is_terminal(self) -> bool {
        matches!(self, NumPhase::ZeroInt | NumPhase::Int | NumPhase::Frac | NumPhase::Exp)
    }

    fn step(self, ch: char) -> NumStep {
        use NumPhase::*;
        let next = match self {
            Start => match ch {
                '-' => Some(Signed),
                '0' => Some(ZeroInt),
                '1'..='9' => Some(Int),
                _ => None,
            },
            Signed => match ch {
                '0' => Some(ZeroInt),
                '1'..='9' => Some(Int),
                _ => None,
            },
            ZeroInt => match ch {
                '.' => Some(Dot),
                'e' | 'E' => Some(ExpMark),
                _ => return NumStep::End,
            },
            Int => match ch {
                '0'..='9' => Some(Int),
                '.' => Some(Dot),
                'e' | 'E' => Some(ExpMark),
                _ => return NumStep::End,
            },
            Dot => match ch {
                '0'..='9' => Some(Frac),
                _ => None,
            },
            Frac => match ch {
                '0'..='9' => Some(Frac),
                'e' | 'E' => Some(ExpMark),
                _ => return NumStep::End,
            },
            ExpMark => match ch {
                '+' | '-' => Some(ExpSigned),
                '0'..='9' => Some(Exp),
                _ => None,
            },
            ExpSigned => match ch {
                '0'..='9' => Some(Exp),
                _ => None,
            },
            Exp => match ch {
                '0'..='9' => Some(Exp),
                _ => return NumStep::End,
            },
        };
        match next {
            Some(phase) => NumStep::To(phase),
            None => NumStep::Bad,
        }
    }
}
