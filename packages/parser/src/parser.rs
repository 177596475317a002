use crate::ast::Segment;
use crate::id_generator::IdGenerator;
use crate::tokenizer::{tokenize, Token};
use std::ops::Range;

/// Parser turning a flat value into canonical segments
///
/// A variable is an `{`, a single run of text, and a `}`. Anything else
/// (unbalanced braces, `{}`, nested braces) stays literal text. The output
/// always starts and ends with a text segment and alternates kinds.
pub struct Parser<'src, 'ids> {
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
    ids: &'ids mut IdGenerator,
}

impl<'src, 'ids> Parser<'src, 'ids> {
    pub fn new(source: &'src str, ids: &'ids mut IdGenerator) -> Self {
        Self {
            tokens: tokenize(source),
            pos: 0,
            ids,
        }
    }

    /// Parse all tokens into segments
    pub fn parse_segments(&mut self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut text = String::new();

        while let Some(token) = self.peek() {
            match token {
                Token::Open => match self.variable_body() {
                    Some(body) => {
                        self.pos += 3;
                        let id = self.ids.new_id();
                        segments.push(Segment::text(id, std::mem::take(&mut text)));
                        let id = self.ids.new_id();
                        segments.push(Segment::variable(id, body, body));
                    }
                    None => {
                        text.push('{');
                        self.pos += 1;
                    }
                },
                other => {
                    text.push_str(other.as_str());
                    self.pos += 1;
                }
            }
        }

        let id = self.ids.new_id();
        segments.push(Segment::text(id, text));

        tracing::trace!(segments = segments.len(), "parsed token field value");
        segments
    }

    /// Body of `{body}` starting at the current `{`, if it forms a variable
    fn variable_body(&self) -> Option<&'src str> {
        match (self.nth(1), self.nth(2)) {
            (Some(Token::Text(body)), Some(Token::Close)) => Some(body),
            _ => None,
        }
    }

    fn peek(&self) -> Option<Token<'src>> {
        self.nth(0)
    }

    fn nth(&self, n: usize) -> Option<Token<'src>> {
        self.tokens.get(self.pos + n).map(|(token, _)| *token)
    }
}

/// Parse a flat value with a fresh id generator
pub fn parse(source: &str) -> Vec<Segment> {
    let mut ids = IdGenerator::default();
    parse_with_ids(source, &mut ids)
}

/// Parse a flat value, drawing segment ids from `ids`
pub fn parse_with_ids(source: &str, ids: &mut IdGenerator) -> Vec<Segment> {
    Parser::new(source, ids).parse_segments()
}
