//! Tokenizer for token field values using logos
//!
//! Only braces are significant. Everything between them is an opaque run of
//! text, so tokenizing never fails on user input.

use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'src> {
    #[token("{")]
    Open,

    #[token("}")]
    Close,

    #[regex(r"[^{}]+", |lex| lex.slice())]
    Text(&'src str),
}

impl<'src> Token<'src> {
    /// Source text this token stands for
    pub fn as_str(&self) -> &'src str {
        match self {
            Token::Open => "{",
            Token::Close => "}",
            Token::Text(text) => text,
        }
    }
}

/// Tokenize a flat value into tokens with their byte ranges
pub fn tokenize(source: &str) -> Vec<(Token<'_>, Range<usize>)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let token = result.unwrap_or(Token::Text(lexer.slice()));
        tokens.push((token, span));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_variable() {
        let tokens: Vec<_> = tokenize("Hi {name}!").into_iter().map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Text("Hi "),
                Token::Open,
                Token::Text("name"),
                Token::Close,
                Token::Text("!"),
            ]
        );
    }

    #[test]
    fn test_tokenize_spans_cover_source() {
        let source = "a{b}}{\nc";
        let tokens = tokenize(source);
        let rebuilt: String = tokens.iter().map(|(_, span)| &source[span.clone()]).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
    }
}
