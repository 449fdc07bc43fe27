//! Token interface of the external lexer.
//!
//! Tokenization is not part of the engine. These types describe what the
//! lexer hands to the parser so both sides agree on the stream shape.

use super::{Literal, Name, Span};
use std::fmt;

/// A token with its literal text and source position.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text of the token.
    pub lexeme: Name,
    /// Decoded value for literal tokens.
    pub literal: Option<Literal>,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, lexeme: impl Into<Name>, span: Span) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            span,
        }
    }

    #[must_use]
    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}) @ {}", self.kind, self.lexeme, self.span)
    }
}

/// Token kinds of the Lume language.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    // Literals and names
    Number,
    String,
    /// Text segment of an interpolated string.
    StringPart,
    Ident,

    // Keywords
    Let,
    Var,
    Fn,
    Class,
    Extends,
    This,
    Super,
    If,
    Else,
    While,
    For,
    In,
    Return,
    Break,
    Continue,
    Try,
    Catch,
    Finally,
    Throw,
    Match,
    Async,
    Await,
    True,
    False,
    Null,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,
    Dot,
    DotDot,
    DotDotEq,
    Ellipsis,
    Arrow,
    FatArrow,
    InterpolationStart,
    InterpolationEnd,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Eq,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AndAnd,
    OrOr,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    PlusPlus,
    MinusMinus,
    Underscore,

    Eof,
}

impl TokenKind {
    /// Whether this token starts a keyword.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Var
                | TokenKind::Fn
                | TokenKind::Class
                | TokenKind::Extends
                | TokenKind::This
                | TokenKind::Super
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::For
                | TokenKind::In
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Try
                | TokenKind::Catch
                | TokenKind::Finally
                | TokenKind::Throw
                | TokenKind::Match
                | TokenKind::Async
                | TokenKind::Await
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    /// Map a keyword's source text to its kind.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "let" => TokenKind::Let,
            "var" => TokenKind::Var,
            "fn" => TokenKind::Fn,
            "class" => TokenKind::Class,
            "extends" => TokenKind::Extends,
            "this" => TokenKind::This,
            "super" => TokenKind::Super,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "in" => TokenKind::In,
            "return" => TokenKind::Return,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "try" => TokenKind::Try,
            "catch" => TokenKind::Catch,
            "finally" => TokenKind::Finally,
            "throw" => TokenKind::Throw,
            "match" => TokenKind::Match,
            "async" => TokenKind::Async,
            "await" => TokenKind::Await,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => return None,
        };
        Some(kind)
    }
}
