//! Lexer for the graph-constraint language.
//!
//! Produces span-based tokens; text is sliced from the source only when
//! needed. Consecutive unrecognized characters are coalesced into single
//! `Unexpected` tokens so malformed input stays manageable.
//!
//! Regex literals may not contain unescaped whitespace or quotes; this keeps
//! `/` unambiguous between division-style qualifiers (`tiger/cat`) and
//! regex delimiters.

use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    #[token("&")]
    Amp,
    #[token("#")]
    Hash,
    #[token(":")]
    Colon,
    #[token("/")]
    Slash,
    #[token("!=")]
    NotEquals,
    #[token("=")]
    Equals,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,

    #[token(".*")]
    DotStar,
    #[token(".")]
    Dot,
    #[token(">@l")]
    GtAtLeft,
    #[token(">@r")]
    GtAtRight,
    #[token(">*")]
    GtStar,
    #[token(">")]
    Gt,
    #[token("->")]
    Arrow,
    #[token("$*")]
    DollarStar,
    #[token("$")]
    Dollar,

    #[token("_=_")]
    AlignIdentity,
    #[token("_l_")]
    AlignLeft,
    #[token("_r_")]
    AlignRight,
    #[token("_i_")]
    AlignInclusion,
    #[token("_o_")]
    AlignOverlap,
    #[token("_ol_")]
    AlignOverlapLeft,
    #[token("_or_")]
    AlignOverlapRight,

    #[token("node")]
    NodeKw,
    #[token("tok")]
    TokKw,

    #[regex(r"[A-Za-z][A-Za-z0-9_\-]*")]
    Ident,
    #[regex(r"[0-9]+")]
    Number,
    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,
    #[regex(r#"/([^/\\\s"]|\\.)+/"#)]
    Regex,

    /// Synthesized for coalesced lexer errors; never produced by a pattern.
    Unexpected,
}

/// Kind + span; text is retrieved via [`token_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Tokenize the source, coalescing consecutive lexer errors into single
/// `Unexpected` tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Unexpected,
                        span: start..lexer.span().start,
                    });
                }
                tokens.push(Token {
                    kind,
                    span: lexer.span(),
                });
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Unexpected,
                        span: start..source.len(),
                    });
                }
                break;
            }
        }
    }

    tokens
}

/// O(1) slice into the source for a token.
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[token.span.clone()]
}
