//! Recursive-descent parser for the graph-constraint language.
//!
//! A query is a `&`-joined conjunction of clauses. Node declarations are
//! numbered 1-based in source order; constraint clauses reference those
//! numbers (`#1 . #2`, `#2:root`). Grammar violations abort the build with
//! one generic parse-failure diagnostic; semantic problems (undeclared
//! numbers, version-gated operators) are diagnosed individually and parsing
//! continues best-effort.

use wicker_ir::{Boundary, Distance, MatchOp, Term, TermExpr, TermKind};

use crate::diagnostics::{Diagnostic, Diagnostics, codes};
use crate::frontend::LanguageVersion;
use crate::graph::{ConstraintGraph, DominanceAnchor, Edge, EdgeKind, NodeDecl, OverlapKind};

use super::lexer::{Token, TokenKind, lex, token_text};

/// Grammar violation; converted into one code-302 diagnostic by [`parse`].
struct ParseAbort;

type PResult<T> = Result<T, ParseAbort>;

/// Parse query text into a constraint graph.
///
/// Returns `None` when the text cannot be parsed; the failure is a single
/// generic diagnostic, distinct from semantic errors raised afterwards.
pub fn parse(
    source: &str,
    version: LanguageVersion,
    diags: &mut Diagnostics,
) -> Option<ConstraintGraph> {
    if source.trim().is_empty() {
        diags.push(parse_failed());
        return None;
    }
    let tokens = lex(source);
    if tokens.iter().any(|t| t.kind == TokenKind::Unexpected) {
        diags.push(parse_failed());
        return None;
    }

    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        version,
        graph: ConstraintGraph::new(),
        next_number: 1,
        diags,
    };
    match parser.parse_query() {
        Ok(()) => Some(parser.graph),
        Err(ParseAbort) => {
            parser.diags.push(parse_failed());
            None
        }
    }
}

fn parse_failed() -> Diagnostic {
    Diagnostic::error(codes::PARSE_FAILED, "query cannot be parsed")
}

struct Parser<'s, 'd> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    version: LanguageVersion,
    graph: ConstraintGraph,
    next_number: u32,
    diags: &'d mut Diagnostics,
}

impl Parser<'_, '_> {
    fn parse_query(&mut self) -> PResult<()> {
        loop {
            self.parse_clause()?;
            if self.eat(TokenKind::Amp) {
                continue;
            }
            if self.pos == self.tokens.len() {
                return Ok(());
            }
            return Err(ParseAbort);
        }
    }

    fn parse_clause(&mut self) -> PResult<()> {
        if self.eat(TokenKind::Hash) {
            self.parse_constraint()
        } else {
            self.parse_declaration()
        }
    }

    // ------------------------------------------------------------------
    // Constraints
    // ------------------------------------------------------------------

    fn parse_constraint(&mut self) -> PResult<()> {
        let near = self.number()?;
        if self.eat(TokenKind::Colon) {
            return self.parse_unary(near);
        }
        let kind = self.parse_edge_kind()?;
        self.expect(TokenKind::Hash)?;
        let far = self.number()?;
        self.graph.relate(Edge::new(near, far, kind));
        Ok(())
    }

    fn parse_unary(&mut self, number: u32) -> PResult<()> {
        let name_tok = self.expect(TokenKind::Ident)?;
        let predicate: TermExpr = match token_text(self.source, &name_tok) {
            "root" => Term::new("root").into(),
            "arity" => {
                self.expect(TokenKind::Equals)?;
                let n = self.number()?;
                Term::new(n.to_string()).layer("arity").into()
            }
            _ => return Err(ParseAbort),
        };
        if !self.graph.add_predicate(number, predicate) {
            self.diags.push(Diagnostic::error(
                codes::UNDECLARED_NODE,
                format!("predicate references undeclared node #{number}"),
            ));
        }
        Ok(())
    }

    fn parse_edge_kind(&mut self) -> PResult<EdgeKind> {
        let kind = match self.peek().ok_or(ParseAbort)? {
            TokenKind::Dot => {
                self.bump();
                let distance = if self.at(TokenKind::LBrace) {
                    Some(Distance::words(self.quantifier_boundary()?))
                } else {
                    None
                };
                EdgeKind::Precedence { distance }
            }
            TokenKind::DotStar => {
                self.bump();
                EdgeKind::Precedence {
                    distance: Some(Distance::words(Boundary::unbounded())),
                }
            }
            TokenKind::Gt => {
                self.bump();
                let boundary = if self.at(TokenKind::LBrace) {
                    Some(self.quantifier_boundary()?)
                } else {
                    None
                };
                let rel_type = if self.at(TokenKind::Ident) {
                    let tok = self.bump().ok_or(ParseAbort)?;
                    Some(Term::new(token_text(self.source, &tok)))
                } else {
                    None
                };
                EdgeKind::Dominance {
                    anchor: None,
                    boundary,
                    rel_type,
                }
            }
            TokenKind::GtStar => {
                self.bump();
                EdgeKind::Dominance {
                    anchor: None,
                    boundary: Some(Boundary::at_least(1).map_err(|_| ParseAbort)?),
                    rel_type: None,
                }
            }
            TokenKind::GtAtLeft => {
                self.bump();
                EdgeKind::Dominance {
                    anchor: Some(DominanceAnchor::Leftmost),
                    boundary: None,
                    rel_type: None,
                }
            }
            TokenKind::GtAtRight => {
                self.bump();
                EdgeKind::Dominance {
                    anchor: Some(DominanceAnchor::Rightmost),
                    boundary: None,
                    rel_type: None,
                }
            }
            TokenKind::Arrow => {
                self.bump();
                let label = self.qualified_term()?;
                EdgeKind::TypedRelation { label }
            }
            TokenKind::Dollar => {
                self.bump();
                EdgeKind::CommonAncestor { boundary: None }
            }
            TokenKind::DollarStar => {
                self.bump();
                let boundary = if self.version.supports_extended_overlap() {
                    Some(Boundary::at_least(1).map_err(|_| ParseAbort)?)
                } else {
                    self.unsupported_scope("$*");
                    None
                };
                EdgeKind::CommonAncestor { boundary }
            }
            TokenKind::AlignIdentity => self.overlap(OverlapKind::Identity),
            TokenKind::AlignLeft => self.overlap(OverlapKind::LeftAligned),
            TokenKind::AlignRight => self.overlap(OverlapKind::RightAligned),
            TokenKind::AlignInclusion => self.overlap(OverlapKind::Inclusion),
            TokenKind::AlignOverlap => self.overlap(OverlapKind::Overlap),
            TokenKind::AlignOverlapLeft => {
                self.gated_overlap(OverlapKind::OverlapsLeft, "_ol_")
            }
            TokenKind::AlignOverlapRight => {
                self.gated_overlap(OverlapKind::OverlapsRight, "_or_")
            }
            _ => return Err(ParseAbort),
        };
        Ok(kind)
    }

    fn overlap(&mut self, kind: OverlapKind) -> EdgeKind {
        self.bump();
        EdgeKind::Overlap { kind }
    }

    /// Half-open overlap needs V2; under V1 the generic overlap stands in.
    fn gated_overlap(&mut self, kind: OverlapKind, spelling: &str) -> EdgeKind {
        self.bump();
        if self.version.supports_extended_overlap() {
            EdgeKind::Overlap { kind }
        } else {
            self.unsupported_scope(spelling);
            EdgeKind::Overlap {
                kind: OverlapKind::Overlap,
            }
        }
    }

    fn unsupported_scope(&mut self, spelling: &str) {
        self.diags.push(Diagnostic::error(
            codes::UNSUPPORTED_SCOPE,
            format!("operator `{spelling}` is not available in this language version"),
        ));
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    fn parse_declaration(&mut self) -> PResult<()> {
        let decl = match self.peek().ok_or(ParseAbort)? {
            TokenKind::NodeKw => {
                self.bump();
                NodeDecl::span(None)
            }
            TokenKind::TokKw => {
                self.bump();
                match self.match_op() {
                    Some(op) => {
                        self.bump();
                        let term = self.value_term(Term::new("").layer("orth"), op)?;
                        NodeDecl::token(Some(term.into()))
                    }
                    None => NodeDecl::token(None),
                }
            }
            TokenKind::Str => {
                let tok = self.bump().ok_or(ParseAbort)?;
                let key = unquote(token_text(self.source, &tok));
                NodeDecl::token(Some(
                    Term::new(key).layer("orth").match_op(MatchOp::Eq).into(),
                ))
            }
            TokenKind::Ident => {
                let term = self.attribute_term()?;
                NodeDecl::span(Some(term.into()))
            }
            _ => return Err(ParseAbort),
        };
        self.graph.declare(self.next_number, decl);
        self.next_number += 1;
        Ok(())
    }

    /// `attr="v"`, `attr!="v"`, `attr=/re/`, `foundry/attr="v"`.
    fn attribute_term(&mut self) -> PResult<Term> {
        let first = self.expect(TokenKind::Ident)?;
        let first_text = token_text(self.source, &first).to_string();
        let mut term = Term::new("");
        if self.eat(TokenKind::Slash) {
            let layer_tok = self.expect(TokenKind::Ident)?;
            let layer = token_text(self.source, &layer_tok);
            if self.version.supports_qualifiers() {
                term = term.foundry(first_text).layer(layer);
            } else {
                self.diags.push(Diagnostic::error(
                    codes::UNSUPPORTED_QUALIFIER,
                    format!("qualifier `{first_text}` is not available in this language version"),
                ));
                term = term.layer(layer);
            }
        } else {
            term = term.layer(first_text);
        }
        let op = self.match_op().ok_or(ParseAbort)?;
        self.bump();
        self.value_term(term, op)
    }

    /// Typed-relation label, optionally qualified: `label` | `foundry/label`.
    fn qualified_term(&mut self) -> PResult<Term> {
        let first = self.expect(TokenKind::Ident)?;
        let first_text = token_text(self.source, &first).to_string();
        if !self.eat(TokenKind::Slash) {
            return Ok(Term::new(first_text));
        }
        let label_tok = self.expect(TokenKind::Ident)?;
        let label = token_text(self.source, &label_tok);
        if self.version.supports_qualifiers() {
            Ok(Term::new(label).foundry(first_text))
        } else {
            self.diags.push(Diagnostic::error(
                codes::UNSUPPORTED_QUALIFIER,
                format!("qualifier `{first_text}` is not available in this language version"),
            ));
            Ok(Term::new(label))
        }
    }

    /// Finish a term with its value: quoted string or regex literal.
    fn value_term(&mut self, term: Term, op: MatchOp) -> PResult<Term> {
        let term = term.match_op(op);
        match self.peek().ok_or(ParseAbort)? {
            TokenKind::Str => {
                let tok = self.bump().ok_or(ParseAbort)?;
                let key = unquote(token_text(self.source, &tok));
                Ok(Term { key, ..term })
            }
            TokenKind::Regex => {
                let tok = self.bump().ok_or(ParseAbort)?;
                let text = token_text(self.source, &tok);
                let key = unescape(&text[1..text.len() - 1]);
                let mut term = Term { key, ..term }.kind(TermKind::Regex);
                term = self.regex_flags(term, tok.span.end);
                Ok(term)
            }
            _ => Err(ParseAbort),
        }
    }

    /// Flags glued to a regex literal: `i` is case-insensitivity, anything
    /// else is diagnosed and ignored.
    fn regex_flags(&mut self, mut term: Term, regex_end: usize) -> Term {
        if !self.at(TokenKind::Ident) {
            return term;
        }
        let adjacent = self.tokens[self.pos].span.start == regex_end;
        if !adjacent {
            return term;
        }
        let tok = self.bump().expect("peeked ident");
        for flag in token_text(self.source, &tok).chars() {
            if flag == 'i' {
                term = term.case_insensitive();
            } else {
                self.diags.push(Diagnostic::warning(
                    codes::UNSUPPORTED_REGEX_FLAG,
                    format!("regex flag `{flag}` is not supported"),
                ));
            }
        }
        term
    }

    // ------------------------------------------------------------------
    // Token plumbing
    // ------------------------------------------------------------------

    fn match_op(&self) -> Option<MatchOp> {
        match self.peek()? {
            TokenKind::Equals => Some(MatchOp::Eq),
            TokenKind::NotEquals => Some(MatchOp::Ne),
            _ => None,
        }
    }

    fn number(&mut self) -> PResult<u32> {
        let tok = self.expect(TokenKind::Number)?;
        token_text(self.source, &tok).parse().map_err(|_| ParseAbort)
    }

    /// `{m}`, `{m,}`, `{m,n}` sliced verbatim and parsed as a quantifier.
    fn quantifier_boundary(&mut self) -> PResult<Boundary> {
        let start = self.expect(TokenKind::LBrace)?.span.start;
        let end;
        loop {
            let tok = self.bump().ok_or(ParseAbort)?;
            match tok.kind {
                TokenKind::RBrace => {
                    end = tok.span.end;
                    break;
                }
                TokenKind::Number | TokenKind::Comma => continue,
                _ => return Err(ParseAbort),
            }
        }
        Boundary::from_quantifier(&self.source[start..end]).map_err(|_| ParseAbort)
    }

    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(tok)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.at(kind) {
            self.bump().ok_or(ParseAbort)
        } else {
            Err(ParseAbort)
        }
    }
}

/// Strip the delimiting quotes and resolve backslash escapes.
fn unquote(text: &str) -> String {
    unescape(&text[1..text.len() - 1])
}

fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(ch);
        }
    }
    out
}
