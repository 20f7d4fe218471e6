//! The closed operand sum and the wrapper leaves.

use serde_json::Value;

use crate::doc::{Doc, tagged};
use crate::error::IrError;
use crate::group::Group;
use crate::term::{Term, TermExpr, TermGroup};

/// A single corpus position, optionally constrained by a term expression.
///
/// A token with no wrapped constraint matches any position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub wrap: Option<Box<TermExpr>>,
}

impl Token {
    pub fn any() -> Self {
        Self { wrap: None }
    }

    pub fn of(expr: impl Into<TermExpr>) -> Self {
        Self {
            wrap: Some(Box::new(expr.into())),
        }
    }

    pub fn doc(&self) -> Doc {
        let mut doc = tagged("ir:token");
        if let Some(wrap) = &self.wrap {
            doc.insert("wrap".into(), Value::Object(wrap.doc()));
        }
        doc
    }
}

/// A labeled region, optionally carrying an attribute constraint.
///
/// A span with no wrapped constraint matches any region; the compiler
/// synthesizes such spans for common-ancestor constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub wrap: Option<TermExpr>,
    pub attr: Option<TermExpr>,
}

impl Span {
    pub fn any() -> Self {
        Self {
            wrap: None,
            attr: None,
        }
    }

    pub fn of(expr: impl Into<TermExpr>) -> Self {
        Self {
            wrap: Some(expr.into()),
            attr: None,
        }
    }

    pub fn attr(mut self, attr: impl Into<TermExpr>) -> Self {
        self.attr = Some(attr.into());
        self
    }

    pub fn doc(&self) -> Doc {
        let mut doc = tagged("ir:span");
        if let Some(wrap) = &self.wrap {
            doc.insert("wrap".into(), Value::Object(wrap.doc()));
        }
        if let Some(attr) = &self.attr {
            doc.insert("attr".into(), Value::Object(attr.doc()));
        }
        doc
    }
}

/// A back-reference to the sub-tree bound under a class tag.
///
/// Carries no content of its own; it only names the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub class_ref: u16,
}

impl Reference {
    pub fn new(class_ref: u16) -> Self {
        Self { class_ref }
    }

    pub fn doc(&self) -> Doc {
        let mut doc = tagged("ir:reference");
        doc.insert("classRef".into(), Value::from(self.class_ref));
        doc
    }
}

/// Any IR node. Closed sum; consumers dispatch by variant, never by
/// inspecting documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Token(Token),
    Span(Span),
    Term(Term),
    TermGroup(TermGroup),
    Group(Group),
    Reference(Reference),
}

impl Node {
    /// Token wrapping a single term.
    pub fn token(term: Term) -> Self {
        Node::Token(Token::of(term))
    }

    /// Span wrapping a single term.
    pub fn span(term: Term) -> Self {
        Node::Span(Span::of(term))
    }

    pub fn reference(class_ref: u16) -> Self {
        Node::Reference(Reference::new(class_ref))
    }

    /// Canonical ordered document representation, recursive over operands.
    ///
    /// Pure and idempotent: repeated calls return structurally equal
    /// documents and never mutate the tree.
    pub fn doc(&self) -> Result<Doc, IrError> {
        match self {
            Node::Token(t) => Ok(t.doc()),
            Node::Span(s) => Ok(s.doc()),
            Node::Term(t) => Ok(t.doc()),
            Node::TermGroup(g) => Ok(g.doc()),
            Node::Group(g) => g.doc(),
            Node::Reference(r) => Ok(r.doc()),
        }
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl From<Token> for Node {
    fn from(token: Token) -> Self {
        Node::Token(token)
    }
}

impl From<Span> for Node {
    fn from(span: Span) -> Self {
        Node::Span(span)
    }
}

impl From<Reference> for Node {
    fn from(reference: Reference) -> Self {
        Node::Reference(reference)
    }
}
