//! Leaf annotation constraints and their boolean combinations.

use serde_json::Value;

use crate::doc::{Doc, put_str, tagged};

/// Match operator for a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOp {
    Eq,
    Ne,
}

impl MatchOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOp::Eq => "eq",
            MatchOp::Ne => "ne",
        }
    }
}

/// How a term key is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    String,
    Regex,
    Wildcard,
    Punct,
}

impl TermKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TermKind::String => "string",
            TermKind::Regex => "regex",
            TermKind::Wildcard => "wildcard",
            TermKind::Punct => "punct",
        }
    }
}

/// Boolean relation of a term group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoolOp::And => "and",
            BoolOp::Or => "or",
        }
    }
}

/// A single annotation constraint.
///
/// Only `key` is required. Sensitivity flags default to sensitive and are
/// serialized into a `flags` array only when insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub key: String,
    pub foundry: Option<String>,
    pub layer: Option<String>,
    pub match_op: Option<MatchOp>,
    pub kind: Option<TermKind>,
    pub case_insensitive: bool,
    pub diacritics_insensitive: bool,
}

impl Term {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            foundry: None,
            layer: None,
            match_op: None,
            kind: None,
            case_insensitive: false,
            diacritics_insensitive: false,
        }
    }

    pub fn foundry(mut self, foundry: impl Into<String>) -> Self {
        self.foundry = Some(foundry.into());
        self
    }

    pub fn layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    pub fn match_op(mut self, op: MatchOp) -> Self {
        self.match_op = Some(op);
        self
    }

    pub fn kind(mut self, kind: TermKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    pub fn diacritics_insensitive(mut self) -> Self {
        self.diacritics_insensitive = true;
        self
    }

    pub fn doc(&self) -> Doc {
        let mut doc = tagged("ir:term");
        put_str(&mut doc, "key", &self.key);
        if let Some(foundry) = &self.foundry {
            put_str(&mut doc, "foundry", foundry);
        }
        if let Some(layer) = &self.layer {
            put_str(&mut doc, "layer", layer);
        }
        if let Some(op) = self.match_op {
            put_str(&mut doc, "match", op.as_str());
        }
        if let Some(kind) = self.kind {
            put_str(&mut doc, "type", kind.as_str());
        }
        let mut flags = Vec::new();
        if self.case_insensitive {
            flags.push(Value::from("caseInsensitive"));
        }
        if self.diacritics_insensitive {
            flags.push(Value::from("diacriticsInsensitive"));
        }
        if !flags.is_empty() {
            doc.insert("flags".into(), Value::Array(flags));
        }
        doc
    }
}

/// Boolean combination of terms and nested term groups, in listed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermGroup {
    pub relation: BoolOp,
    pub operands: Vec<TermExpr>,
}

impl TermGroup {
    pub fn new(relation: BoolOp, operands: Vec<TermExpr>) -> Self {
        Self { relation, operands }
    }

    pub fn doc(&self) -> Doc {
        let mut doc = tagged("ir:termGroup");
        put_str(&mut doc, "relation", self.relation.as_str());
        let operands = self.operands.iter().map(|o| Value::Object(o.doc()));
        doc.insert("operands".into(), Value::Array(operands.collect()));
        doc
    }
}

/// A term-like operand: either a single term or a boolean group of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermExpr {
    Term(Term),
    Group(TermGroup),
}

impl TermExpr {
    pub fn doc(&self) -> Doc {
        match self {
            TermExpr::Term(t) => t.doc(),
            TermExpr::Group(g) => g.doc(),
        }
    }

    /// Conjoin a list of term expressions, flattening the one-element case.
    ///
    /// Returns `None` for an empty list.
    pub fn conjoin(mut exprs: Vec<TermExpr>) -> Option<TermExpr> {
        match exprs.len() {
            0 => None,
            1 => exprs.pop(),
            _ => Some(TermExpr::Group(TermGroup::new(BoolOp::And, exprs))),
        }
    }
}

impl From<Term> for TermExpr {
    fn from(term: Term) -> Self {
        TermExpr::Term(term)
    }
}

impl From<TermGroup> for TermExpr {
    fn from(group: TermGroup) -> Self {
        TermExpr::Group(group)
    }
}
