//! Structural groups: the operation nodes of the IR tree.

use serde_json::Value;

use crate::bounds::{Boundary, Distance};
use crate::doc::{Doc, put_str, tagged};
use crate::error::IrError;
use crate::node::Node;
use crate::term::Term;

/// Operation tag of a group. Closed set, never extended at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOp {
    Sequence,
    Position,
    Disjunction,
    Repetition,
    Class,
    Merge,
    Relation,
    Hierarchy,
    Focus,
}

impl GroupOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupOp::Sequence => "sequence",
            GroupOp::Position => "position",
            GroupOp::Disjunction => "disjunction",
            GroupOp::Repetition => "repetition",
            GroupOp::Class => "class",
            GroupOp::Merge => "merge",
            GroupOp::Relation => "relation",
            GroupOp::Hierarchy => "hierarchy",
            GroupOp::Focus => "focus",
        }
    }
}

/// Positional relationship between two spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    StartsWith,
    EndsWith,
    Matches,
    IsAround,
    OverlapsLeft,
    OverlapsRight,
}

impl Frame {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frame::StartsWith => "startsWith",
            Frame::EndsWith => "endsWith",
            Frame::Matches => "matches",
            Frame::IsAround => "isAround",
            Frame::OverlapsLeft => "overlapsLeft",
            Frame::OverlapsRight => "overlapsRight",
        }
    }
}

/// The structural workhorse: an operation over an ordered operand list.
///
/// Optional fields apply only to some operations: `class_out` to `class`,
/// `class_refs` to `focus`, `frames` to `position`, `rel_type` to typed
/// relations, `boundary` to repetition and ranged hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub op: GroupOp,
    pub operands: Vec<Node>,
    pub in_order: Option<bool>,
    pub distances: Vec<Distance>,
    pub boundary: Option<Boundary>,
    pub frames: Vec<Frame>,
    pub rel_type: Option<Term>,
    pub class_out: Option<u16>,
    pub class_refs: Vec<u16>,
}

impl Group {
    pub fn new(op: GroupOp, operands: Vec<Node>) -> Self {
        Self {
            op,
            operands,
            in_order: None,
            distances: Vec::new(),
            boundary: None,
            frames: Vec::new(),
            rel_type: None,
            class_out: None,
            class_refs: Vec::new(),
        }
    }

    pub fn sequence(operands: Vec<Node>) -> Self {
        Self::new(GroupOp::Sequence, operands)
    }

    pub fn disjunction(operands: Vec<Node>) -> Self {
        Self::new(GroupOp::Disjunction, operands)
    }

    pub fn hierarchy(near: Node, far: Node) -> Self {
        Self::new(GroupOp::Hierarchy, vec![near, far])
    }

    pub fn relation(near: Node, far: Node) -> Self {
        Self::new(GroupOp::Relation, vec![near, far])
    }

    pub fn position(frames: Vec<Frame>, operands: Vec<Node>) -> Self {
        let mut group = Self::new(GroupOp::Position, operands);
        group.frames = frames;
        group
    }

    /// Bind `operand` under a class tag so later uses can reference it.
    pub fn class(tag: u16, operand: Node) -> Self {
        let mut group = Self::new(GroupOp::Class, vec![operand]);
        group.class_out = Some(tag);
        group
    }

    /// Dereference the sub-tree bound under `tag` within `operand`.
    pub fn focus(tag: u16, operand: Node) -> Self {
        let mut group = Self::new(GroupOp::Focus, vec![operand]);
        group.class_refs = vec![tag];
        group
    }

    pub fn in_order(mut self, in_order: bool) -> Self {
        self.in_order = Some(in_order);
        self
    }

    pub fn distance(mut self, distance: Distance) -> Self {
        self.distances.push(distance);
        self
    }

    pub fn boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn rel_type(mut self, rel_type: Term) -> Self {
        self.rel_type = Some(rel_type);
        self
    }

    /// Ordered document conversion with fixed key order.
    ///
    /// A `class` group without a tag or a `focus` group without references
    /// is a compiler bug, reported as an error rather than a diagnostic.
    pub fn doc(&self) -> Result<Doc, IrError> {
        let mut doc = tagged("ir:group");
        put_str(&mut doc, "operation", self.op.as_str());
        if let Some(in_order) = self.in_order {
            doc.insert("inOrder".into(), Value::Bool(in_order));
        }
        if !self.distances.is_empty() {
            let distances = self.distances.iter().map(|d| Value::Object(d.doc()));
            doc.insert("distances".into(), Value::Array(distances.collect()));
        }
        let mut operands = Vec::with_capacity(self.operands.len());
        for operand in &self.operands {
            operands.push(Value::Object(operand.doc()?));
        }
        doc.insert("operands".into(), Value::Array(operands));
        if self.op == GroupOp::Class {
            let tag = self.class_out.ok_or(IrError::MissingClassTag)?;
            doc.insert("classOut".into(), Value::from(tag));
        }
        if self.op == GroupOp::Focus {
            if self.class_refs.is_empty() {
                return Err(IrError::MissingFocusRef);
            }
            let refs = self.class_refs.iter().map(|&c| Value::from(c));
            doc.insert("classRef".into(), Value::Array(refs.collect()));
        }
        if let Some(boundary) = &self.boundary {
            doc.insert("boundary".into(), Value::Object(boundary.doc()));
        }
        if !self.frames.is_empty() {
            let frames = self.frames.iter().map(|f| Value::from(f.as_str()));
            doc.insert("frames".into(), Value::Array(frames.collect()));
        }
        if let Some(rel_type) = &self.rel_type {
            doc.insert("relType".into(), Value::Object(rel_type.doc()));
        }
        Ok(doc)
    }
}
