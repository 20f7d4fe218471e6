//! In-memory constraint graph built by the graph-constraint frontend.
//!
//! A query in the graph-constraint language is a set of numbered node
//! declarations plus binary edge constraints over those numbers, in
//! arbitrary order. The graph holds both verbatim; the `compile` module
//! linearizes it into one IR tree.
//!
//! Construction never fails on structurally valid input. Referencing an
//! undeclared node number is a user error surfaced later as a diagnostic,
//! not a reason to panic here.


use indexmap::IndexMap;
use wicker_ir::{Boundary, Distance, Node, Span, Term, TermExpr, Token};

/// Leaf shape of a declared node: a corpus position or a labeled region.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafShape {
    Token(Option<TermExpr>),
    Span(Option<TermExpr>),
}

/// One numbered node declaration plus its accumulated unary predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDecl {
    pub shape: LeafShape,
    pub predicates: Vec<TermExpr>,
}

impl NodeDecl {
    pub fn token(wrap: Option<TermExpr>) -> Self {
        Self {
            shape: LeafShape::Token(wrap),
            predicates: Vec::new(),
        }
    }

    pub fn span(wrap: Option<TermExpr>) -> Self {
        Self {
            shape: LeafShape::Span(wrap),
            predicates: Vec::new(),
        }
    }

    /// Materialize the declaration as an IR leaf, folding unary predicates
    /// into the leaf's constraint slot.
    pub fn materialize(&self) -> Node {
        match &self.shape {
            LeafShape::Token(wrap) => {
                let mut exprs: Vec<TermExpr> = wrap.iter().cloned().collect();
                exprs.extend(self.predicates.iter().cloned());
                match TermExpr::conjoin(exprs) {
                    Some(expr) => Node::Token(Token::of(expr)),
                    None => Node::Token(Token::any()),
                }
            }
            LeafShape::Span(wrap) => {
                let mut span = match wrap {
                    Some(expr) => Span::of(expr.clone()),
                    None => Span::any(),
                };
                if let Some(attr) = TermExpr::conjoin(self.predicates.clone()) {
                    span = span.attr(attr);
                }
                Node::Span(span)
            }
        }
    }
}

/// Anchor of a dominance edge: the child is the leftmost or rightmost one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominanceAnchor {
    Leftmost,
    Rightmost,
}

/// Positional overlap variants between two spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    /// Both spans cover the same extent.
    Identity,
    /// Same start, first span includes the second.
    LeftAligned,
    /// Same end, first span includes the second.
    RightAligned,
    /// First span strictly around the second.
    Inclusion,
    /// Any overlap on either side.
    Overlap,
    /// Overlap where the first span starts earlier.
    OverlapsLeft,
    /// Overlap where the first span ends later.
    OverlapsRight,
}

/// Edge constraint kinds. The first operand of the owning edge is the
/// near/governing side.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeKind {
    Precedence { distance: Option<Distance> },
    Dominance {
        anchor: Option<DominanceAnchor>,
        boundary: Option<Boundary>,
        rel_type: Option<Term>,
    },
    TypedRelation { label: Term },
    Overlap { kind: OverlapKind },
    CommonAncestor { boundary: Option<Boundary> },
}

/// A binary edge constraint between two declared node numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub near: u32,
    pub far: u32,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(near: u32, far: u32, kind: EdgeKind) -> Self {
        Self { near, far, kind }
    }
}

/// Node declarations (1-based author numbers, insertion-ordered) plus edge
/// constraints in source order.
#[derive(Debug, Clone, Default)]
pub struct ConstraintGraph {
    nodes: IndexMap<u32, NodeDecl>,
    edges: Vec<Edge>,
}

impl ConstraintGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare node `number`. Re-declaring a number replaces the earlier
    /// declaration but keeps its predicates.
    pub fn declare(&mut self, number: u32, decl: NodeDecl) {
        match self.nodes.get_mut(&number) {
            Some(existing) => {
                let predicates = std::mem::take(&mut existing.predicates);
                *existing = NodeDecl { predicates, ..decl };
            }
            None => {
                self.nodes.insert(number, decl);
            }
        }
    }

    /// Attach a unary predicate to a declared node. Returns false when the
    /// number is undeclared.
    pub fn add_predicate(&mut self, number: u32, predicate: TermExpr) -> bool {
        match self.nodes.get_mut(&number) {
            Some(decl) => {
                decl.predicates.push(predicate);
                true
            }
            None => false,
        }
    }

    pub fn relate(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn node(&self, number: u32) -> Option<&NodeDecl> {
        self.nodes.get(&number)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (u32, &NodeDecl)> {
        self.nodes.iter().map(|(&n, d)| (n, d))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
