//! Worklist linearization of a constraint graph into one nested IR tree.
//!
//! Edges are consumed in source order: the next edge whose near operand is
//! either fresh or already class-bound. Promotion of an edge touching the
//! built state is only the fallback when no edge qualifies. Consuming an
//! edge produces one group; a node used by more than one edge is
//! materialized exactly once under a `class` wrap, and every later use is a
//! back-reference. When an edge operand is already inside a built chain,
//! the chain nests into the new group through a `focus` wrapper that
//! dereferences the operand's class tag; an edge whose operands sit in two
//! different chains splices them the same way, one focus per side.
//!
//! The pass is bounded: every iteration consumes one edge, and residual
//! disconnection is reported after the worklist drains.

use std::collections::HashMap;

use indexmap::IndexSet;
use wicker_ir::{Frame, Group, Node, Span};

use crate::diagnostics::{Diagnostic, Diagnostics, codes};
use crate::graph::{
    ConstraintGraph, DominanceAnchor, Edge, EdgeKind, LeafShape, OverlapKind,
};

use super::classes::ClassAllocator;
use super::error::CompileError;

/// Compile `graph` into a single-rooted IR tree.
///
/// Returns `Ok(None)` when no tree can be produced; the reasons are
/// accumulated as diagnostics. `Err` is reserved for internal invariant
/// violations.
pub fn linearize(
    graph: &ConstraintGraph,
    diags: &mut Diagnostics,
) -> Result<Option<Node>, CompileError> {
    Linearizer::new(graph).run(diags)
}

/// A partially built tree and the node numbers materialized inside it.
struct Chain {
    root: Node,
    members: IndexSet<u32>,
}

/// How an edge operand resolves against the state built so far.
enum Operand {
    /// First use: freshly materialized leaf (class-wrapped when shared).
    Fresh(Node),
    /// Already materialized inside the chain at this index.
    InChain(usize, u16),
}

struct Linearizer<'g> {
    graph: &'g ConstraintGraph,
    classes: ClassAllocator,
    class_of: HashMap<u32, u16>,
    use_count: HashMap<u32, usize>,
    consumed: IndexSet<u32>,
    chains: Vec<Chain>,
}

impl<'g> Linearizer<'g> {
    fn new(graph: &'g ConstraintGraph) -> Self {
        Self {
            graph,
            classes: ClassAllocator::new(),
            class_of: HashMap::new(),
            use_count: HashMap::new(),
            consumed: IndexSet::new(),
            chains: Vec::new(),
        }
    }

    fn run(mut self, diags: &mut Diagnostics) -> Result<Option<Node>, CompileError> {
        let mut pending = self.validated_edges(diags);
        self.count_uses(&pending);

        while !pending.is_empty() {
            // Next edge in source order whose near operand is still fresh
            // or already class-bound. Only when none qualifies, promote an
            // edge touching something already built; failing that too,
            // start a new independent chain.
            let idx = pending
                .iter()
                .position(|e| {
                    !self.consumed.contains(&e.near) || self.class_of.contains_key(&e.near)
                })
                .or_else(|| {
                    pending.iter().position(|e| {
                        self.consumed.contains(&e.near) || self.consumed.contains(&e.far)
                    })
                })
                .unwrap_or(0);
            let edge = pending.remove(idx);
            self.consume(edge, diags)?;
        }

        self.finish(diags)
    }

    /// Drop edges referencing undeclared node numbers, diagnosing each.
    fn validated_edges(&self, diags: &mut Diagnostics) -> Vec<&'g Edge> {
        let mut edges = Vec::with_capacity(self.graph.edge_count());
        for edge in self.graph.edges() {
            let mut ok = true;
            for number in [edge.near, edge.far] {
                if self.graph.node(number).is_none() {
                    diags.push(Diagnostic::error(
                        codes::UNDECLARED_NODE,
                        format!("relation references undeclared node #{number}"),
                    ));
                    ok = false;
                }
            }
            if ok && edge.near == edge.far {
                diags.push(Diagnostic::error(
                    codes::INCOMPATIBLE_OPERAND,
                    format!("relation relates node #{} to itself", edge.near),
                ));
                ok = false;
            }
            if ok {
                edges.push(edge);
            }
        }
        edges
    }

    /// Count how many edges touch each node. Anchored dominance needs a
    /// back-reference to its far operand, which counts as an extra use.
    fn count_uses(&mut self, edges: &[&Edge]) {
        for edge in edges {
            *self.use_count.entry(edge.near).or_default() += 1;
            *self.use_count.entry(edge.far).or_default() += 1;
            if let EdgeKind::Dominance {
                anchor: Some(_), ..
            } = edge.kind
            {
                *self.use_count.entry(edge.far).or_default() += 1;
            }
        }
    }

    fn consume(&mut self, edge: &Edge, diags: &mut Diagnostics) -> Result<(), CompileError> {
        self.check_operand_shapes(edge, diags);

        let near = self.classify(edge.near)?;
        let far = self.classify(edge.far)?;

        // Chains absorbed by this edge, at most one per operand. When both
        // operands sit in the same chain, the near side absorbs it and the
        // far side degrades to a bare reference.
        let (near_absorbs, far_absorbs) = match (&near, &far) {
            (Operand::InChain(i, _), Operand::InChain(j, _)) if i == j => (Some(*i), None),
            (Operand::InChain(i, _), Operand::InChain(j, _)) => (Some(*i), Some(*j)),
            (Operand::InChain(i, _), _) => (Some(*i), None),
            (_, Operand::InChain(j, _)) => (None, Some(*j)),
            _ => (None, None),
        };
        let mut taken: HashMap<usize, Chain> = HashMap::new();
        let mut to_take: Vec<usize> = near_absorbs.iter().chain(&far_absorbs).copied().collect();
        to_take.sort_unstable_by(|a, b| b.cmp(a));
        for i in to_take {
            taken.insert(i, self.chains.remove(i));
        }

        let mut members = IndexSet::new();
        members.insert(edge.near);
        members.insert(edge.far);
        let near_node = Self::operand_node(near, near_absorbs, &mut taken, &mut members);
        let far_node = Self::operand_node(far, far_absorbs, &mut taken, &mut members);

        let root = self.make_group(edge, near_node, far_node)?;
        self.chains.push(Chain { root, members });
        Ok(())
    }

    /// Dominance-family edges require a governing operand that can have
    /// children; a token cannot. Diagnose and continue best-effort.
    fn check_operand_shapes(&self, edge: &Edge, diags: &mut Diagnostics) {
        let hierarchic = matches!(
            edge.kind,
            EdgeKind::Dominance { .. } | EdgeKind::TypedRelation { .. }
        );
        if !hierarchic {
            return;
        }
        if let Some(decl) = self.graph.node(edge.near)
            && matches!(decl.shape, LeafShape::Token(_))
        {
            diags.push(Diagnostic::warning(
                codes::INCOMPATIBLE_OPERAND,
                format!("node #{} is a token and cannot govern a hierarchy", edge.near),
            ));
        }
    }

    fn classify(&mut self, number: u32) -> Result<Operand, CompileError> {
        if !self.consumed.contains(&number) {
            let decl = self
                .graph
                .node(number)
                .expect("edge operands are validated before consumption");
            let mut node = decl.materialize();
            if self.use_count.get(&number).copied().unwrap_or(0) > 1 {
                let tag = self.classes.alloc();
                self.class_of.insert(number, tag);
                node = Group::class(tag, node).into();
            }
            self.consumed.insert(number);
            return Ok(Operand::Fresh(node));
        }
        let tag = self
            .class_of
            .get(&number)
            .copied()
            .ok_or(CompileError::MissingClassBinding(number))?;
        let idx = self
            .chains
            .iter()
            .position(|c| c.members.contains(&number))
            .ok_or(CompileError::MissingClassBinding(number))?;
        Ok(Operand::InChain(idx, tag))
    }

    fn operand_node(
        operand: Operand,
        absorbs: Option<usize>,
        taken: &mut HashMap<usize, Chain>,
        members: &mut IndexSet<u32>,
    ) -> Node {
        match operand {
            Operand::Fresh(node) => node,
            Operand::InChain(_, tag) => match absorbs {
                Some(i) => {
                    let chain = taken.remove(&i).expect("absorbed chain was taken");
                    members.extend(chain.members);
                    Group::focus(tag, chain.root).into()
                }
                // The other operand already absorbed this chain.
                None => Node::reference(tag),
            },
        }
    }

    fn make_group(&mut self, edge: &Edge, near: Node, far: Node) -> Result<Node, CompileError> {
        let group = match &edge.kind {
            EdgeKind::Precedence { distance } => {
                let mut group = Group::sequence(vec![near, far]).in_order(true);
                if let Some(distance) = distance {
                    group = group.distance(distance.clone());
                }
                group
            }
            EdgeKind::Dominance {
                anchor,
                boundary,
                rel_type,
            } => {
                let mut group = Group::hierarchy(near, far);
                if let Some(boundary) = boundary {
                    group = group.boundary(*boundary);
                }
                if let Some(rel_type) = rel_type {
                    group = group.rel_type(rel_type.clone());
                }
                match anchor {
                    None => group,
                    Some(anchor) => {
                        let tag = self
                            .class_of
                            .get(&edge.far)
                            .copied()
                            .ok_or(CompileError::MissingClassBinding(edge.far))?;
                        let frame = match anchor {
                            DominanceAnchor::Leftmost => Frame::StartsWith,
                            DominanceAnchor::Rightmost => Frame::EndsWith,
                        };
                        Group::position(
                            vec![frame],
                            vec![group.into(), Node::reference(tag)],
                        )
                    }
                }
            }
            EdgeKind::TypedRelation { label } => {
                Group::relation(near, far).rel_type(label.clone())
            }
            EdgeKind::Overlap { kind } => Group::position(frames_for(*kind), vec![near, far]),
            EdgeKind::CommonAncestor { boundary } => {
                let tag = self.classes.alloc();
                let ancestor: Node = Group::class(tag, Node::Span(Span::any())).into();
                let mut above_near = Group::hierarchy(ancestor, near);
                let mut above_far = Group::hierarchy(Node::reference(tag), far);
                if let Some(boundary) = boundary {
                    above_near = above_near.boundary(*boundary);
                    above_far = above_far.boundary(*boundary);
                }
                Group::relation(above_near.into(), above_far.into())
            }
        };
        Ok(group.into())
    }

    fn finish(self, diags: &mut Diagnostics) -> Result<Option<Node>, CompileError> {
        let declared = self.graph.node_count();

        if self.chains.is_empty() {
            if self.graph.edge_count() > 0 {
                // Every edge was invalid; already diagnosed.
                return Ok(None);
            }
            return match declared {
                0 => Ok(None),
                1 => {
                    let (_, decl) = self.graph.nodes().next().expect("one declared node");
                    Ok(Some(decl.materialize()))
                }
                _ => {
                    diags.push(disconnected(
                        "multiple nodes declared without connecting relations",
                    ));
                    Ok(None)
                }
            };
        }

        if self.chains.len() > 1 {
            diags.push(disconnected(
                "relations form disconnected fragments with no common root",
            ));
            return Ok(None);
        }

        if self.consumed.len() < declared {
            diags.push(disconnected(
                "some declared nodes are not connected to the query root",
            ));
            return Ok(None);
        }

        let mut chains = self.chains;
        Ok(Some(chains.pop().expect("exactly one chain remains").root))
    }
}

fn disconnected(message: &str) -> Diagnostic {
    Diagnostic::error(codes::UNBOUND_RELATION, message)
}

/// Frame combination for each positional-overlap edge kind. Directional
/// alignment pairs with `matches` because an equal extent also satisfies it.
fn frames_for(kind: OverlapKind) -> Vec<Frame> {
    match kind {
        OverlapKind::Identity => vec![Frame::Matches],
        OverlapKind::LeftAligned => vec![Frame::StartsWith, Frame::Matches],
        OverlapKind::RightAligned => vec![Frame::EndsWith, Frame::Matches],
        OverlapKind::Inclusion => vec![Frame::IsAround],
        OverlapKind::Overlap => vec![Frame::OverlapsLeft, Frame::OverlapsRight],
        OverlapKind::OverlapsLeft => vec![Frame::OverlapsLeft],
        OverlapKind::OverlapsRight => vec![Frame::OverlapsRight],
    }
}
