use serde_json::{Value, json};
use wicker_ir::{MatchOp, Node, Term};

use super::linearize;
use crate::diagnostics::{Diagnostics, codes};
use crate::graph::{ConstraintGraph, DominanceAnchor, Edge, EdgeKind, NodeDecl};

fn token_decl(key: &str) -> NodeDecl {
    NodeDecl::token(Some(Term::new(key).into()))
}

fn span_decl(key: &str) -> NodeDecl {
    NodeDecl::span(Some(Term::new(key).layer("cat").match_op(MatchOp::Eq).into()))
}

fn precedence(near: u32, far: u32) -> Edge {
    Edge::new(near, far, EdgeKind::Precedence { distance: None })
}

fn dominance(near: u32, far: u32, anchor: Option<DominanceAnchor>) -> Edge {
    Edge::new(
        near,
        far,
        EdgeKind::Dominance {
            anchor,
            boundary: None,
            rel_type: None,
        },
    )
}

fn doc_of(node: &Node) -> Value {
    Value::Object(node.doc().unwrap())
}

fn tok(key: &str) -> Value {
    json!({"@type": "ir:token", "wrap": {"@type": "ir:term", "key": key}})
}

fn span(key: &str) -> Value {
    json!({
        "@type": "ir:span",
        "wrap": {"@type": "ir:term", "key": key, "layer": "cat", "match": "eq"}
    })
}

#[test]
fn empty_graph_yields_no_tree() {
    let graph = ConstraintGraph::new();
    let mut diags = Diagnostics::new();
    assert_eq!(linearize(&graph, &mut diags).unwrap(), None);
    assert!(diags.is_empty());
}

#[test]
fn single_node_is_its_own_root() {
    let mut graph = ConstraintGraph::new();
    graph.declare(1, token_decl("a"));
    let mut diags = Diagnostics::new();
    let root = linearize(&graph, &mut diags).unwrap().unwrap();
    assert_eq!(doc_of(&root), tok("a"));
    assert!(diags.is_empty());
}

#[test]
fn several_nodes_without_edges_are_disconnected() {
    let mut graph = ConstraintGraph::new();
    graph.declare(1, token_decl("a"));
    graph.declare(2, token_decl("b"));
    let mut diags = Diagnostics::new();
    assert_eq!(linearize(&graph, &mut diags).unwrap(), None);
    assert_eq!(diags.error_count(), 1);
    assert_eq!(diags.iter().next().unwrap().code, codes::UNBOUND_RELATION);
}

#[test]
fn precedence_builds_an_ordered_sequence() {
    let mut graph = ConstraintGraph::new();
    graph.declare(1, token_decl("a"));
    graph.declare(2, token_decl("b"));
    graph.relate(precedence(1, 2));
    let mut diags = Diagnostics::new();
    let root = linearize(&graph, &mut diags).unwrap().unwrap();
    assert_eq!(
        doc_of(&root),
        json!({
            "@type": "ir:group",
            "operation": "sequence",
            "inOrder": true,
            "operands": [tok("a"), tok("b")]
        })
    );
}

#[test]
fn shared_node_is_materialized_exactly_once() {
    let mut graph = ConstraintGraph::new();
    graph.declare(1, token_decl("a"));
    graph.declare(2, token_decl("b"));
    graph.declare(3, token_decl("c"));
    graph.relate(precedence(1, 2));
    graph.relate(precedence(2, 3));
    let mut diags = Diagnostics::new();
    let root = linearize(&graph, &mut diags).unwrap().unwrap();
    let rendered = doc_of(&root).to_string();
    // One class binding for #2, dereferenced by the second edge.
    assert_eq!(rendered.matches("classOut").count(), 1);
    assert_eq!(rendered.matches("\"key\":\"b\"").count(), 1);
    assert_eq!(
        doc_of(&root),
        json!({
            "@type": "ir:group",
            "operation": "sequence",
            "inOrder": true,
            "operands": [
                {
                    "@type": "ir:group",
                    "operation": "focus",
                    "operands": [{
                        "@type": "ir:group",
                        "operation": "sequence",
                        "inOrder": true,
                        "operands": [
                            tok("a"),
                            {
                                "@type": "ir:group",
                                "operation": "class",
                                "operands": [tok("b")],
                                "classOut": 129
                            }
                        ]
                    }],
                    "classRef": [129]
                },
                tok("c")
            ]
        })
    );
}

#[test]
fn class_tags_ascend_and_are_deterministic() {
    let build = || {
        let mut graph = ConstraintGraph::new();
        for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
            graph.declare(i as u32 + 1, token_decl(key));
        }
        graph.relate(precedence(1, 2));
        graph.relate(precedence(3, 4));
        graph.relate(precedence(2, 3));
        graph
    };
    let mut diags = Diagnostics::new();
    let first = linearize(&build(), &mut diags).unwrap().unwrap();
    let rendered = doc_of(&first).to_string();
    assert!(rendered.contains("\"classOut\":129"));
    assert!(rendered.contains("\"classOut\":130"));
    assert!(!rendered.contains("\"classOut\":131"));

    let mut again = Diagnostics::new();
    let second = linearize(&build(), &mut again).unwrap().unwrap();
    assert_eq!(doc_of(&first), doc_of(&second));
    assert!(diags.is_empty());
}

#[test]
fn edges_are_consumed_in_source_order_and_chains_splice_last() {
    // 3.4 does not touch the chain built from 1.2 but comes earlier in
    // source order than 2.3, so it is consumed second as its own chain.
    // The final edge then splices both chains, one focus per side; the
    // root's operands are the two nested chains, never a bare leaf.
    let mut graph = ConstraintGraph::new();
    for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
        graph.declare(i as u32 + 1, token_decl(key));
    }
    graph.relate(precedence(1, 2));
    graph.relate(precedence(3, 4));
    graph.relate(precedence(2, 3));
    let mut diags = Diagnostics::new();
    let root = linearize(&graph, &mut diags).unwrap().unwrap();
    assert!(diags.is_empty());
    let doc = doc_of(&root);
    assert_eq!(doc["operation"], json!("sequence"));

    let near = &doc["operands"][0];
    assert_eq!(near["operation"], json!("focus"));
    assert_eq!(near["classRef"], json!([129]));
    assert_eq!(near["operands"][0]["operands"][0], tok("a"));
    assert_eq!(near["operands"][0]["operands"][1]["classOut"], json!(129));

    let far = &doc["operands"][1];
    assert_eq!(far["operation"], json!("focus"));
    assert_eq!(far["classRef"], json!([130]));
    assert_eq!(far["operands"][0]["operands"][0]["classOut"], json!(130));
    assert_eq!(far["operands"][0]["operands"][1], tok("d"));
}

#[test]
fn disconnected_pairs_yield_no_tree_and_one_diagnostic() {
    let mut graph = ConstraintGraph::new();
    for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
        graph.declare(i as u32 + 1, token_decl(key));
    }
    graph.relate(precedence(1, 2));
    graph.relate(precedence(3, 4));
    let mut diags = Diagnostics::new();
    assert_eq!(linearize(&graph, &mut diags).unwrap(), None);
    assert_eq!(diags.error_count(), 1);
    assert_eq!(diags.iter().next().unwrap().code, codes::UNBOUND_RELATION);
}

#[test]
fn undeclared_operand_is_diagnosed_not_fatal() {
    let mut graph = ConstraintGraph::new();
    graph.declare(1, token_decl("a"));
    graph.relate(precedence(1, 7));
    let mut diags = Diagnostics::new();
    assert_eq!(linearize(&graph, &mut diags).unwrap(), None);
    assert_eq!(diags.iter().next().unwrap().code, codes::UNDECLARED_NODE);
}

#[test]
fn self_relation_is_rejected() {
    let mut graph = ConstraintGraph::new();
    graph.declare(1, token_decl("a"));
    graph.relate(precedence(1, 1));
    let mut diags = Diagnostics::new();
    assert_eq!(linearize(&graph, &mut diags).unwrap(), None);
    assert_eq!(
        diags.iter().next().unwrap().code,
        codes::INCOMPATIBLE_OPERAND
    );
}

#[test]
fn anchored_dominance_wraps_hierarchy_in_a_position_group() {
    let mut graph = ConstraintGraph::new();
    graph.declare(1, span_decl("S"));
    graph.declare(2, span_decl("NP"));
    graph.relate(dominance(1, 2, Some(DominanceAnchor::Leftmost)));
    let mut diags = Diagnostics::new();
    let root = linearize(&graph, &mut diags).unwrap().unwrap();
    assert_eq!(
        doc_of(&root),
        json!({
            "@type": "ir:group",
            "operation": "position",
            "operands": [
                {
                    "@type": "ir:group",
                    "operation": "hierarchy",
                    "operands": [
                        span("S"),
                        {
                            "@type": "ir:group",
                            "operation": "class",
                            "operands": [span("NP")],
                            "classOut": 129
                        }
                    ]
                },
                {"@type": "ir:reference", "classRef": 129}
            ],
            "frames": ["startsWith"]
        })
    );
}

#[test]
fn common_ancestor_synthesizes_one_classed_span() {
    let mut graph = ConstraintGraph::new();
    graph.declare(1, span_decl("NP"));
    graph.declare(2, span_decl("VP"));
    graph.relate(Edge::new(1, 2, EdgeKind::CommonAncestor { boundary: None }));
    let mut diags = Diagnostics::new();
    let root = linearize(&graph, &mut diags).unwrap().unwrap();
    assert_eq!(
        doc_of(&root),
        json!({
            "@type": "ir:group",
            "operation": "relation",
            "operands": [
                {
                    "@type": "ir:group",
                    "operation": "hierarchy",
                    "operands": [
                        {
                            "@type": "ir:group",
                            "operation": "class",
                            "operands": [{"@type": "ir:span"}],
                            "classOut": 129
                        },
                        span("NP")
                    ]
                },
                {
                    "@type": "ir:group",
                    "operation": "hierarchy",
                    "operands": [
                        {"@type": "ir:reference", "classRef": 129},
                        span("VP")
                    ]
                }
            ]
        })
    );
}

#[test]
fn token_governing_a_hierarchy_warns_but_compiles() {
    let mut graph = ConstraintGraph::new();
    graph.declare(1, token_decl("a"));
    graph.declare(2, span_decl("NP"));
    graph.relate(dominance(1, 2, None));
    let mut diags = Diagnostics::new();
    let root = linearize(&graph, &mut diags).unwrap();
    assert!(root.is_some());
    assert_eq!(diags.warning_count(), 1);
    assert_eq!(
        diags.iter().next().unwrap().code,
        codes::INCOMPATIBLE_OPERAND
    );
}
