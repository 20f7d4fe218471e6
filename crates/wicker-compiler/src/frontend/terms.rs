//! Frontend for the boolean-term language.
//!
//! The mapping to IR is structurally direct: `and` builds a sequence of
//! tokens constrained to the same sentence, `or` a disjunction. No planning
//! is involved.

use logos::Logos;

use wicker_ir::{Boundary, Distance, Group, MatchOp, Node, Term};

use crate::diagnostics::{Diagnostic, Diagnostics, codes};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum TermToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[regex(r"[^\s()]+")]
    Word,
}

/// Parse boolean-term query text directly into an IR tree.
///
/// Grammar: `operand ((and|or) operand)*` where an operand is a word,
/// optionally parenthesized. `or` binds weaker than `and`. Anything else is
/// a single generic parse-failure diagnostic.
pub fn parse(source: &str, diags: &mut Diagnostics) -> Option<Node> {
    let Some(words) = scan(source) else {
        return parse_failed(diags);
    };

    // Alternating operand/connective sequence.
    if words.is_empty() || words.len() % 2 == 0 {
        return parse_failed(diags);
    }
    let mut disjuncts: Vec<Vec<Node>> = vec![vec![token(words[0])]];
    for pair in words[1..].chunks(2) {
        let connective = pair[0];
        let operand = token(pair[1]);
        if connective.eq_ignore_ascii_case("and") {
            disjuncts
                .last_mut()
                .expect("disjuncts start non-empty")
                .push(operand);
        } else if connective.eq_ignore_ascii_case("or") {
            disjuncts.push(vec![operand]);
        } else {
            return parse_failed(diags);
        }
    }

    let mut alternatives: Vec<Node> = disjuncts.into_iter().map(conjunction).collect();
    Some(if alternatives.len() == 1 {
        alternatives.pop().expect("one alternative")
    } else {
        Group::disjunction(alternatives).into()
    })
}

/// Flatten the token stream into bare words, validating parentheses.
/// Parentheses may wrap exactly one word; connectives stay bare.
fn scan(source: &str) -> Option<Vec<&str>> {
    let mut words = Vec::new();
    let mut lexer = TermToken::lexer(source);
    while let Some(result) = lexer.next() {
        match result.ok()? {
            TermToken::Word => words.push(lexer.slice()),
            TermToken::LParen => {
                if !matches!(lexer.next()?, Ok(TermToken::Word)) {
                    return None;
                }
                words.push(lexer.slice());
                if !matches!(lexer.next()?, Ok(TermToken::RParen)) {
                    return None;
                }
            }
            TermToken::RParen => return None,
        }
    }
    Some(words)
}

fn parse_failed(diags: &mut Diagnostics) -> Option<Node> {
    diags.push(Diagnostic::error(
        codes::PARSE_FAILED,
        "query cannot be parsed",
    ));
    None
}

fn token(word: &str) -> Node {
    Node::token(Term::new(word).layer("orth").match_op(MatchOp::Eq))
}

/// Conjoined terms must co-occur within one sentence, in any order.
fn conjunction(mut operands: Vec<Node>) -> Node {
    if operands.len() == 1 {
        return operands.pop().expect("one operand");
    }
    let same_sentence = Boundary::exact(0).expect("0..=0 is a valid boundary");
    Group::sequence(operands)
        .in_order(false)
        .distance(Distance::new("s", same_sentence))
        .into()
}
