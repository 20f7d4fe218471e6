use serde_json::{Value, json};

use super::terms::parse;
use crate::diagnostics::{Diagnostics, codes};

fn parse_doc(source: &str) -> Value {
    let mut diags = Diagnostics::new();
    let node = parse(source, &mut diags).expect("query should parse");
    assert!(diags.is_empty());
    Value::Object(node.doc().expect("leaf docs never fail"))
}

#[test]
fn single_word_is_a_bare_token() {
    let doc = parse_doc("Sonne");
    assert_eq!(
        doc,
        json!({
            "@type": "ir:token",
            "wrap": {
                "@type": "ir:term",
                "key": "Sonne",
                "layer": "orth",
                "match": "eq"
            }
        })
    );
}

#[test]
fn conjunction_is_an_unordered_sentence_sequence() {
    let doc = parse_doc("Sonne and scheint");
    assert_eq!(doc["@type"], json!("ir:group"));
    assert_eq!(doc["operation"], json!("sequence"));
    assert_eq!(doc["inOrder"], json!(false));
    assert_eq!(
        doc["distances"],
        json!([{
            "@type": "ir:distance",
            "key": "s",
            "boundary": {"@type": "ir:boundary", "min": 0, "max": 0}
        }])
    );
    assert_eq!(doc["operands"][0]["wrap"]["key"], json!("Sonne"));
    assert_eq!(doc["operands"][1]["wrap"]["key"], json!("scheint"));
}

#[test]
fn disjunction_of_bare_words() {
    let doc = parse_doc("Sonne or Mond");
    assert_eq!(doc["operation"], json!("disjunction"));
    assert_eq!(doc["operands"][0]["wrap"]["key"], json!("Sonne"));
    assert_eq!(doc["operands"][1]["wrap"]["key"], json!("Mond"));
}

#[test]
fn or_binds_weaker_than_and() {
    let doc = parse_doc("Sonne and scheint or Mond");
    assert_eq!(doc["operation"], json!("disjunction"));
    assert_eq!(doc["operands"][0]["operation"], json!("sequence"));
    assert_eq!(doc["operands"][1]["@type"], json!("ir:token"));
}

#[test]
fn parentheses_wrap_single_operands() {
    let doc = parse_doc("(Sonne) and (scheint)");
    assert_eq!(doc["operation"], json!("sequence"));
    assert_eq!(doc["operands"][0]["wrap"]["key"], json!("Sonne"));
}

#[test]
fn connectives_are_case_insensitive() {
    let doc = parse_doc("Sonne AND scheint Or Mond");
    assert_eq!(doc["operation"], json!("disjunction"));
}

#[test]
fn malformed_queries_fail_with_one_diagnostic() {
    for source in [
        "",
        "Sonne and",
        "Sonne scheint",
        "(Sonne and scheint)",
        "(Sonne",
        "Sonne)",
        "and Sonne",
    ] {
        let mut diags = Diagnostics::new();
        assert!(parse(source, &mut diags).is_none(), "{source:?} should fail");
        assert_eq!(diags.len(), 1, "{source:?} yields one diagnostic");
        assert_eq!(diags.iter().next().unwrap().code, codes::PARSE_FAILED);
    }
}
