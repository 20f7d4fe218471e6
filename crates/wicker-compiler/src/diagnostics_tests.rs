use serde_json::json;

use crate::diagnostics::{Diagnostic, Diagnostics, codes};

#[test]
fn diagnostics_keep_encounter_order() {
    let mut diags = Diagnostics::new();
    diags.push(Diagnostic::error(codes::UNDECLARED_NODE, "first"));
    diags.push(Diagnostic::error(codes::UNBOUND_RELATION, "second"));
    let codes_seen: Vec<u16> = diags.iter().map(|d| d.code).collect();
    assert_eq!(codes_seen, [codes::UNDECLARED_NODE, codes::UNBOUND_RELATION]);
}

#[test]
fn counts_split_by_severity() {
    let mut diags = Diagnostics::new();
    diags.push(Diagnostic::error(codes::PARSE_FAILED, "e"));
    diags.push(Diagnostic::warning(codes::UNSUPPORTED_REGEX_FLAG, "w"));
    diags.push(Diagnostic::warning(codes::INCOMPATIBLE_OPERAND, "w"));
    assert!(diags.has_errors());
    assert_eq!(diags.error_count(), 1);
    assert_eq!(diags.warning_count(), 2);
    assert_eq!(diags.len(), 3);
}

#[test]
fn tuple_is_code_message_then_detail() {
    let d = Diagnostic::error(codes::UNBOUND_RELATION, "disconnected")
        .with_detail(json!({"nodes": [3, 4]}));
    assert_eq!(
        d.tuple(),
        json!([102, "disconnected", {"nodes": [3, 4]}])
    );
}

#[test]
fn code_table_is_pinned() {
    assert_eq!(codes::UNSUPPORTED_FIELD, 14);
    assert_eq!(codes::UNSUPPORTED_FIELD_RELATION, 16);
    assert_eq!(codes::EMPTY_METADATA_QUERY, 30);
    assert_eq!(codes::UNBOUND_RELATION, 102);
    assert_eq!(codes::UNDECLARED_NODE, 103);
    assert_eq!(codes::INCOMPATIBLE_OPERAND, 105);
    assert_eq!(codes::UNSUPPORTED_LAYER, 301);
    assert_eq!(codes::PARSE_FAILED, 302);
    assert_eq!(codes::UNSUPPORTED_QUALIFIER, 303);
    assert_eq!(codes::UNSUPPORTED_REGEX_FLAG, 305);
    assert_eq!(codes::UNSUPPORTED_SCOPE, 307);
}

#[test]
fn empty_collection_reports_cleanly() {
    let diags = Diagnostics::new();
    assert!(diags.is_empty());
    assert!(!diags.has_errors());
    assert_eq!(diags.iter().count(), 0);
}
