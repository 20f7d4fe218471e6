//! Envelope builder: wraps the IR root and diagnostics in the fixed
//! exchange document.
//!
//! Keys are emitted in fixed order and only when non-empty; a translation
//! that produced no usable tree still yields a valid envelope carrying only
//! diagnostics.

use serde_json::{Map, Value};
use wicker_ir::{IrError, Node};

use crate::diagnostics::Diagnostics;

/// Fixed namespace/context reference of the exchange format.
pub const CONTEXT: &str = "https://wicker.dev/ns/context.jsonld";

/// Build the output envelope.
///
/// `collection` and `meta` are external collaborator output, passed through
/// opaquely. Never fails for a well-formed diagnostics list; `Err` only
/// surfaces internal invariant violations from document conversion.
pub fn envelope(
    root: Option<&Node>,
    diags: &Diagnostics,
    collection: Option<Value>,
    meta: Option<Value>,
) -> Result<Value, IrError> {
    let mut doc = Map::new();
    if let Some(root) = root {
        doc.insert("query".into(), Value::Object(root.doc()?));
    }
    if let Some(collection) = collection {
        doc.insert("collection".into(), collection);
    }
    if let Some(meta) = meta {
        doc.insert("meta".into(), meta);
    }
    let warnings: Vec<Value> = diags.warnings().map(|d| d.tuple()).collect();
    if !warnings.is_empty() {
        doc.insert("warnings".into(), Value::Array(warnings));
    }
    let errors: Vec<Value> = diags.errors().map(|d| d.tuple()).collect();
    if !errors.is_empty() {
        doc.insert("errors".into(), Value::Array(errors));
    }
    doc.insert("@context".into(), Value::String(CONTEXT.into()));
    Ok(Value::Object(doc))
}
