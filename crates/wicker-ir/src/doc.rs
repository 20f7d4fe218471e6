//! The ordered key/value document every IR node converts into.

use serde_json::{Map, Value};

/// An ordered document. Insertion order is serialization order; this relies
/// on `serde_json`'s `preserve_order` feature being enabled.
pub type Doc = Map<String, Value>;

/// Start a document with its `@type` tag as the first key.
pub(crate) fn tagged(type_tag: &str) -> Doc {
    let mut doc = Doc::new();
    doc.insert("@type".into(), Value::String(type_tag.into()));
    doc
}

/// Insert a string field.
pub(crate) fn put_str(doc: &mut Doc, key: &str, value: &str) {
    doc.insert(key.into(), Value::String(value.into()));
}
