//! Wicker compiler: corpus query translation to the shared IR envelope.
//!
//! This crate provides the translation pipeline:
//! - `frontend` - per-language frontends (graph-constraint, boolean-term)
//! - `graph` - the constraint graph built by the graph-constraint frontend
//! - `compile` - graph-to-tree linearization with class binding
//! - `diagnostics` - the stable user-facing error/warning taxonomy
//! - `serialize` - the output envelope
//!
//! Translation is a pure function of (query text, language tag, version
//! tag): no state persists between calls, and separate calls may run
//! concurrently.

pub mod compile;
pub mod diagnostics;
pub mod frontend;
pub mod graph;
pub mod serialize;

#[cfg(test)]
mod diagnostics_tests;

pub use compile::{CLASS_BASE, ClassAllocator, CompileError, linearize};
pub use diagnostics::{Diagnostic, Diagnostics, Severity, codes};
pub use frontend::{LanguageVersion, QueryLanguage};
pub use serialize::{CONTEXT, envelope};

use serde_json::Value;

/// Internal errors that abort a translation call.
///
/// User query problems never surface here; they become diagnostics inside
/// the envelope.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Ir(#[from] wicker_ir::IrError),
}

/// Translate one query into the exchange envelope.
///
/// Exactly one root query tree is produced per call, or none: when the
/// query cannot be translated, the envelope omits the `query` field and
/// carries the accumulated diagnostics instead.
pub fn translate(
    text: &str,
    language: QueryLanguage,
    version: LanguageVersion,
) -> Result<Value, Error> {
    translate_with(text, language, version, None, None)
}

/// [`translate`] with pass-through `collection` and `meta` documents from
/// external collaborators.
pub fn translate_with(
    text: &str,
    language: QueryLanguage,
    version: LanguageVersion,
    collection: Option<Value>,
    meta: Option<Value>,
) -> Result<Value, Error> {
    let mut diags = Diagnostics::new();
    let root = match language {
        QueryLanguage::GraphConstraint => match frontend::graph::parse(text, version, &mut diags)
        {
            Some(graph) => compile::linearize(&graph, &mut diags)?,
            None => None,
        },
        QueryLanguage::BooleanTerms => frontend::terms::parse(text, &mut diags),
    };
    Ok(envelope(root.as_ref(), &diags, collection, meta)?)
}
