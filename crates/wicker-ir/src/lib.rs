//! Shared query IR for corpus search backends.
//!
//! Every supported query language is translated into one nested,
//! single-rooted tree of IR nodes, which serializes to an ordered JSON
//! document:
//! - `bounds` - inclusive min/max boundaries and distance constraints
//! - `term` - leaf annotation constraints and their boolean combinations
//! - `group` - structural operations (sequence, hierarchy, class, focus, ...)
//! - `node` - the closed operand sum and the wrapper leaves (token, span)
//! - `doc` - the ordered document type all nodes convert into
//!
//! Document conversion is pure and idempotent; absent optional fields are
//! omitted from the document, never emitted as null.

pub mod bounds;
pub mod doc;
pub mod error;
pub mod group;
pub mod node;
pub mod term;

#[cfg(test)]
mod bounds_tests;

pub use bounds::{Boundary, Distance, UNSET};
pub use doc::Doc;
pub use error::IrError;
pub use group::{Frame, Group, GroupOp};
pub use node::{Node, Reference, Span, Token};
pub use term::{BoolOp, MatchOp, Term, TermExpr, TermGroup, TermKind};
