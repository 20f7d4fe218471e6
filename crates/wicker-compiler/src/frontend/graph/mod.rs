//! Frontend for the graph-constraint language.
//!
//! The lexer and parser produce a [`ConstraintGraph`](crate::graph::ConstraintGraph);
//! the `compile` module linearizes it into the IR tree.

pub mod lexer;
pub mod parser;


pub use parser::parse;
