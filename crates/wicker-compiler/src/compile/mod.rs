//! Graph-to-tree compilation: linearize a constraint graph into one IR tree.
//!
//! - `classes`: synthetic class-tag allocation
//! - `linearize`: the worklist planner that consumes edges into nested
//!   groups, binding shared nodes under class tags

mod classes;
mod error;
mod linearize;

#[cfg(test)]
mod linearize_tests;

pub use classes::{CLASS_BASE, ClassAllocator};
pub use error::CompileError;
pub use linearize::linearize;
