//! Internal compiler errors.
//!
//! These are programming errors, not user diagnostics: they abort the
//! translation of the current call instead of being accumulated.

/// Invariant violations inside the linearizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A node was consumed by an earlier edge but never bound to a class
    /// tag, so a later edge has nothing to reference.
    #[error("node #{0} was consumed without a class binding")]
    MissingClassBinding(u32),
}
