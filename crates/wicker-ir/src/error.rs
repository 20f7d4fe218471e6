//! Errors raised by IR construction and document conversion.
//!
//! These are programming errors or invalid literal inputs, not user query
//! diagnostics. Frontends own the user-facing diagnostic taxonomy; anything
//! surfacing here aborts the translation of the current call instead of
//! being folded into the diagnostics list.

/// Errors from IR constructors and `doc()` conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    /// A boundary minimum is required; `-1` is only a sentinel for `max`.
    #[error("boundary minimum must be set and non-negative, got {0}")]
    MissingMin(i32),

    /// Both bounds set but inverted.
    #[error("boundary minimum {min} exceeds maximum {max}")]
    InvertedBoundary { min: i32, max: i32 },

    /// A repetition quantifier spelling that is none of `*`, `+`, `?`,
    /// `{m}`, `{m,}`, `{m,n}`.
    #[error("unrecognized quantifier `{0}`")]
    BadQuantifier(String),

    /// A `class` group reached serialization without a class tag.
    #[error("class group is missing its class tag")]
    MissingClassTag,

    /// A `focus` group reached serialization without class references.
    #[error("focus group dereferences no class tags")]
    MissingFocusRef,
}
