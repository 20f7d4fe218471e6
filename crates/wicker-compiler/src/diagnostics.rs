//! User-level diagnostics accumulated during one translation.
//!
//! Diagnostics cover everything a query author can get wrong: malformed
//! syntax, unsupported constructs, disconnected references. They are
//! recovered locally and accumulated in encounter order; translation
//! continues best-effort. Programming errors never land here - those are
//! `Error` values that abort the call.
//!
//! Codes form a stable integer taxonomy shared by all frontends, grouped by
//! band: 1x-4x metadata-language errors, 1xx graph-language structural
//! errors, 3xx segment/term-language and parse errors.

use serde_json::Value;

/// Stable diagnostic codes. The numeric values are part of the exchange
/// format and pinned by tests; never renumber.
pub mod codes {
    /// Metadata field/index not searchable (reserved for the external
    /// metadata frontend).
    pub const UNSUPPORTED_FIELD: u16 = 14;
    /// Metadata relation not supported (reserved).
    pub const UNSUPPORTED_FIELD_RELATION: u16 = 16;
    /// Empty metadata query (reserved).
    pub const EMPTY_METADATA_QUERY: u16 = 30;

    /// Edge constraints left the query disconnected or unrooted.
    pub const UNBOUND_RELATION: u16 = 102;
    /// An edge referenced a node number that was never declared.
    pub const UNDECLARED_NODE: u16 = 103;
    /// An edge kind was paired with an operand that cannot carry it.
    pub const INCOMPATIBLE_OPERAND: u16 = 105;

    /// Annotation layer unknown to the requested language.
    pub const UNSUPPORTED_LAYER: u16 = 301;
    /// Generic parse failure; always the only diagnostic of its call.
    pub const PARSE_FAILED: u16 = 302;
    /// Foundry/qualifier unknown to the requested language.
    pub const UNSUPPORTED_QUALIFIER: u16 = 303;
    /// Regex flag not supported by the backend.
    pub const UNSUPPORTED_REGEX_FLAG: u16 = 305;
    /// Scope or operator not available in the requested language version.
    pub const UNSUPPORTED_SCOPE: u16 = 307;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One diagnostic: code, message, and optional structured detail.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub code: u16,
    pub severity: Severity,
    pub message: String,
    pub detail: Vec<Value>,
}

impl Diagnostic {
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
            detail: Vec::new(),
        }
    }

    pub fn warning(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message: message.into(),
            detail: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail.push(detail);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// The `[code, message, ...detail]` tuple used in the envelope.
    pub fn tuple(&self) -> Value {
        let mut tuple = vec![Value::from(self.code), Value::from(self.message.clone())];
        tuple.extend(self.detail.iter().cloned());
        Value::Array(tuple)
    }
}

/// Ordered collection of diagnostics from one translation call.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.0.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.0.iter().filter(|d| d.is_warning()).count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.is_warning())
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
