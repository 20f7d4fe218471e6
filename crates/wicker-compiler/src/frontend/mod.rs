//! Language frontends: raw query text to IR (directly, or via the
//! constraint graph and the graph-to-tree compiler).
//!
//! - `graph` - the graph-constraint language (numbered nodes + edges)
//! - `terms` - the boolean-term language (direct mapping, no planner)

pub mod graph;
pub mod terms;

#[cfg(test)]
mod terms_tests;

/// Source language of a query. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryLanguage {
    /// Numbered node declarations plus binary edge constraints.
    GraphConstraint,
    /// Terms combined with `and`/`or`.
    BooleanTerms,
}

/// Source language version. Affects which constraints are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageVersion {
    V1,
    V2,
}

impl LanguageVersion {
    /// Half-open overlap operators and ranged common ancestor arrived in V2.
    pub fn supports_extended_overlap(&self) -> bool {
        matches!(self, LanguageVersion::V2)
    }

    /// Foundry qualifiers on attribute names arrived in V2.
    pub fn supports_qualifiers(&self) -> bool {
        matches!(self, LanguageVersion::V2)
    }
}
