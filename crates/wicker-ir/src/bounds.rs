//! Inclusive min/max boundaries and the distance constraints built on them.

use serde_json::Value;

use crate::doc::{Doc, put_str, tagged};
use crate::error::IrError;

/// Sentinel for an unset bound. Only `max` may legitimately be unset.
pub const UNSET: i32 = -1;

/// An inclusive numeric range used for repetition counts and distances.
///
/// `min` is always set and non-negative; `max == UNSET` means unbounded
/// above. When both bounds are set, `min <= max` holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    min: i32,
    max: i32,
}

impl Boundary {
    /// Boundary with both ends set: `min..=max`.
    pub fn closed(min: i32, max: i32) -> Result<Self, IrError> {
        if min < 0 {
            return Err(IrError::MissingMin(min));
        }
        if max != UNSET && max < min {
            return Err(IrError::InvertedBoundary { min, max });
        }
        Ok(Self { min, max })
    }

    /// Boundary unbounded above: `min..`.
    pub fn at_least(min: i32) -> Result<Self, IrError> {
        Self::closed(min, UNSET)
    }

    /// Boundary `0..`, matching any count.
    pub fn unbounded() -> Self {
        Self { min: 0, max: UNSET }
    }

    /// Boundary matching exactly `n`.
    pub fn exact(n: i32) -> Result<Self, IrError> {
        Self::closed(n, n)
    }

    /// Parse a repetition quantifier spelling.
    ///
    /// Accepts `*`, `+`, `?`, `{m}`, `{m,}`, and `{m,n}`.
    pub fn from_quantifier(text: &str) -> Result<Self, IrError> {
        match text {
            "*" => return Self::at_least(0),
            "+" => return Self::at_least(1),
            "?" => return Self::closed(0, 1),
            _ => {}
        }
        let inner = text
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .ok_or_else(|| IrError::BadQuantifier(text.into()))?;
        let bad = || IrError::BadQuantifier(text.into());
        match inner.split_once(',') {
            None => {
                let n: i32 = inner.trim().parse().map_err(|_| bad())?;
                Self::exact(n)
            }
            Some((lo, hi)) => {
                let min: i32 = lo.trim().parse().map_err(|_| bad())?;
                if hi.trim().is_empty() {
                    Self::at_least(min)
                } else {
                    let max: i32 = hi.trim().parse().map_err(|_| bad())?;
                    Self::closed(min, max)
                }
            }
        }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    /// `None` when unbounded above.
    pub fn max(&self) -> Option<i32> {
        (self.max != UNSET).then_some(self.max)
    }

    pub fn doc(&self) -> Doc {
        let mut doc = tagged("ir:boundary");
        doc.insert("min".into(), Value::from(self.min));
        if let Some(max) = self.max() {
            doc.insert("max".into(), Value::from(max));
        }
        doc
    }
}

/// Annotation layer the default distance is measured over (word distance).
pub const WORD_DISTANCE: &str = "w";

/// A distance constraint: the layer distance is measured over plus a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distance {
    pub key: String,
    pub boundary: Boundary,
}

impl Distance {
    pub fn new(key: impl Into<String>, boundary: Boundary) -> Self {
        Self {
            key: key.into(),
            boundary,
        }
    }

    /// Distance over the default word layer.
    pub fn words(boundary: Boundary) -> Self {
        Self::new(WORD_DISTANCE, boundary)
    }

    pub fn doc(&self) -> Doc {
        let mut doc = tagged("ir:distance");
        put_str(&mut doc, "key", &self.key);
        doc.insert("boundary".into(), Value::Object(self.boundary.doc()));
        doc
    }
}
