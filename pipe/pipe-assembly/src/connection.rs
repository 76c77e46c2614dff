//! Joins between placed fittings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One fitting anchor, addressed by fitting ID and anchor name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnchorRef {
    /// Fitting ID.
    pub id: String,
    /// Anchor name on that fitting.
    pub anchor: String,
}

impl AnchorRef {
    /// Address `anchor` on fitting `id`.
    #[must_use]
    pub fn new(id: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            anchor: anchor.into(),
        }
    }
}

impl std::fmt::Display for AnchorRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.id, self.anchor)
    }
}

/// A join made by [`Assembly::attach`](crate::Assembly::attach).
///
/// `from` is on the fitting that was moved, `to` on the one it was moved
/// onto.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Connection {
    /// Anchor of the attached fitting.
    pub from: AnchorRef,
    /// Anchor it was attached to.
    pub to: AnchorRef,
    /// Whether the end types and sizes were checked.
    pub checked: bool,
}

impl Connection {
    /// Whether either side of the join is `anchor`.
    #[must_use]
    pub fn involves(&self, anchor: &AnchorRef) -> bool {
        self.from == *anchor || self.to == *anchor
    }

    /// Whether either side of the join is on fitting `id`.
    #[must_use]
    pub fn involves_fitting(&self, id: &str) -> bool {
        self.from.id == id || self.to.id == id
    }
}
