//! Bill of materials.
//!
//! Fittings are counted by kind and size label: two DN20 tees are one line
//! with quantity 2, a DN20 and a DN25 tee are two lines.

use std::fmt::Write;

use pipe_fittings::FittingKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Structured part list of an assembly.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BillOfMaterials {
    /// One line per kind and size, sorted by kind then label.
    pub items: Vec<BomItem>,
}

/// One line of a bill of materials.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BomItem {
    /// Fitting kind.
    pub kind: FittingKind,
    /// Size label.
    pub label: String,
    /// How many.
    pub quantity: usize,
    /// IDs of the counted fittings, in placement order.
    pub ids: Vec<String>,
}

impl BillOfMaterials {
    /// Total fitting count (sum of all quantities).
    #[must_use]
    pub fn total_parts(&self) -> usize {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// The line for `kind` in size `label`.
    #[must_use]
    pub fn get(&self, kind: FittingKind, label: &str) -> Option<&BomItem> {
        self.items
            .iter()
            .find(|i| i.kind == kind && i.label == label)
    }

    /// Render as CSV with a header row.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::from("Kind,Size,Quantity,IDs\n");
        for item in &self.items {
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "{},{},{},{}",
                item.kind,
                escape_csv(&item.label),
                item.quantity,
                escape_csv(&item.ids.join(" "))
            );
        }
        out
    }
}

/// Escape special characters for CSV.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
