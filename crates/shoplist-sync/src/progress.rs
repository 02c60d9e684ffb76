//! Progress Aggregator
//!
//! Purchased/total percentage derived from the current item collection.
//! Nothing here is stored; every call recomputes from its input.

use crate::models::Item;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub purchased: usize,
    /// Unrounded, clamped to [0, 100]
    pub percentage: f64,
}

/// CSS for the three-segment track (filled / gap / unfilled)
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSegments {
    pub filled_basis: String,
    pub gap_visible: bool,
    pub gap_basis: String,
    pub unfilled_basis: String,
    /// The unfilled segment has zero width
    pub unfilled_empty: bool,
}

impl ProgressSnapshot {
    pub fn compute<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let (total, purchased) = items
            .into_iter()
            .fold((0usize, 0usize), |(t, p), item| (t + 1, p + usize::from(item.purchased)));
        Self::from_counts(total, purchased)
    }

    pub fn from_counts(total: usize, purchased: usize) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            (100.0 * purchased as f64 / total as f64).clamp(0.0, 100.0)
        };
        Self {
            total,
            purchased,
            percentage,
        }
    }

    /// Integer shown in the label and `aria-valuenow`
    pub fn rounded(&self) -> u8 {
        self.percentage.round() as u8
    }

    pub fn label(&self) -> String {
        format!("{}%", self.rounded())
    }

    /// The gap divider is hidden at both ends so it never dangles.
    pub fn segments(&self, gap_px: u32) -> ProgressSegments {
        let p = self.percentage;
        if p >= 100.0 {
            ProgressSegments {
                filled_basis: "100%".to_string(),
                gap_visible: false,
                gap_basis: "0px".to_string(),
                unfilled_basis: "0%".to_string(),
                unfilled_empty: true,
            }
        } else if p <= 0.0 {
            ProgressSegments {
                filled_basis: "0%".to_string(),
                gap_visible: false,
                gap_basis: "0px".to_string(),
                unfilled_basis: "100%".to_string(),
                unfilled_empty: false,
            }
        } else {
            ProgressSegments {
                filled_basis: format!("{p}%"),
                gap_visible: true,
                gap_basis: format!("{gap_px}px"),
                unfilled_basis: format!("calc(100% - {p}% - {gap_px}px)"),
                unfilled_empty: false,
            }
        }
    }
}
