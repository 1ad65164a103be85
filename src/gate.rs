//! Announcement gating
//!
//! Decides whether a diff is worth a comment, based on the total percentage
//! change and two independent thresholds:
//! - increase: growth strictly below it is not announced
//! - decrease: shrinkage strictly below it (in magnitude) is not announced
//!
//! An unset threshold always announces. A zero increase threshold still
//! suppresses a diff of exactly zero.

use crate::diff::DiffEntry;

/// Outcome of the gate
#[derive(Debug, Clone, PartialEq)]
pub enum Announcement {
    /// Post the report
    Publish,
    /// Skip posting, with a human-readable reason
    Suppress(String),
}

impl Announcement {
    /// Whether the report should be posted
    pub fn should_publish(&self) -> bool {
        matches!(self, Self::Publish)
    }
}

/// Percentage thresholds for announcing a change
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnnouncementGate {
    increase: Option<f64>,
    decrease: Option<f64>,
}

impl AnnouncementGate {
    /// Create a gate; a decrease threshold is a magnitude, its sign is ignored
    pub fn new(increase: Option<f64>, decrease: Option<f64>) -> Self {
        Self {
            increase,
            decrease: decrease.map(f64::abs),
        }
    }

    /// Increase threshold in percent
    pub fn increase(&self) -> Option<f64> {
        self.increase
    }

    /// Decrease threshold in percent (magnitude)
    pub fn decrease(&self) -> Option<f64> {
        self.decrease
    }

    /// Evaluate the aggregate change
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_diff::diff::DiffEntry;
    /// use bundle_diff::gate::AnnouncementGate;
    ///
    /// let gate = AnnouncementGate::new(Some(10.0), None);
    /// assert!(!gate.evaluate(&DiffEntry::new("total", 100, 105)).should_publish());
    /// assert!(gate.evaluate(&DiffEntry::new("total", 100, 115)).should_publish());
    /// ```
    pub fn evaluate(&self, total: &DiffEntry) -> Announcement {
        let decision = match total.diff_percentage {
            // growth from nothing is an unbounded increase
            None => Announcement::Publish,
            Some(pct) => self.evaluate_percentage(pct),
        };
        log::debug!(
            "announcement gate: {:?} for {:?} (increase {:?}, decrease {:?})",
            decision,
            total.diff_percentage,
            self.increase,
            self.decrease
        );
        decision
    }

    /// Evaluate a raw percentage change
    pub fn evaluate_percentage(&self, pct: f64) -> Announcement {
        if pct >= 0.0 {
            match self.increase {
                Some(threshold) if pct < threshold || (threshold == 0.0 && pct == 0.0) => {
                    Announcement::Suppress(format!(
                        "increase of {:.2}% is below the {:.2}% announcement threshold",
                        pct, threshold
                    ))
                }
                _ => Announcement::Publish,
            }
        } else {
            match self.decrease {
                Some(threshold) if pct.abs() < threshold => Announcement::Suppress(format!(
                    "decrease of {:.2}% is below the {:.2}% announcement threshold",
                    pct.abs(),
                    threshold
                )),
                _ => Announcement::Publish,
            }
        }
    }
}
