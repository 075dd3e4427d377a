//! Size-based relabeling of the size-ambiguous class.
//!
//! The detector reports one class for two physically different items. Within
//! a single photo the two sizes separate cleanly by box area, so the largest
//! relative jump between consecutive sorted areas marks the boundary. When no
//! jump is large enough, every box is treated as the same physical size and
//! the detector's own labels decide which one by majority.

use crate::config::FilterConfig;
use crate::constants::thresholds::AREA_EPSILON;
use crate::inventory::detection::{by_area_desc, by_confidence_desc};
use crate::inventory::{Detection, SizeClass, SizeGroup};
use tracing::debug;

/// How the sub-classes were assigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitMethod {
    /// Nothing passed the confidence gate.
    NoneTrusted,
    /// A size gap at or above the threshold separated the two sizes.
    SizeGap {
        /// Index of the last large item in area-descending order.
        split_index: usize,
        /// Area ratio across the boundary.
        ratio: f64,
    },
    /// No gap; all items share the label that won the vote.
    MajorityVote {
        /// Winning sub-class.
        winner: SizeClass,
    },
}

/// Output of [`SizeSubclassifier::classify`].
#[derive(Debug, Clone)]
pub struct SizeSplit {
    /// Kept large items followed by kept small items.
    pub detections: Vec<Detection>,
    /// Branch taken.
    pub method: SplitMethod,
}

/// Largest area ratio between consecutive items.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Gap {
    index: usize,
    ratio: f64,
}

/// Relabels size-ambiguous detections into large and small sub-classes.
#[derive(Debug, Clone, Copy)]
pub struct SizeSubclassifier<'a> {
    group: &'a SizeGroup,
    high_confidence: f32,
    gap_ratio: f64,
    cap: usize,
}

impl<'a> SizeSubclassifier<'a> {
    /// Create a subclassifier for `group` using the configured thresholds.
    pub fn new(group: &'a SizeGroup, filter: &FilterConfig) -> Self {
        Self {
            group,
            high_confidence: filter.high_confidence,
            gap_ratio: filter.size_gap_ratio,
            cap: filter.max_per_subclass,
        }
    }

    /// Assign every trusted detection to a sub-class and cap each side.
    ///
    /// Input detections must all carry one of the group's labels.
    pub fn classify(&self, detections: Vec<Detection>) -> SizeSplit {
        let mut trusted: Vec<Detection> = detections
            .into_iter()
            .filter(|d| d.confidence() >= self.high_confidence)
            .collect();

        if trusted.is_empty() {
            return SizeSplit {
                detections: Vec::new(),
                method: SplitMethod::NoneTrusted,
            };
        }

        trusted.sort_by(by_area_desc);

        let (mut large, mut small, method) = match largest_gap(&trusted) {
            Some(gap) if gap.ratio >= self.gap_ratio => {
                let (mut large, mut small) = self.split_at_gap(trusted, gap.index);
                self.rebalance(&mut large, &mut small);
                (
                    large,
                    small,
                    SplitMethod::SizeGap {
                        split_index: gap.index,
                        ratio: gap.ratio,
                    },
                )
            }
            _ => {
                let winner = self.majority_label(&trusted);
                let label = self.group.label(winner);
                let relabeled: Vec<Detection> =
                    trusted.into_iter().map(|d| d.relabel(label)).collect();
                let method = SplitMethod::MajorityVote { winner };
                match winner {
                    SizeClass::Large => (relabeled, Vec::new(), method),
                    SizeClass::Small => (Vec::new(), relabeled, method),
                }
            }
        };

        debug!(
            "Size split: {:?} -> {} large, {} small before cap",
            method,
            large.len(),
            small.len()
        );

        self.cap_by_confidence(&mut large);
        self.cap_by_confidence(&mut small);
        large.append(&mut small);

        SizeSplit {
            detections: large,
            method,
        }
    }

    /// Relabel area-sorted items: up to and including `index` are large.
    fn split_at_gap(
        &self,
        sorted: Vec<Detection>,
        index: usize,
    ) -> (Vec<Detection>, Vec<Detection>) {
        let mut large = Vec::with_capacity(index + 1);
        let mut small = Vec::with_capacity(sorted.len().saturating_sub(index + 1));
        for (i, d) in sorted.into_iter().enumerate() {
            if i <= index {
                large.push(d.relabel(&self.group.large));
            } else {
                small.push(d.relabel(&self.group.small));
            }
        }
        (large, small)
    }

    /// Move boundary items across until neither side overflows into a short one.
    ///
    /// Both groups are area-descending. Each iteration moves exactly one item,
    /// so the loops run at most `large.len() + small.len()` times.
    fn rebalance(&self, large: &mut Vec<Detection>, small: &mut Vec<Detection>) {
        while large.len() > self.cap && small.len() < self.cap {
            let Some(d) = large.pop() else { break };
            small.insert(0, d.relabel(&self.group.small));
        }

        while small.len() > self.cap && large.len() < self.cap {
            let d = small.remove(0);
            large.push(d.relabel(&self.group.large));
        }
    }

    /// Sub-class that wins a vote over the detector's original labels.
    ///
    /// Ties go to the side with the larger mean area; equal means favor large.
    fn majority_label(&self, detections: &[Detection]) -> SizeClass {
        let (large, small): (Vec<&Detection>, Vec<&Detection>) = detections
            .iter()
            .partition(|d| self.group.size_class(d.class_label()) == Some(SizeClass::Large));

        match large.len().cmp(&small.len()) {
            std::cmp::Ordering::Greater => SizeClass::Large,
            std::cmp::Ordering::Less => SizeClass::Small,
            std::cmp::Ordering::Equal => {
                if mean_area(&large) >= mean_area(&small) {
                    SizeClass::Large
                } else {
                    SizeClass::Small
                }
            }
        }
    }

    fn cap_by_confidence(&self, group: &mut Vec<Detection>) {
        group.sort_by(by_confidence_desc);
        group.truncate(self.cap);
    }
}

/// Find the largest ratio between consecutive areas of an area-descending list.
///
/// The first occurrence wins ties. Returns `None` for fewer than two items or
/// when every ratio is zero.
fn largest_gap(sorted: &[Detection]) -> Option<Gap> {
    let mut best: Option<Gap> = None;

    for (index, pair) in sorted.windows(2).enumerate() {
        let denom = if pair[1].area() > 0.0 {
            pair[1].area()
        } else {
            AREA_EPSILON
        };
        let ratio = pair[0].area() / denom;
        if ratio > best.map_or(0.0, |g| g.ratio) {
            best = Some(Gap { index, ratio });
        }
    }

    best
}

#[allow(clippy::cast_precision_loss)]
fn mean_area(detections: &[&Detection]) -> f64 {
    if detections.is_empty() {
        return 0.0;
    }
    detections.iter().map(|d| d.area()).sum::<f64>() / detections.len() as f64
}
