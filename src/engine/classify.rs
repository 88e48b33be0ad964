use crate::types::measure::CutpointSet;

/// Default issued when a measure has no published cutpoints at all:
/// insufficient information to classify, treat as neutral.
pub const DEFAULT_STARS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub stars: u8,
    /// True when `stars` is the neutral default for missing cutpoints
    /// rather than a threshold comparison result.
    pub defaulted: bool,
}

/// Map a raw metric value to a 1-5 star rating against a measure's
/// published thresholds.
///
/// Thresholds are evaluated best tier first and are inclusive at the
/// boundary favoring the higher rating: a value exactly equal to
/// `cut_5` earns 5 stars in either direction. A `None` threshold is
/// unreachable and its comparison is skipped. Callers filter null
/// values upstream; this function only sees concrete numbers.
pub fn classify(value: f64, cuts: Option<&CutpointSet>, lower_is_better: bool) -> Classified {
    let cuts = match cuts {
        Some(cuts) if !cuts.is_empty() => cuts,
        _ => {
            return Classified {
                stars: DEFAULT_STARS,
                defaulted: true,
            }
        }
    };

    for (stars, threshold) in cuts.tiers_best_first() {
        let Some(threshold) = threshold else {
            continue;
        };
        let earned = if lower_is_better {
            value <= threshold
        } else {
            value >= threshold
        };
        if earned {
            return Classified {
                stars,
                defaulted: false,
            };
        }
    }

    Classified {
        stars: 1,
        defaulted: false,
    }
}
