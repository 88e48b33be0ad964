use crate::engine::classify;
use crate::types::measure::CutpointSet;
use crate::types::rating::BandPosition;

pub const NO_BAND: &str = "no band published";

/// Human-readable value range a rating occupies, consistent with the
/// inclusive-at-best-tier rule: for higher-is-better, rating 4 is
/// `[cut_4, cut_5)` rendered as "≥cut_4% to <cut_5%", rating 5 is
/// "≥cut_5%". Lower-is-better flips the directions. A tier whose own
/// threshold is unpublished has no band.
pub fn band_range(rating: u8, cuts: &CutpointSet, lower_is_better: bool) -> String {
    if cuts.is_empty() {
        return NO_BAND.to_string();
    }

    let own = threshold_for(rating, cuts);
    let better = next_better_threshold(rating, cuts);

    if rating == 1 {
        // Rating 1 has no threshold of its own; it is bounded by the
        // lowest published tier.
        return match lowest_published(cuts) {
            Some(bound) if lower_is_better => format!(">{}%", fmt(bound)),
            Some(bound) => format!("<{}%", fmt(bound)),
            None => NO_BAND.to_string(),
        };
    }

    let Some(own) = own else {
        return NO_BAND.to_string();
    };

    match (lower_is_better, better) {
        (false, Some(upper)) => format!("≥{}% to <{}%", fmt(own), fmt(upper)),
        (false, None) => format!("≥{}%", fmt(own)),
        (true, Some(upper)) => format!(">{}% to ≤{}%", fmt(upper), fmt(own)),
        (true, None) => format!("≤{}%", fmt(own)),
    }
}

/// True when the assigned rating is not what the raw value alone would
/// produce, i.e. an external statistical-adjustment process intervened.
/// Flags the mismatch only; never explains it.
pub fn is_adjusted(
    value: f64,
    assigned_rating: u8,
    cuts: Option<&CutpointSet>,
    lower_is_better: bool,
) -> bool {
    classify::classify(value, cuts, lower_is_better).stars != assigned_rating
}

/// Position of the value within its assigned rating's band, by thirds.
/// The "top" of a band is always its best end: the high end for
/// higher-is-better measures, the low end for lower-is-better ones.
/// Unbounded ends fall back to the 0-100 percentage scale.
pub fn band_position(
    value: f64,
    rating: u8,
    cuts: &CutpointSet,
    lower_is_better: bool,
) -> Option<BandPosition> {
    if cuts.is_empty() {
        return None;
    }

    let (band_low, band_high) = if lower_is_better {
        match rating {
            5 => (0.0, cuts.cut_5.unwrap_or(100.0)),
            4 => (cuts.cut_5.unwrap_or(0.0), cuts.cut_4.unwrap_or(100.0)),
            3 => (cuts.cut_4.unwrap_or(0.0), cuts.cut_3.unwrap_or(100.0)),
            2 => (cuts.cut_3.unwrap_or(0.0), cuts.cut_2.unwrap_or(100.0)),
            1 => (cuts.cut_2.unwrap_or(0.0), 100.0),
            _ => return None,
        }
    } else {
        match rating {
            5 => (cuts.cut_5.unwrap_or(0.0), 100.0),
            4 => (cuts.cut_4.unwrap_or(0.0), cuts.cut_5.unwrap_or(100.0)),
            3 => (cuts.cut_3.unwrap_or(0.0), cuts.cut_4.unwrap_or(100.0)),
            2 => (cuts.cut_2.unwrap_or(0.0), cuts.cut_3.unwrap_or(100.0)),
            1 => (0.0, cuts.cut_2.unwrap_or(100.0)),
            _ => return None,
        }
    };

    let range = band_high - band_low;
    if range == 0.0 {
        return None;
    }

    let position = if lower_is_better {
        (band_high - value) / range
    } else {
        (value - band_low) / range
    };
    let position = position.clamp(0.0, 1.0);

    Some(if position >= 0.67 {
        BandPosition::Top
    } else if position >= 0.33 {
        BandPosition::Middle
    } else {
        BandPosition::Bottom
    })
}

fn threshold_for(rating: u8, cuts: &CutpointSet) -> Option<f64> {
    match rating {
        5 => cuts.cut_5,
        4 => cuts.cut_4,
        3 => cuts.cut_3,
        2 => cuts.cut_2,
        _ => None,
    }
}

/// The next published threshold above `rating`, skipping unreachable
/// tiers the same way the classifier does.
fn next_better_threshold(rating: u8, cuts: &CutpointSet) -> Option<f64> {
    ((rating + 1)..=5).find_map(|tier| threshold_for(tier, cuts))
}

fn lowest_published(cuts: &CutpointSet) -> Option<f64> {
    (2..=5).find_map(|tier| threshold_for(tier, cuts))
}

fn fmt(value: f64) -> String {
    // 80.0 renders as "80", 83.5 as "83.5".
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cuts() -> CutpointSet {
        CutpointSet {
            measure_key: "m".to_string(),
            year: 2026,
            cut_2: Some(60.0),
            cut_3: Some(70.0),
            cut_4: Some(80.0),
            cut_5: Some(90.0),
        }
    }

    fn lower_cuts() -> CutpointSet {
        CutpointSet {
            measure_key: "complaints".to_string(),
            year: 2026,
            cut_2: Some(9.0),
            cut_3: Some(7.0),
            cut_4: Some(5.0),
            cut_5: Some(3.0),
        }
    }

    #[test]
    fn higher_is_better_bands_are_half_open_upward() {
        let cuts = cuts();
        assert_eq!(band_range(5, &cuts, false), "≥90%");
        assert_eq!(band_range(4, &cuts, false), "≥80% to <90%");
        assert_eq!(band_range(3, &cuts, false), "≥70% to <80%");
        assert_eq!(band_range(2, &cuts, false), "≥60% to <70%");
        assert_eq!(band_range(1, &cuts, false), "<60%");
    }

    #[test]
    fn lower_is_better_bands_flip_direction() {
        let cuts = lower_cuts();
        assert_eq!(band_range(5, &cuts, true), "≤3%");
        assert_eq!(band_range(4, &cuts, true), ">3% to ≤5%");
        assert_eq!(band_range(1, &cuts, true), ">9%");
    }

    #[test]
    fn unpublished_top_tier_leaves_next_band_unbounded() {
        let mut cuts = cuts();
        cuts.cut_5 = None;
        assert_eq!(band_range(5, &cuts, false), NO_BAND);
        assert_eq!(band_range(4, &cuts, false), "≥80%");
    }

    #[test]
    fn empty_cutpoints_have_no_bands() {
        let cuts = CutpointSet {
            measure_key: "m".to_string(),
            year: 2026,
            cut_2: None,
            cut_3: None,
            cut_4: None,
            cut_5: None,
        };
        assert_eq!(band_range(4, &cuts, false), NO_BAND);
        assert_eq!(band_range(1, &cuts, false), NO_BAND);
    }

    #[test]
    fn fractional_thresholds_render_without_padding() {
        let cuts = CutpointSet {
            measure_key: "m".to_string(),
            year: 2026,
            cut_2: Some(62.5),
            cut_3: Some(71.0),
            cut_4: Some(83.5),
            cut_5: Some(91.0),
        };
        assert_eq!(band_range(4, &cuts, false), "≥83.5% to <91%");
    }

    #[test]
    fn adjustment_flag_fires_only_on_mismatch() {
        let cuts = cuts();
        // Value 88 naturally earns 4; an externally assigned 5 is an
        // adjustment, an assigned 4 is not.
        assert!(is_adjusted(88.0, 5, Some(&cuts), false));
        assert!(!is_adjusted(88.0, 4, Some(&cuts), false));
        // Exact boundary earns the higher tier naturally.
        assert!(!is_adjusted(90.0, 5, Some(&cuts), false));
    }

    #[test]
    fn adjustment_against_missing_cutpoints_compares_to_default() {
        assert!(!is_adjusted(42.0, 3, None, false));
        assert!(is_adjusted(42.0, 5, None, false));
    }

    #[test]
    fn band_position_thirds_for_higher_is_better() {
        let cuts = cuts();
        // Rating 4 band is [80, 90).
        assert_eq!(
            band_position(89.0, 4, &cuts, false),
            Some(BandPosition::Top)
        );
        assert_eq!(
            band_position(85.0, 4, &cuts, false),
            Some(BandPosition::Middle)
        );
        assert_eq!(
            band_position(80.5, 4, &cuts, false),
            Some(BandPosition::Bottom)
        );
    }

    #[test]
    fn band_position_top_is_the_low_end_when_lower_is_better() {
        let cuts = lower_cuts();
        // Rating 4 band is (3, 5]; a value near 3 is the best end.
        assert_eq!(band_position(3.2, 4, &cuts, true), Some(BandPosition::Top));
        assert_eq!(
            band_position(4.9, 4, &cuts, true),
            Some(BandPosition::Bottom)
        );
    }

    #[test]
    fn band_position_clamps_values_outside_the_band() {
        let cuts = cuts();
        // An adjusted rating can sit outside its band; the position
        // clamps rather than extrapolating.
        assert_eq!(
            band_position(99.0, 4, &cuts, false),
            Some(BandPosition::Top)
        );
        assert_eq!(
            band_position(10.0, 4, &cuts, false),
            Some(BandPosition::Bottom)
        );
    }

    #[test]
    fn degenerate_band_has_no_position() {
        let cuts = CutpointSet {
            measure_key: "m".to_string(),
            year: 2026,
            cut_2: Some(60.0),
            cut_3: Some(70.0),
            cut_4: Some(80.0),
            cut_5: Some(80.0),
        };
        assert_eq!(band_position(80.0, 4, &cuts, false), None);
    }
}
