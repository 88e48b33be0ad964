use crate::error::{Result, StarcutError};
use crate::types::rating::AggregateResult;

/// One measure's contribution to an overall rating.
#[derive(Debug, Clone)]
pub struct WeightedRating {
    pub measure_key: String,
    /// `None` means no data; the entry is excluded from both numerator
    /// and denominator, never counted as zero.
    pub rating: Option<u8>,
    /// Weight 0 means published but excluded from the overall (the
    /// MA-PD double-counting rule); negative or non-finite weights are
    /// invalid input.
    pub weight: f64,
}

/// Combine per-measure ratings into the enrollment/measure-weighted
/// overall score and its statutory half-star display value.
///
/// Inputs are summed in measure_key order regardless of how the caller
/// ordered them, so the floating-point result is reproducible
/// bit-for-bit across call sites.
pub fn aggregate(inputs: &[WeightedRating]) -> Result<AggregateResult> {
    for input in inputs {
        if let Some(rating) = input.rating {
            if !(1..=5).contains(&rating) {
                return Err(StarcutError::RatingOutOfRange {
                    measure_key: input.measure_key.clone(),
                    rating,
                });
            }
        }
        if !input.weight.is_finite() || input.weight < 0.0 {
            return Err(StarcutError::InvalidWeight {
                measure_key: input.measure_key.clone(),
                weight: input.weight,
            });
        }
    }

    let mut ordered: Vec<&WeightedRating> = inputs.iter().collect();
    ordered.sort_by(|a, b| a.measure_key.cmp(&b.measure_key));

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for input in ordered {
        let Some(rating) = input.rating else {
            continue;
        };
        if input.weight == 0.0 {
            continue;
        }
        weighted_sum += f64::from(rating) * input.weight;
        total_weight += input.weight;
    }

    if total_weight == 0.0 {
        return Ok(AggregateResult {
            overall_weighted_score: None,
            overall_half_star: None,
            total_weight: 0.0,
        });
    }

    let score = weighted_sum / total_weight;
    Ok(AggregateResult {
        overall_weighted_score: Some(score),
        overall_half_star: Some(round_half_star(score)),
        total_weight,
    })
}

/// Round to the nearest 0.5 using round-half-away-from-zero, the
/// statutory display rule.
pub fn round_half_star(score: f64) -> f64 {
    (score * 2.0).round() / 2.0
}
