pub mod aggregate;
pub mod band;
pub mod classify;
pub mod simulate;

use crate::error::{Result, StarcutError};
use crate::feed::DataSet;
use crate::types::measure::Measure;
use crate::types::rating::{AggregateResult, RatingResult};
use self::aggregate::WeightedRating;
use self::simulate::MeasureInput;

/// Rate one entity for one star year: classify every performance cell,
/// describe its band, flag adjustments, then fold the ratings into the
/// weighted overall.
pub fn rate_entity(
    data: &DataSet,
    entity_id: &str,
    year: i32,
) -> Result<(Vec<RatingResult>, AggregateResult)> {
    let records = data
        .performance
        .get(entity_id)
        .ok_or_else(|| StarcutError::UnknownEntity(entity_id.to_string()))?;

    let mut results = Vec::new();
    for record in records.iter().filter(|record| record.year == year) {
        let measure = data
            .measure(&record.measure_key)
            .ok_or_else(|| StarcutError::UnknownMeasure(record.measure_key.clone()))?;
        let cuts = data.cutpoints_for(&record.measure_key, year);

        let (rating, adjusted, defaulted) = match (record.assigned_rating, record.value) {
            // Externally assigned rating wins; the raw value only
            // decides whether the assignment was an adjustment.
            (Some(assigned), Some(value)) => (
                Some(assigned),
                band::is_adjusted(value, assigned, cuts, measure.lower_is_better),
                false,
            ),
            (Some(assigned), None) => (Some(assigned), false, false),
            (None, Some(value)) => {
                let classified = classify::classify(value, cuts, measure.lower_is_better);
                (Some(classified.stars), false, classified.defaulted)
            }
            // No data: no rating, never a default.
            (None, None) => (None, false, false),
        };

        let band_range = match (rating, cuts) {
            (Some(rating), Some(cuts)) => band::band_range(rating, cuts, measure.lower_is_better),
            (Some(_), None) => band::NO_BAND.to_string(),
            (None, _) => "no data".to_string(),
        };

        let band_position = match (rating, record.value, cuts) {
            (Some(rating), Some(value), Some(cuts)) => {
                band::band_position(value, rating, cuts, measure.lower_is_better)
            }
            _ => None,
        };

        results.push(RatingResult {
            measure_key: record.measure_key.clone(),
            year,
            rating,
            band_range,
            adjusted,
            defaulted,
            band_position,
            weight: effective_weight(measure, year),
            discontinued: measure.discontinued_in(year),
        });
    }

    results.sort_by(|a, b| a.measure_key.cmp(&b.measure_key));

    let inputs: Vec<WeightedRating> = results
        .iter()
        .map(|result| WeightedRating {
            measure_key: result.measure_key.clone(),
            rating: result.rating,
            weight: result.weight,
        })
        .collect();
    let aggregate = aggregate::aggregate(&inputs)?;

    Ok((results, aggregate))
}

/// Rebuild the per-measure simulator inputs from rated results, pairing
/// each measure with its own cutpoints and direction.
pub fn simulation_inputs(data: &DataSet, results: &[RatingResult], year: i32) -> Vec<MeasureInput> {
    results
        .iter()
        .map(|result| {
            let lower_is_better = data
                .measure(&result.measure_key)
                .map(|measure| measure.lower_is_better)
                .unwrap_or(false);
            MeasureInput {
                measure_key: result.measure_key.clone(),
                actual_rating: result.rating,
                weight: result.weight,
                lower_is_better,
                cutpoints: data.cutpoints_for(&result.measure_key, year).cloned(),
            }
        })
        .collect()
}

/// A measure discontinued for the year still counts with weight 1 when
/// it carries a rating; the published weight applies otherwise.
fn effective_weight(measure: &Measure, year: i32) -> f64 {
    measure.weight_for(year).unwrap_or(1.0)
}
