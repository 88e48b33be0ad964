use crate::engine::aggregate::{aggregate, WeightedRating};
use crate::engine::classify::classify;
use crate::error::{Result, StarcutError};
use crate::types::measure::CutpointSet;
use crate::types::rating::{MeasureDelta, Simulation, SimulationReport};
use std::collections::BTreeMap;

/// Everything the simulator needs to rate one measure in both passes.
#[derive(Debug, Clone)]
pub struct MeasureInput {
    pub measure_key: String,
    pub actual_rating: Option<u8>,
    pub weight: f64,
    pub lower_is_better: bool,
    pub cutpoints: Option<CutpointSet>,
}

/// Run the actual and what-if aggregation passes.
///
/// An override replaces a measure's rating for the simulated pass only,
/// reclassifying the hypothetical value against that measure's own
/// cutpoints and direction. An override is withdrawn by removing its
/// key from the map; an empty map means no simulation was requested at
/// all, which is a distinct outcome from a simulation that happens to
/// match the actual result.
pub fn simulate(
    inputs: &[MeasureInput],
    overrides: &BTreeMap<String, f64>,
) -> Result<Simulation> {
    if overrides.is_empty() {
        return Ok(Simulation::NotRequested);
    }

    for key in overrides.keys() {
        if !inputs.iter().any(|input| &input.measure_key == key) {
            return Err(StarcutError::UnknownMeasure(key.clone()));
        }
    }

    let actual_inputs: Vec<WeightedRating> = inputs
        .iter()
        .map(|input| WeightedRating {
            measure_key: input.measure_key.clone(),
            rating: input.actual_rating,
            weight: input.weight,
        })
        .collect();

    let mut per_measure = Vec::new();
    let simulated_inputs: Vec<WeightedRating> = inputs
        .iter()
        .map(|input| {
            let rating = match overrides.get(&input.measure_key) {
                Some(&value) => {
                    let simulated =
                        classify(value, input.cutpoints.as_ref(), input.lower_is_better).stars;
                    per_measure.push(MeasureDelta {
                        measure_key: input.measure_key.clone(),
                        actual_rating: input.actual_rating,
                        simulated_rating: Some(simulated),
                        delta: input
                            .actual_rating
                            .map(|actual| simulated as i8 - actual as i8),
                    });
                    Some(simulated)
                }
                None => input.actual_rating,
            };
            WeightedRating {
                measure_key: input.measure_key.clone(),
                rating,
                weight: input.weight,
            }
        })
        .collect();

    let actual = aggregate(&actual_inputs)?;
    let simulated = aggregate(&simulated_inputs)?;
    let overall_delta = match (simulated.overall_half_star, actual.overall_half_star) {
        (Some(simulated), Some(actual)) => Some(simulated - actual),
        _ => None,
    };

    Ok(Simulation::Simulated(SimulationReport {
        actual,
        simulated,
        per_measure,
        overall_delta,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cuts(key: &str) -> CutpointSet {
        CutpointSet {
            measure_key: key.to_string(),
            year: 2026,
            cut_2: Some(60.0),
            cut_3: Some(70.0),
            cut_4: Some(80.0),
            cut_5: Some(90.0),
        }
    }

    fn input(key: &str, rating: Option<u8>, weight: f64) -> MeasureInput {
        MeasureInput {
            measure_key: key.to_string(),
            actual_rating: rating,
            weight,
            lower_is_better: false,
            cutpoints: Some(cuts(key)),
        }
    }

    #[test]
    fn empty_override_map_means_no_simulation() {
        let inputs = [input("a", Some(4), 1.0)];
        let outcome = simulate(&inputs, &BTreeMap::new()).expect("simulate should succeed");
        assert!(matches!(outcome, Simulation::NotRequested));
    }

    #[test]
    fn override_equal_to_actual_band_reports_zero_delta() {
        let inputs = [input("a", Some(4), 1.0), input("b", Some(3), 1.0)];
        let overrides = BTreeMap::from([("a".to_string(), 85.0)]);

        let outcome = simulate(&inputs, &overrides).expect("simulate should succeed");
        let Simulation::Simulated(report) = outcome else {
            panic!("override map was non-empty, simulation expected");
        };
        assert_eq!(report.per_measure.len(), 1);
        assert_eq!(report.per_measure[0].delta, Some(0));
        assert_eq!(report.overall_delta, Some(0.0));
        assert_eq!(
            report.actual.overall_half_star,
            report.simulated.overall_half_star
        );
    }

    #[test]
    fn override_reclassifies_with_the_measures_own_cutpoints() {
        let mut lower = input("complaints", Some(2), 1.0);
        lower.lower_is_better = true;
        lower.cutpoints = Some(CutpointSet {
            measure_key: "complaints".to_string(),
            year: 2026,
            cut_2: Some(9.0),
            cut_3: Some(7.0),
            cut_4: Some(5.0),
            cut_5: Some(3.0),
        });
        let inputs = [lower, input("screening", Some(4), 1.0)];
        let overrides = BTreeMap::from([("complaints".to_string(), 2.5)]);

        let Simulation::Simulated(report) =
            simulate(&inputs, &overrides).expect("simulate should succeed")
        else {
            panic!("simulation expected");
        };
        assert_eq!(report.per_measure[0].simulated_rating, Some(5));
        assert_eq!(report.per_measure[0].delta, Some(3));
        // actual (2+4)/2 = 3.0, simulated (5+4)/2 = 4.5
        assert_eq!(report.actual.overall_half_star, Some(3.0));
        assert_eq!(report.simulated.overall_half_star, Some(4.5));
        assert_eq!(report.overall_delta, Some(1.5));
    }

    #[test]
    fn measures_without_overrides_keep_their_actual_rating() {
        let inputs = [input("a", Some(2), 1.0), input("b", Some(5), 1.0)];
        let overrides = BTreeMap::from([("a".to_string(), 95.0)]);

        let Simulation::Simulated(report) =
            simulate(&inputs, &overrides).expect("simulate should succeed")
        else {
            panic!("simulation expected");
        };
        // Only the overridden measure appears in the delta list.
        assert_eq!(report.per_measure.len(), 1);
        assert_eq!(report.per_measure[0].measure_key, "a");
        // actual (2+5)/2 = 3.5, simulated (5+5)/2 = 5.0
        assert_eq!(report.simulated.overall_half_star, Some(5.0));
    }

    #[test]
    fn overriding_an_unrated_measure_gives_it_a_rating_but_no_delta() {
        let inputs = [input("a", None, 1.0), input("b", Some(4), 1.0)];
        let overrides = BTreeMap::from([("a".to_string(), 92.0)]);

        let Simulation::Simulated(report) =
            simulate(&inputs, &overrides).expect("simulate should succeed")
        else {
            panic!("simulation expected");
        };
        assert_eq!(report.per_measure[0].simulated_rating, Some(5));
        assert_eq!(report.per_measure[0].delta, None);
        // actual: only b counts → 4.0; simulated: (5+4)/2 = 4.5
        assert_eq!(report.actual.overall_half_star, Some(4.0));
        assert_eq!(report.simulated.overall_half_star, Some(4.5));
    }

    #[test]
    fn unknown_override_key_is_an_error() {
        let inputs = [input("a", Some(4), 1.0)];
        let overrides = BTreeMap::from([("nonexistent".to_string(), 50.0)]);

        let err = simulate(&inputs, &overrides).expect_err("unknown key should fail");
        assert!(matches!(err, StarcutError::UnknownMeasure(_)));
    }

    #[test]
    fn all_null_actuals_leave_overall_delta_undefined() {
        let inputs = [input("a", None, 1.0)];
        let overrides = BTreeMap::from([("a".to_string(), 75.0)]);

        let Simulation::Simulated(report) =
            simulate(&inputs, &overrides).expect("simulate should succeed")
        else {
            panic!("simulation expected");
        };
        assert_eq!(report.actual.overall_half_star, None);
        assert_eq!(report.simulated.overall_half_star, Some(3.0));
        assert_eq!(report.overall_delta, None);
    }
}
