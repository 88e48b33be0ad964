use crate::feed::DataSet;
use crate::types::measure::CutpointSet;
use std::collections::HashSet;

/// A data-quality finding. Blocking findings describe inputs the engine
/// would mishandle (its output stays deterministic but unspecified);
/// warnings describe suspicious but workable data.
#[derive(Debug, Clone)]
pub struct Finding {
    pub id: String,
    pub message: String,
    pub blocking: bool,
}

impl Finding {
    fn blocking(id: &str, message: String) -> Self {
        Finding {
            id: id.to_string(),
            message,
            blocking: true,
        }
    }

    fn warning(id: &str, message: String) -> Self {
        Finding {
            id: id.to_string(),
            message,
            blocking: false,
        }
    }
}

/// Cross-check the loaded feeds. The engine treats these invariants as
/// preconditions and never repairs data, so violations are surfaced
/// here, before rating.
pub fn validate(data: &DataSet) -> Vec<Finding> {
    let mut findings = Vec::new();

    for measure in data.measures.values() {
        for (year, weight) in &measure.weight_by_year {
            if !weight.is_finite() || *weight < 0.0 {
                findings.push(Finding::blocking(
                    "catalog.invalid_weight",
                    format!(
                        "measure {} has invalid weight {weight} for {year}",
                        measure.measure_key
                    ),
                ));
            } else if *weight == 0.0 {
                findings.push(Finding::warning(
                    "catalog.zero_weight",
                    format!(
                        "measure {} carries weight 0 for {year} and is excluded from overalls",
                        measure.measure_key
                    ),
                ));
            }
        }
    }

    for (year, by_measure) in &data.cutpoints {
        for cuts in by_measure.values() {
            let Some(measure) = data.measure(&cuts.measure_key) else {
                findings.push(Finding::warning(
                    "cutpoints.unknown_measure",
                    format!(
                        "cutpoints for {year} reference unknown measure {}",
                        cuts.measure_key
                    ),
                ));
                continue;
            };
            if has_interior_null(cuts) {
                findings.push(Finding::blocking(
                    "cutpoints.interior_null",
                    format!(
                        "measure {} year {year} has an unpublished threshold between published ones",
                        cuts.measure_key
                    ),
                ));
            }
            if !is_monotonic(cuts, measure.lower_is_better) {
                findings.push(Finding::blocking(
                    "cutpoints.non_monotonic",
                    format!(
                        "measure {} year {year} thresholds are not ordered for its direction",
                        cuts.measure_key
                    ),
                ));
            }
        }
    }

    for (entity_id, records) in &data.performance {
        let mut seen = HashSet::new();
        for record in records {
            if !seen.insert((record.measure_key.as_str(), record.year)) {
                findings.push(Finding::blocking(
                    "performance.duplicate_record",
                    format!(
                        "entity {entity_id} has duplicate records for measure {} year {}",
                        record.measure_key, record.year
                    ),
                ));
            }
            if data.measure(&record.measure_key).is_none() {
                findings.push(Finding::blocking(
                    "performance.unknown_measure",
                    format!(
                        "entity {entity_id} has a record for unknown measure {}",
                        record.measure_key
                    ),
                ));
            }
            if let Some(assigned) = record.assigned_rating {
                if !(1..=5).contains(&assigned) {
                    findings.push(Finding::blocking(
                        "performance.invalid_assigned_rating",
                        format!(
                            "entity {entity_id} measure {} has assigned rating {assigned}",
                            record.measure_key
                        ),
                    ));
                }
            }
        }
    }

    findings
}

/// Published thresholds must sit at the ends of the tier ladder; a gap
/// in the middle means the feed was mis-parsed.
fn has_interior_null(cuts: &CutpointSet) -> bool {
    let tiers = [cuts.cut_2, cuts.cut_3, cuts.cut_4, cuts.cut_5];
    let first = tiers.iter().position(Option::is_some);
    let last = tiers.iter().rposition(Option::is_some);
    match (first, last) {
        (Some(first), Some(last)) => tiers[first..=last].iter().any(Option::is_none),
        _ => false,
    }
}

fn is_monotonic(cuts: &CutpointSet, lower_is_better: bool) -> bool {
    let published: Vec<f64> = [cuts.cut_2, cuts.cut_3, cuts.cut_4, cuts.cut_5]
        .into_iter()
        .flatten()
        .collect();
    published.windows(2).all(|pair| {
        if lower_is_better {
            pair[0] >= pair[1]
        } else {
            pair[0] <= pair[1]
        }
    })
}
