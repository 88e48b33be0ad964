use crate::types::rating::{BandPosition, RatingReport, Simulation};

pub fn to_markdown(report: &RatingReport, decimals: u8) -> String {
    let mut output = String::new();
    output.push_str("# Star Rating Report\n\n");
    output.push_str(&format!("Entity: {}\n", report.entity_id));
    output.push_str(&format!("Star year: {}\n", report.year));
    output.push_str(&format!("Generated: {}\n\n", report.generated_at));

    output.push_str("## Overall\n\n");
    output.push_str(&format!(
        "- weighted score: {}\n- half-star rating: {}\n- total weight: {}\n\n",
        fmt_opt(report.aggregate.overall_weighted_score, decimals),
        fmt_opt(report.aggregate.overall_half_star, 1),
        report.aggregate.total_weight
    ));

    output.push_str("## Measures\n\n");
    if report.measures.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for measure in &report.measures {
            let stars = measure
                .rating
                .map(|rating| format!("{rating}"))
                .unwrap_or_else(|| "-".to_string());
            let mut flags = Vec::new();
            if measure.adjusted {
                flags.push("adjusted");
            }
            if measure.defaulted {
                flags.push("defaulted");
            }
            if measure.discontinued {
                flags.push("discontinued");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };
            let position = measure
                .band_position
                .map(|position| format!(", {} of band", position_label(position)))
                .unwrap_or_default();
            output.push_str(&format!(
                "- {}: {stars} ({}, weight {}{position}){flags}\n",
                measure.measure_key, measure.band_range, measure.weight
            ));
        }
        output.push('\n');
    }

    if let Some(simulation) = &report.simulation {
        output.push_str("## Simulation\n\n");
        match simulation {
            Simulation::NotRequested => {
                output.push_str("no simulation performed\n\n");
            }
            Simulation::Simulated(simulated) => {
                output.push_str(&format!(
                    "- actual half-star: {}\n- simulated half-star: {}\n- overall delta: {}\n\n",
                    fmt_opt(simulated.actual.overall_half_star, 1),
                    fmt_opt(simulated.simulated.overall_half_star, 1),
                    fmt_opt(simulated.overall_delta, 1)
                ));
                for delta in &simulated.per_measure {
                    output.push_str(&format!(
                        "- {}: {} -> {} (delta {})\n",
                        delta.measure_key,
                        delta
                            .actual_rating
                            .map(|rating| rating.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        delta
                            .simulated_rating
                            .map(|rating| rating.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        delta
                            .delta
                            .map(|delta| format!("{delta:+}"))
                            .unwrap_or_else(|| "-".to_string()),
                    ));
                }
                output.push('\n');
            }
        }
    }

    output.push_str("## Feed provenance\n\n");
    if report.feed_digests.is_empty() {
        output.push_str("- none\n");
    } else {
        for digest in &report.feed_digests {
            output.push_str(&format!("- {} sha256:{}\n", digest.file, digest.sha256));
        }
    }

    output
}

fn fmt_opt(value: Option<f64>, decimals: u8) -> String {
    match value {
        Some(value) => format!("{value:.precision$}", precision = decimals as usize),
        None => "-".to_string(),
    }
}

fn position_label(position: BandPosition) -> &'static str {
    match position {
        BandPosition::Top => "top",
        BandPosition::Middle => "middle",
        BandPosition::Bottom => "bottom",
    }
}
