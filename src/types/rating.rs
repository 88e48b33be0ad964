use serde::Serialize;

/// Position of a value within its assigned rating's band, by thirds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BandPosition {
    Top,
    Middle,
    Bottom,
}

/// Per-measure outcome for one entity and year. Derived on demand,
/// never persisted by the engine.
#[derive(Debug, Clone, Serialize)]
pub struct RatingResult {
    pub measure_key: String,
    pub year: i32,
    /// `None` means no data, rendered upstream as a dash.
    pub rating: Option<u8>,
    pub band_range: String,
    /// True when the assigned rating differs from what the raw value
    /// alone would produce (external statistical adjustment).
    pub adjusted: bool,
    /// True when the rating is the neutral default issued because no
    /// cutpoints were published, as opposed to a computed 3.
    pub defaulted: bool,
    pub band_position: Option<BandPosition>,
    pub weight: f64,
    pub discontinued: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    /// Weighted mean of non-null ratings; `None` when no entry carried
    /// both a rating and a positive weight.
    pub overall_weighted_score: Option<f64>,
    /// The statutory display value: score rounded to the nearest
    /// half star.
    pub overall_half_star: Option<f64>,
    pub total_weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeasureDelta {
    pub measure_key: String,
    pub actual_rating: Option<u8>,
    pub simulated_rating: Option<u8>,
    pub delta: Option<i8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub actual: AggregateResult,
    pub simulated: AggregateResult,
    pub per_measure: Vec<MeasureDelta>,
    pub overall_delta: Option<f64>,
}

/// Outcome of a simulation request. An empty override map is a distinct
/// state from a simulation whose result equals the actual rating;
/// callers use it to decide whether to render a what-if view at all.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Simulation {
    NotRequested,
    Simulated(SimulationReport),
}

/// Full per-entity report envelope handed to the renderers.
#[derive(Debug, Clone, Serialize)]
pub struct RatingReport {
    pub entity_id: String,
    pub year: i32,
    pub generated_at: String,
    pub feed_digests: Vec<FeedDigest>,
    pub measures: Vec<RatingResult>,
    pub aggregate: AggregateResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation: Option<Simulation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedDigest {
    pub file: String,
    pub sha256: String,
}
