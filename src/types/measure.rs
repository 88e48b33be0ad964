use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contract part a measure belongs to. Part C covers the health plan
/// measures, Part D the drug plan measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Part {
    C,
    D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataSource {
    Cahps,
    Hos,
    Hedis,
    Admin,
}

/// A quality measure. `measure_key` is the stable cross-year identifier;
/// `measure_id` (C01, D02, ...) is renumbered by CMS between years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measure {
    pub measure_key: String,
    pub measure_id: String,
    pub name: String,
    pub domain: String,
    pub part: Part,
    pub lower_is_better: bool,
    pub data_source: DataSource,
    /// Weight per star year. A year absent from this map means the
    /// measure is discontinued for that year.
    #[serde(default)]
    pub weight_by_year: BTreeMap<i32, f64>,
}

impl Measure {
    pub fn weight_for(&self, year: i32) -> Option<f64> {
        self.weight_by_year.get(&year).copied()
    }

    pub fn discontinued_in(&self, year: i32) -> bool {
        !self.weight_by_year.contains_key(&year)
    }
}

/// The four published thresholds separating star tiers for one measure
/// in one star year. A `None` threshold means no plan can reach that
/// tier this year. Immutable once published; the engine never repairs
/// ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutpointSet {
    pub measure_key: String,
    pub year: i32,
    pub cut_2: Option<f64>,
    pub cut_3: Option<f64>,
    pub cut_4: Option<f64>,
    pub cut_5: Option<f64>,
}

impl CutpointSet {
    /// Thresholds ordered best tier first, paired with the star value
    /// the threshold admits.
    pub fn tiers_best_first(&self) -> [(u8, Option<f64>); 4] {
        [
            (5, self.cut_5),
            (4, self.cut_4),
            (3, self.cut_3),
            (2, self.cut_2),
        ]
    }

    /// True when no threshold is published at all, which triggers the
    /// neutral-default classification policy.
    pub fn is_empty(&self) -> bool {
        self.cut_2.is_none() && self.cut_3.is_none() && self.cut_4.is_none() && self.cut_5.is_none()
    }
}

/// One contract's raw metric for one measure and year. `value: None`
/// means no data and must surface as "no rating", never as a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub measure_key: String,
    pub year: i32,
    pub value: Option<f64>,
    #[serde(default)]
    pub contract_count: u32,
    #[serde(default)]
    pub enrollment: u64,
    /// Externally assigned star rating, when the publishing process has
    /// already applied statistical adjustment. `None` means the engine
    /// classifies from the raw value alone.
    #[serde(default)]
    pub assigned_rating: Option<u8>,
}
