pub mod catalog;
pub mod cutpoints;
pub mod performance;
pub mod validate;

use crate::error::{Result, StarcutError};
use crate::types::measure::{CutpointSet, Measure, PerformanceRecord};
use crate::types::rating::FeedDigest;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

pub const MEASURES_FILE: &str = "measures.json";
pub const CUTPOINTS_DIR: &str = "cutpoints";
pub const PERFORMANCE_FILE: &str = "performance.json";

/// All externally supplied inputs for one rating cycle, loaded from a
/// data directory and read-only from then on.
#[derive(Debug, Clone)]
pub struct DataSet {
    pub measures: BTreeMap<String, Measure>,
    /// year -> measure_key -> published thresholds.
    pub cutpoints: BTreeMap<i32, BTreeMap<String, CutpointSet>>,
    /// entity_id -> performance records across measures and years.
    pub performance: BTreeMap<String, Vec<PerformanceRecord>>,
    pub digests: Vec<FeedDigest>,
}

impl DataSet {
    pub fn measure(&self, measure_key: &str) -> Option<&Measure> {
        self.measures.get(measure_key)
    }

    pub fn cutpoints_for(&self, measure_key: &str, year: i32) -> Option<&CutpointSet> {
        self.cutpoints
            .get(&year)
            .and_then(|by_measure| by_measure.get(measure_key))
    }

    pub fn years(&self) -> Vec<i32> {
        self.cutpoints.keys().copied().collect()
    }
}

/// Load and cross-check the three feeds. Data-quality findings are
/// logged here; only structural failures (missing files, parse errors)
/// abort the load.
pub fn load(root: &Path) -> Result<DataSet> {
    if !root.exists() {
        return Err(StarcutError::PathNotFound(root.display().to_string()));
    }

    let mut digests = Vec::new();
    let measures = catalog::load(root, &mut digests)?;
    let cutpoints = cutpoints::load(root, &mut digests)?;
    let performance = performance::load(root, &mut digests)?;

    let data = DataSet {
        measures,
        cutpoints,
        performance,
        digests,
    };

    for finding in validate::validate(&data) {
        tracing::warn!(
            finding = finding.id.as_str(),
            blocking = finding.blocking,
            "{}",
            finding.message
        );
    }

    Ok(data)
}

pub(crate) fn read_feed_file(path: &Path, digests: &mut Vec<FeedDigest>) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)?;
    digests.push(FeedDigest {
        file: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        sha256: sha256_hex(&bytes),
    });
    Ok(bytes)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}
