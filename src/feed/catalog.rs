use crate::error::{Result, StarcutError};
use crate::types::measure::Measure;
use crate::types::rating::FeedDigest;
use std::collections::BTreeMap;
use std::path::Path;

/// Load `measures.json` into a catalog keyed by measure_key.
pub fn load(root: &Path, digests: &mut Vec<FeedDigest>) -> Result<BTreeMap<String, Measure>> {
    let path = root.join(super::MEASURES_FILE);
    if !path.exists() {
        return Err(StarcutError::FeedParse(format!(
            "{} not found in {}",
            super::MEASURES_FILE,
            root.display()
        )));
    }

    let bytes = super::read_feed_file(&path, digests)?;
    let measures: Vec<Measure> = serde_json::from_slice(&bytes)
        .map_err(|e| StarcutError::FeedParse(format!("{}: {e}", path.display())))?;

    let mut catalog = BTreeMap::new();
    for measure in measures {
        let key = measure.measure_key.clone();
        if catalog.insert(key.clone(), measure).is_some() {
            return Err(StarcutError::FeedParse(format!(
                "duplicate measure_key in {}: {key}",
                super::MEASURES_FILE
            )));
        }
    }
    Ok(catalog)
}
