use crate::error::{Result, StarcutError};
use crate::types::measure::CutpointSet;
use crate::types::rating::FeedDigest;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

/// Load every `cutpoints/<year>.json` file. The file stem is the typed
/// year; each record inside must agree with it, which replaces the
/// old stringified-year map lookups with a load-time check.
pub fn load(
    root: &Path,
    digests: &mut Vec<FeedDigest>,
) -> Result<BTreeMap<i32, BTreeMap<String, CutpointSet>>> {
    let dir = root.join(super::CUTPOINTS_DIR);
    let mut by_year = BTreeMap::new();
    if !dir.exists() {
        // A measure with no cutpoints anywhere classifies to the
        // neutral default; an absent feed is legal, just empty.
        return Ok(by_year);
    }

    for entry in WalkDir::new(&dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }

        let year = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.parse::<i32>().ok())
            .ok_or_else(|| StarcutError::InvalidYear(path.display().to_string()))?;

        let bytes = super::read_feed_file(path, digests)?;
        let sets: Vec<CutpointSet> = serde_json::from_slice(&bytes)
            .map_err(|e| StarcutError::FeedParse(format!("{}: {e}", path.display())))?;

        let year_map: &mut BTreeMap<String, CutpointSet> = by_year.entry(year).or_default();
        for set in sets {
            if set.year != year {
                return Err(StarcutError::InvalidYear(format!(
                    "{}: record for {} says year {}",
                    path.display(),
                    set.measure_key,
                    set.year
                )));
            }
            let key = set.measure_key.clone();
            if year_map.insert(key.clone(), set).is_some() {
                return Err(StarcutError::FeedParse(format!(
                    "{}: duplicate cutpoints for {key}",
                    path.display()
                )));
            }
        }
    }

    Ok(by_year)
}
