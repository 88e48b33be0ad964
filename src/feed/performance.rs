use crate::error::{Result, StarcutError};
use crate::types::measure::PerformanceRecord;
use crate::types::rating::FeedDigest;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct EntityPerformance {
    entity_id: String,
    records: Vec<PerformanceRecord>,
}

/// Load `performance.json` keyed by entity (contract) id.
pub fn load(
    root: &Path,
    digests: &mut Vec<FeedDigest>,
) -> Result<BTreeMap<String, Vec<PerformanceRecord>>> {
    let path = root.join(super::PERFORMANCE_FILE);
    if !path.exists() {
        return Err(StarcutError::FeedParse(format!(
            "{} not found in {}",
            super::PERFORMANCE_FILE,
            root.display()
        )));
    }

    let bytes = super::read_feed_file(&path, digests)?;
    let entities: Vec<EntityPerformance> = serde_json::from_slice(&bytes)
        .map_err(|e| StarcutError::FeedParse(format!("{}: {e}", path.display())))?;

    let mut by_entity = BTreeMap::new();
    for entity in entities {
        // The feed is keyed by (measure_key, year, entity_id); a repeat
        // of the same cell would double-count that measure's weight.
        let mut seen = HashSet::new();
        for record in &entity.records {
            if !seen.insert((record.measure_key.clone(), record.year)) {
                return Err(StarcutError::FeedParse(format!(
                    "duplicate record for measure {} year {} under entity {}",
                    record.measure_key, record.year, entity.entity_id
                )));
            }
        }
        if by_entity
            .insert(entity.entity_id.clone(), entity.records)
            .is_some()
        {
            return Err(StarcutError::FeedParse(format!(
                "duplicate entity_id in {}: {}",
                super::PERFORMANCE_FILE,
                entity.entity_id
            )));
        }
    }
    Ok(by_entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_performance_file_fails_with_context() {
        let dir = TempDir::new().expect("temp dir should be created");
        let err = load(dir.path(), &mut Vec::new()).expect_err("missing file should fail");
        assert!(err.to_string().contains("performance.json"));
    }

    #[test]
    fn entities_load_with_their_records() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join("performance.json"),
            r#"[{"entity_id": "H1234", "records": [
                {"measure_key": "m", "year": 2026, "value": 84.0,
                 "contract_count": 2, "enrollment": 120000},
                {"measure_key": "m", "year": 2025, "value": null}
            ]}]"#,
        )
        .expect("performance should write");

        let feed = load(dir.path(), &mut Vec::new()).expect("load should succeed");
        let records = &feed["H1234"];
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].enrollment, 120_000);
        assert!(records[1].value.is_none());
    }

    #[test]
    fn duplicate_measure_year_records_are_rejected() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join("performance.json"),
            r#"[{"entity_id": "H1234", "records": [
                {"measure_key": "screening", "year": 2026, "value": 95.0},
                {"measure_key": "screening", "year": 2026, "value": 95.0}
            ]}]"#,
        )
        .expect("performance should write");

        let err = load(dir.path(), &mut Vec::new()).expect_err("duplicate cell should fail");
        assert!(err.to_string().contains("duplicate record"));
    }

    #[test]
    fn same_measure_across_years_is_not_a_duplicate() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join("performance.json"),
            r#"[{"entity_id": "H1234", "records": [
                {"measure_key": "screening", "year": 2025, "value": 81.0},
                {"measure_key": "screening", "year": 2026, "value": 84.0}
            ]},
            {"entity_id": "H5678", "records": [
                {"measure_key": "screening", "year": 2026, "value": 84.0}
            ]}]"#,
        )
        .expect("performance should write");

        let feed = load(dir.path(), &mut Vec::new()).expect("load should succeed");
        assert_eq!(feed["H1234"].len(), 2);
        assert_eq!(feed["H5678"].len(), 1);
    }

    #[test]
    fn duplicate_entities_are_rejected() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join("performance.json"),
            r#"[{"entity_id": "H1234", "records": []},
                {"entity_id": "H1234", "records": []}]"#,
        )
        .expect("performance should write");

        let err = load(dir.path(), &mut Vec::new()).expect_err("duplicate entity should fail");
        assert!(err.to_string().contains("duplicate entity_id"));
    }
}
