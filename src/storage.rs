use crate::models::SpeciesRecord;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn sanitize_cell(s: &str) -> String {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@') => format!("'{}", s),
        _ => s.to_string(),
    }
}

/// Save records as CSV with header.
pub fn save_csv<P: AsRef<Path>>(records: &[SpeciesRecord], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record([
        "name",
        "scientific_name",
        "common_name",
        "conservation_status",
        "status_code",
        "population_trend",
        "habitat",
    ])?;
    for r in records {
        wtr.write_record([
            sanitize_cell(&r.name),
            sanitize_cell(r.scientific_name.as_deref().unwrap_or("")),
            sanitize_cell(r.common_name.as_deref().unwrap_or("")),
            r.conservation_status.label().to_string(),
            r.conservation_status.code().unwrap_or("").to_string(),
            r.population_trend.label().to_string(),
            sanitize_cell(&r.habitat),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save records as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(records: &[SpeciesRecord], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConservationStatus, PopulationTrend};
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let recs = vec![SpeciesRecord {
            name: "Panthera leo".into(),
            scientific_name: Some("Panthera leo".into()),
            common_name: Some("Lion".into()),
            conservation_status: ConservationStatus::Vulnerable,
            population_trend: PopulationTrend::Decreasing,
            habitat: String::new(),
        }];
        save_csv(&recs, &csvp).unwrap();
        save_json(&recs, &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }

    #[test]
    fn formula_starters_are_prefixed() {
        assert_eq!(sanitize_cell("=HYPERLINK(1)"), "'=HYPERLINK(1)");
        assert_eq!(sanitize_cell("Savanna"), "Savanna");
        assert_eq!(sanitize_cell(""), "");
    }
}
