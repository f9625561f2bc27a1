use crate::models::{ConservationStatus, PopulationTrend, SpeciesRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distribution of categories and trends over the records of one session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub by_status: BTreeMap<ConservationStatus, usize>,
    pub by_trend: BTreeMap<PopulationTrend, usize>,
}

/// Count records per conservation status. Statuses with no records are absent.
pub fn status_distribution(records: &[SpeciesRecord]) -> BTreeMap<ConservationStatus, usize> {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.conservation_status).or_default() += 1;
    }
    counts
}

/// Count records per population trend. Trends with no records are absent.
pub fn trend_distribution(records: &[SpeciesRecord]) -> BTreeMap<PopulationTrend, usize> {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.population_trend).or_default() += 1;
    }
    counts
}

pub fn summarize(records: &[SpeciesRecord]) -> Summary {
    Summary {
        total: records.len(),
        by_status: status_distribution(records),
        by_trend: trend_distribution(records),
    }
}
