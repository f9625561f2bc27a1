use serde::{Deserialize, Serialize};

/// IUCN Red List category of a species.
///
/// Parsed from the codes the API returns (`"VU"`, `"EN"`, legacy `"LR/nt"` …) or from
/// the full labels. Anything absent or unrecognized is [`ConservationStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConservationStatus {
    #[serde(rename = "Least Concern")]
    LeastConcern,
    #[serde(rename = "Near Threatened")]
    NearThreatened,
    Vulnerable,
    Endangered,
    #[serde(rename = "Critically Endangered")]
    CriticallyEndangered,
    #[serde(rename = "Extinct in the Wild")]
    ExtinctInTheWild,
    Extinct,
    #[serde(rename = "Data Deficient")]
    DataDeficient,
    #[serde(rename = "Not Evaluated")]
    NotEvaluated,
    Unknown,
}

impl ConservationStatus {
    /// Parse a category code or label. Returns `None` for values we don't recognize.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim().to_ascii_lowercase();
        let status = match s.as_str() {
            "lc" | "lr/lc" | "least concern" | "lower risk/least concern" => Self::LeastConcern,
            // "conservation dependent" was folded into Near Threatened in 2001
            "nt" | "lr/nt" | "lr/cd" | "near threatened" | "lower risk/near threatened"
            | "lower risk/conservation dependent" => Self::NearThreatened,
            "vu" | "vulnerable" => Self::Vulnerable,
            "en" | "endangered" => Self::Endangered,
            "cr" | "critically endangered" => Self::CriticallyEndangered,
            "ew" | "extinct in the wild" => Self::ExtinctInTheWild,
            "ex" | "extinct" => Self::Extinct,
            "dd" | "data deficient" => Self::DataDeficient,
            "ne" | "not evaluated" => Self::NotEvaluated,
            "unknown" => Self::Unknown,
            _ => return None,
        };
        Some(status)
    }

    /// Map an optional upstream value to a status, defaulting to `Unknown`.
    pub fn from_upstream(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Unknown,
            Some(s) if s.trim().is_empty() => Self::Unknown,
            Some(s) => Self::parse(s).unwrap_or_else(|| {
                log::warn!("unrecognized red list category {:?}; using Unknown", s);
                Self::Unknown
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LeastConcern => "Least Concern",
            Self::NearThreatened => "Near Threatened",
            Self::Vulnerable => "Vulnerable",
            Self::Endangered => "Endangered",
            Self::CriticallyEndangered => "Critically Endangered",
            Self::ExtinctInTheWild => "Extinct in the Wild",
            Self::Extinct => "Extinct",
            Self::DataDeficient => "Data Deficient",
            Self::NotEvaluated => "Not Evaluated",
            Self::Unknown => "Unknown",
        }
    }

    /// Two-letter IUCN code; `None` for `Unknown`.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::LeastConcern => Some("LC"),
            Self::NearThreatened => Some("NT"),
            Self::Vulnerable => Some("VU"),
            Self::Endangered => Some("EN"),
            Self::CriticallyEndangered => Some("CR"),
            Self::ExtinctInTheWild => Some("EW"),
            Self::Extinct => Some("EX"),
            Self::DataDeficient => Some("DD"),
            Self::NotEvaluated => Some("NE"),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for ConservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{} ({})", self.label(), code),
            None => f.write_str(self.label()),
        }
    }
}

/// Direction of a species' population over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PopulationTrend {
    Increasing,
    Decreasing,
    Stable,
    Unknown,
}

impl PopulationTrend {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "increasing" => Some(Self::Increasing),
            "decreasing" => Some(Self::Decreasing),
            "stable" => Some(Self::Stable),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn from_upstream(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Unknown,
            Some(s) if s.trim().is_empty() => Self::Unknown,
            Some(s) => Self::parse(s).unwrap_or_else(|| {
                log::warn!("unrecognized population trend {:?}; using Unknown", s);
                Self::Unknown
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Increasing => "Increasing",
            Self::Decreasing => "Decreasing",
            Self::Stable => "Stable",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for PopulationTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw body of `GET /species/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub result: Vec<SpeciesEntry>,
}

/// One entry of the `result` array. Every field is optional; upstream omits freely.
/// Fields we don't use (taxon id, kingdom, criteria, ...) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesEntry {
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub main_common_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub population_trend: Option<String>,
    #[serde(default)]
    pub habitat: Option<String>,
}

/// Normalized result of one lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesRecord {
    /// The (trimmed) name the user asked for.
    pub name: String,
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    pub conservation_status: ConservationStatus,
    pub population_trend: PopulationTrend,
    /// Free text; empty when upstream has none.
    pub habitat: String,
}

impl SpeciesRecord {
    /// Build a record for `name` from an upstream entry, defaulting whatever is missing.
    pub fn from_entry(name: &str, entry: SpeciesEntry) -> Self {
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        Self {
            name: name.to_string(),
            conservation_status: ConservationStatus::from_upstream(entry.category.as_deref()),
            population_trend: PopulationTrend::from_upstream(entry.population_trend.as_deref()),
            scientific_name: non_empty(entry.scientific_name),
            common_name: non_empty(entry.main_common_name),
            habitat: entry.habitat.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_lower_risk_codes_map_to_current_categories() {
        assert_eq!(
            ConservationStatus::parse("LR/lc"),
            Some(ConservationStatus::LeastConcern)
        );
        assert_eq!(
            ConservationStatus::parse("LR/cd"),
            Some(ConservationStatus::NearThreatened)
        );
    }

    #[test]
    fn blank_upstream_values_are_unknown() {
        assert_eq!(
            ConservationStatus::from_upstream(Some("  ")),
            ConservationStatus::Unknown
        );
        assert_eq!(PopulationTrend::from_upstream(None), PopulationTrend::Unknown);
    }

    #[test]
    fn display_includes_code_when_defined() {
        assert_eq!(ConservationStatus::Vulnerable.to_string(), "Vulnerable (VU)");
        assert_eq!(ConservationStatus::Unknown.to_string(), "Unknown");
    }
}
