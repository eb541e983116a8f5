//! The closed set of respiratory conditions both insight strategies rank.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Disease {
    AsthmaExacerbation,
    Copd,
    AcuteBronchitis,
    ChronicBronchitis,
    Emphysema,
    RespiratoryTractInfections,
    Pneumonia,
    LungCancer,
}

impl Disease {
    pub const ALL: [Disease; 8] = [
        Disease::AsthmaExacerbation,
        Disease::Copd,
        Disease::AcuteBronchitis,
        Disease::ChronicBronchitis,
        Disease::Emphysema,
        Disease::RespiratoryTractInfections,
        Disease::Pneumonia,
        Disease::LungCancer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Disease::AsthmaExacerbation => "Asthma Exacerbation",
            Disease::Copd => "COPD",
            Disease::AcuteBronchitis => "Acute Bronchitis",
            Disease::ChronicBronchitis => "Chronic Bronchitis",
            Disease::Emphysema => "Emphysema",
            Disease::RespiratoryTractInfections => "Respiratory Tract Infections",
            Disease::Pneumonia => "Pneumonia",
            Disease::LungCancer => "Lung Cancer",
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Disease {
    type Err = String;

    /// Exact display names only; case and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Disease::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown disease category `{wanted}`"))
    }
}

impl Serialize for Disease {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Disease {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRisk {
    pub name: Disease,
    pub risk_percentage: f64,
}

impl DiseaseRisk {
    pub fn new(name: Disease, risk_percentage: f64) -> Self {
        Self {
            name,
            risk_percentage,
        }
    }
}

/// Sort highest risk first. Ties keep their incoming order.
pub fn rank(mut risks: Vec<DiseaseRisk>) -> Vec<DiseaseRisk> {
    risks.sort_by(|a, b| b.risk_percentage.total_cmp(&a.risk_percentage));
    risks
}
