//! Persisted chart payloads and drift detection between them.
//!
//! Stored records keep the birth input with its derived sections. After a
//! rule-table fix, recomputing and comparing payloads shows which records
//! changed and where.

use std::fmt::{Display, Formatter};

use saju_base::{FortuneCycle, FourPillars, MarkerCatalog, TenGodsChart};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::input::BirthInput;

/// The derived sections stored alongside a birth record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub birth: BirthInput,
    pub pillars: FourPillars,
    pub ten_gods: TenGodsChart,
    /// Compared as a set: list order in stored JSON is irrelevant.
    pub markers: MarkerCatalog,
    pub fortune_start_age: u32,
    pub fortunes: Vec<FortuneCycle>,
}

/// A payload section that can differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadSection {
    Birth,
    Pillars,
    TenGods,
    Markers,
    FortuneStartAge,
    Fortunes,
}

impl PayloadSection {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Birth => "birth",
            Self::Pillars => "pillars",
            Self::TenGods => "ten-gods",
            Self::Markers => "markers",
            Self::FortuneStartAge => "fortune-start-age",
            Self::Fortunes => "fortunes",
        }
    }
}

/// Sections that differ between two payloads; empty means equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadDrift {
    pub sections: Vec<PayloadSection>,
}

impl PayloadDrift {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn contains(&self, section: PayloadSection) -> bool {
        self.sections.contains(&section)
    }
}

impl Display for PayloadDrift {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.sections.is_empty() {
            return f.write_str("no drift");
        }
        let names: Vec<&str> = self.sections.iter().map(|s| s.name()).collect();
        write!(f, "drift in {}", names.join(", "))
    }
}

impl ChartPayload {
    /// Sections of `other` that differ from `self`.
    pub fn drift(&self, other: &ChartPayload) -> PayloadDrift {
        let checks = [
            (PayloadSection::Birth, self.birth == other.birth),
            (PayloadSection::Pillars, self.pillars == other.pillars),
            (PayloadSection::TenGods, self.ten_gods == other.ten_gods),
            (PayloadSection::Markers, self.markers == other.markers),
            (
                PayloadSection::FortuneStartAge,
                self.fortune_start_age == other.fortune_start_age,
            ),
            (PayloadSection::Fortunes, self.fortunes == other.fortunes),
        ];
        PayloadDrift {
            sections: checks
                .into_iter()
                .filter(|(_, same)| !same)
                .map(|(section, _)| section)
                .collect(),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String, ChartError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compare two typed payloads.
pub fn compare_payloads(a: &ChartPayload, b: &ChartPayload) -> PayloadDrift {
    a.drift(b)
}

/// Parse two stored JSON payloads and compare them section by section.
pub fn compare_payload_json(a: &str, b: &str) -> Result<PayloadDrift, ChartError> {
    let a = ChartPayload::from_json(a)?;
    let b = ChartPayload::from_json(b)?;
    Ok(a.drift(&b))
}
