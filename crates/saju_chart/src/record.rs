//! The assembled, immutable chart record.

use saju_base::{
    Advisory, FourPillars, InteractionSet, MajorFortune, MarkerCatalog, Reliability, StemBranch,
    TenGodsChart, YearlyEntry, interactions, yearly_progression,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::input::BirthInput;
use crate::payload::ChartPayload;

/// Everything computed for one birth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub birth: BirthInput,
    pub pillars: FourPillars,
    pub ten_gods: TenGodsChart,
    pub markers: MarkerCatalog,
    pub major_fortune: MajorFortune,
    pub reliability: Reliability,
    /// Structured reasons behind `reliability`.
    pub advisories: Vec<Advisory>,
    /// Human-readable text of each advisory, same order.
    pub warnings: Vec<String>,
}

impl ChartRecord {
    pub fn new(
        birth: BirthInput,
        pillars: FourPillars,
        ten_gods: TenGodsChart,
        markers: MarkerCatalog,
        major_fortune: MajorFortune,
        advisories: Vec<Advisory>,
    ) -> Self {
        Self {
            birth,
            pillars,
            ten_gods,
            markers,
            major_fortune,
            reliability: Reliability::from_advisories(&advisories),
            warnings: advisories.iter().map(Advisory::message).collect(),
            advisories,
        }
    }

    /// Interactions among the chart's own stems and branches.
    pub fn interactions(&self) -> InteractionSet {
        interactions(&self.pillars.stems(), &self.pillars.branches())
    }

    /// Interactions with extra pillars (a running decade or year) laid over the chart.
    pub fn interactions_with(&self, overlay: &[StemBranch]) -> InteractionSet {
        let mut stems = self.pillars.stems();
        let mut branches = self.pillars.branches();
        stems.extend(overlay.iter().map(|p| p.stem));
        branches.extend(overlay.iter().map(|p| p.branch));
        interactions(&stems, &branches)
    }

    /// Yearly pillars around `window_year` with ages from the birth year.
    pub fn yearly_progression(&self, window_year: i32) -> Vec<YearlyEntry> {
        yearly_progression(self.birth.date.year(), window_year)
    }

    /// The persisted subset of the record.
    pub fn payload(&self) -> ChartPayload {
        ChartPayload {
            birth: self.birth,
            pillars: self.pillars,
            ten_gods: self.ten_gods,
            markers: self.markers.clone(),
            fortune_start_age: self.major_fortune.start_age,
            fortunes: self.major_fortune.cycles.to_vec(),
        }
    }
}
