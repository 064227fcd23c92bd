//! Rule tables and calculators for four-pillar (saju) charts.
//!
//! This crate provides:
//! - The ten stems, twelve branches, elements and the 60-step cycle
//! - The pillar calculator driven by a solar-term table
//! - Ten gods, the marker catalog and stem/branch interactions
//! - Major fortune (decade) and yearly fortune progressions
//!
//! Every calculation is a pure, total function of typed input. Degraded
//! results carry [`Advisory`] codes instead of failing.

pub mod advisory;
pub mod branch;
pub mod element;
pub mod error;
pub mod fortune;
pub mod interaction;
pub mod marker;
pub mod pillar;
pub mod sexagenary;
pub mod stem;
pub mod ten_gods;
mod util;

pub use advisory::{Advisory, Assessed, Component, Reliability};
pub use branch::{ALL_BRANCHES, Branch, HiddenStems};
pub use element::{ALL_ELEMENTS, Element, Polarity};
pub use error::BaseError;
pub use fortune::{
    Direction, FortuneCycle, Gender, MAJOR_FORTUNE_CYCLES, MajorFortune, YearlyEntry,
    fortune_direction, major_fortune, start_age_from_days, yearly_progression,
};
pub use interaction::{Clash, Combination, InteractionSet, interactions};
pub use marker::{ALL_MARKER_KINDS, Marker, MarkerCatalog, MarkerKind, MarkerPosition, detect_markers};
pub use pillar::{ALL_SLOTS, FourPillars, PillarSlot, four_pillars};
pub use sexagenary::{StemBranch, day_stem_branch, year_stem_branch};
pub use stem::{ALL_STEMS, Stem};
pub use ten_gods::{TenGod, TenGodFamily, TenGodsChart, branch_ten_god, hidden_stem_ten_gods, ten_god};
