//! Four-pillar chart assembly.
//!
//! Turns a [`BirthInput`] into a [`ChartRecord`]: pillars, ten gods, markers,
//! major fortune and a reliability verdict with its advisories. Also builds
//! the yearly fortune window, ad-hoc interactions, and the persisted
//! [`ChartPayload`] with drift comparison.

pub mod engine;
pub mod error;
pub mod input;
pub mod payload;
pub mod record;

pub use engine::{
    ChartEngine, builtin_table, compute_chart, default_engine, solar_term_table_for,
    verify_payload, yearly_progression,
};
pub use error::ChartError;
pub use input::BirthInput;
pub use payload::{ChartPayload, PayloadDrift, PayloadSection, compare_payload_json, compare_payloads};
pub use record::ChartRecord;
pub use saju_base::{InteractionSet, interactions};
