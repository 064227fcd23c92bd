//! Error types for parsing stems, branches, pillars and other tokens.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from parsing rule-table tokens.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BaseError {
    /// Not one of the 10 stems.
    UnknownStem(String),
    /// Not one of the 12 branches.
    UnknownBranch(String),
    /// Not a two-glyph stem+branch pillar.
    InvalidPillar(String),
    /// Stem and branch differ in parity and never pair in the 60-cycle.
    ParityMismatch(String),
    /// Not a slot label (`year`, `month`, `day`, `hour`) or a `slot-slot` pair.
    InvalidPosition(String),
    /// Not `male`/`female` (or 남/여).
    UnknownGender(String),
}

impl Display for BaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStem(s) => write!(f, "unknown heavenly stem: {s}"),
            Self::UnknownBranch(s) => write!(f, "unknown earthly branch: {s}"),
            Self::InvalidPillar(s) => write!(f, "invalid pillar: {s}"),
            Self::ParityMismatch(s) => write!(f, "stem and branch never pair in the 60-cycle: {s}"),
            Self::InvalidPosition(s) => write!(f, "invalid marker position: {s}"),
            Self::UnknownGender(s) => write!(f, "unknown gender: {s}"),
        }
    }
}

impl Error for BaseError {}
