//! Combinations (합), clashes (충) and trines (삼합) among stems and branches.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::element::Element;
use crate::stem::Stem;

/// Five stem combinations (天干合) and the element each resolves to.
pub const STEM_COMBINATIONS: [(Stem, Stem, Element); 5] = [
    (Stem::Gap, Stem::Gi, Element::Earth),
    (Stem::Eul, Stem::Gyeong, Element::Metal),
    (Stem::Byeong, Stem::Sin, Element::Water),
    (Stem::Jeong, Stem::Im, Element::Wood),
    (Stem::Mu, Stem::Gye, Element::Fire),
];

/// Four stem clashes (天干沖). 戊 and 己 sit at the centre and have none.
pub const STEM_CLASHES: [(Stem, Stem); 4] = [
    (Stem::Gap, Stem::Gyeong),
    (Stem::Eul, Stem::Sin),
    (Stem::Byeong, Stem::Im),
    (Stem::Jeong, Stem::Gye),
];

/// Six branch combinations (六合).
pub const BRANCH_COMBINATIONS: [(Branch, Branch, Element); 6] = [
    (Branch::Ja, Branch::Chuk, Element::Earth),
    (Branch::In, Branch::Hae, Element::Wood),
    (Branch::Myo, Branch::Sul, Element::Fire),
    (Branch::Jin, Branch::Yu, Element::Metal),
    (Branch::Sa, Branch::Sin, Element::Water),
    (Branch::O, Branch::Mi, Element::Earth),
];

/// Six branch clashes (六沖), each pair six positions apart.
pub const BRANCH_CLASHES: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::O),
    (Branch::Chuk, Branch::Mi),
    (Branch::In, Branch::Sin),
    (Branch::Myo, Branch::Yu),
    (Branch::Jin, Branch::Sul),
    (Branch::Sa, Branch::Hae),
];

/// Four branch trines (三合).
pub const BRANCH_TRINES: [([Branch; 3], Element); 4] = [
    ([Branch::Sin, Branch::Ja, Branch::Jin], Element::Water),
    ([Branch::Hae, Branch::Myo, Branch::Mi], Element::Wood),
    ([Branch::In, Branch::O, Branch::Sul], Element::Fire),
    ([Branch::Sa, Branch::Yu, Branch::Chuk], Element::Metal),
];

/// A binding of two or three tokens into a dominant element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Combination {
    Stems { pair: [Stem; 2], element: Element },
    Branches { pair: [Branch; 2], element: Element },
    BranchTrine { members: [Branch; 3], element: Element },
}

impl Combination {
    pub const fn element(&self) -> Element {
        match self {
            Self::Stems { element, .. }
            | Self::Branches { element, .. }
            | Self::BranchTrine { element, .. } => *element,
        }
    }

    /// Display label, e.g. `甲己합土` or `申子辰 水국`.
    pub fn label(&self) -> String {
        match self {
            Self::Stems { pair: [a, b], element } => format!("{a}{b}합{}", element.hanja()),
            Self::Branches { pair: [a, b], element } => format!("{a}{b}합{}", element.hanja()),
            Self::BranchTrine {
                members: [a, b, c],
                element,
            } => format!("{a}{b}{c} {}국", element.hanja()),
        }
    }
}

impl Display for Combination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// An opposing pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Clash {
    Stems { pair: [Stem; 2] },
    Branches { pair: [Branch; 2] },
}

impl Clash {
    /// Display label, e.g. `子午충`.
    pub fn label(&self) -> String {
        match self {
            Self::Stems { pair: [a, b] } => format!("{a}{b}충"),
            Self::Branches { pair: [a, b] } => format!("{a}{b}충"),
        }
    }
}

impl Display for Clash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Every combination and clash present among a set of stems and branches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSet {
    pub combinations: Vec<Combination>,
    pub clashes: Vec<Clash>,
}

impl InteractionSet {
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty() && self.clashes.is_empty()
    }

    /// Only the three-branch trines.
    pub fn trines(&self) -> impl Iterator<Item = &Combination> {
        self.combinations
            .iter()
            .filter(|c| matches!(c, Combination::BranchTrine { .. }))
    }

    pub fn combination_labels(&self) -> Vec<String> {
        self.combinations.iter().map(Combination::label).collect()
    }

    pub fn clash_labels(&self) -> Vec<String> {
        self.clashes.iter().map(Clash::label).collect()
    }
}

/// Stem combinations and clashes, each table entry at most once, in table order.
pub fn stem_interactions(stems: &[Stem]) -> InteractionSet {
    let present: BTreeSet<Stem> = stems.iter().copied().collect();
    let has = |a: &Stem, b: &Stem| present.contains(a) && present.contains(b);
    InteractionSet {
        combinations: STEM_COMBINATIONS
            .iter()
            .filter(|(a, b, _)| has(a, b))
            .map(|&(a, b, element)| Combination::Stems {
                pair: [a, b],
                element,
            })
            .collect(),
        clashes: STEM_CLASHES
            .iter()
            .filter(|(a, b)| has(a, b))
            .map(|&(a, b)| Clash::Stems { pair: [a, b] })
            .collect(),
    }
}

/// Branch combinations, complete trines and clashes, each table entry at most once.
pub fn branch_interactions(branches: &[Branch]) -> InteractionSet {
    let present: BTreeSet<Branch> = branches.iter().copied().collect();
    let has = |a: &Branch, b: &Branch| present.contains(a) && present.contains(b);
    let pairs = BRANCH_COMBINATIONS
        .iter()
        .filter(|(a, b, _)| has(a, b))
        .map(|&(a, b, element)| Combination::Branches {
            pair: [a, b],
            element,
        });
    let trines = BRANCH_TRINES
        .iter()
        .filter(|(members, _)| members.iter().all(|m| present.contains(m)))
        .map(|&(members, element)| Combination::BranchTrine { members, element });
    InteractionSet {
        combinations: pairs.chain(trines).collect(),
        clashes: BRANCH_CLASHES
            .iter()
            .filter(|(a, b)| has(a, b))
            .map(|&(a, b)| Clash::Branches { pair: [a, b] })
            .collect(),
    }
}

/// All interactions among `stems` and among `branches` (stems listed first).
///
/// The result is independent of input order and of repeated tokens.
pub fn interactions(stems: &[Stem], branches: &[Branch]) -> InteractionSet {
    let mut set = stem_interactions(stems);
    let b = branch_interactions(branches);
    set.combinations.extend(b.combinations);
    set.clashes.extend(b.clashes);
    set
}
