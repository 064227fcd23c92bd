//! Exhaustiveness and property tests over every stem, branch and cycle position.

use saju_base::marker::{
    baekho_target, dohwa_target, gwimun_target, hongyeom_target, hwagae_target, wonjin_partner,
    yangin_target, yeokma_target,
};
use saju_base::pillar::{hour_stem, month_stem};
use saju_base::{
    ALL_BRANCHES, ALL_SLOTS, ALL_STEMS, Branch, Element, MajorFortune, PillarSlot, Polarity,
    StemBranch, TenGod, branch_ten_god, detect_markers, interactions, start_age_from_days, ten_god,
};
use saju_base::fortune::Direction;

#[test]
fn sixty_positions_are_distinct_and_periodic() {
    let all: Vec<StemBranch> = StemBranch::all().collect();
    assert_eq!(all.len(), 60);
    let unique: std::collections::BTreeSet<_> = all.iter().collect();
    assert_eq!(unique.len(), 60);
    for n in 0..60i64 {
        let base = StemBranch::from_cycle_index(n);
        for k in [-2i64, -1, 1, 2, 10] {
            assert_eq!(StemBranch::from_cycle_index(n + 60 * k), base, "n={n} k={k}");
        }
    }
}

#[test]
fn cross_product_pairs_only_matching_parity() {
    let mut valid = 0;
    for s in ALL_STEMS {
        for b in ALL_BRANCHES {
            match StemBranch::new(s, b) {
                Some(p) => {
                    valid += 1;
                    assert_eq!(StemBranch::from_cycle_index(p.cycle_index() as i64), p);
                    // day-pillar tables are total over real pillars
                    let _ = baekho_target(p);
                }
                None => assert_ne!(s.index() % 2, b.index() % 2),
            }
            // stem-vs-branch lookups are total over the full 10×12 grid
            let _ = branch_ten_god(s, b);
            let _ = month_stem(s, b);
            let _ = hour_stem(s, b);
        }
    }
    assert_eq!(valid, 60);
}

#[test]
fn element_and_polarity_lookups_total() {
    let stem_yang = ALL_STEMS.iter().filter(|s| s.polarity() == Polarity::Yang).count();
    let branch_yang = ALL_BRANCHES.iter().filter(|b| b.polarity() == Polarity::Yang).count();
    assert_eq!(stem_yang, 5);
    assert_eq!(branch_yang, 6);
    for e in [Element::Wood, Element::Fire, Element::Earth, Element::Metal, Element::Water] {
        assert_eq!(ALL_STEMS.iter().filter(|s| s.element() == e).count(), 2);
    }
}

#[test]
fn stem_tables_cover_every_day_stem() {
    for s in ALL_STEMS {
        let targets = [yangin_target(s), gwimun_target(s), hongyeom_target(s)];
        assert!(targets.iter().all(|t| ALL_BRANCHES.contains(t)));
        assert_eq!(ten_god(s, s), TenGod::Companion);
    }
}

#[test]
fn branch_tables_cover_every_anchor() {
    for b in ALL_BRANCHES {
        let d = dohwa_target(b);
        let y = yeokma_target(b);
        let h = hwagae_target(b);
        assert!(d != y && y != h && d != h, "{b}");
        assert_eq!(wonjin_partner(wonjin_partner(b)), b);
    }
}

#[test]
fn start_age_in_range_for_any_distance() {
    for days in -5..200 {
        let age = start_age_from_days(days);
        assert!((1..=10).contains(&age), "days={days} age={age}");
    }
}

#[test]
fn fortune_windows_contiguous_for_all_month_pillars() {
    for p in StemBranch::all() {
        for dir in [Direction::Forward, Direction::Backward] {
            for start in 1..=10 {
                let f = MajorFortune::from_start(p, dir, start);
                for w in f.cycles.windows(2) {
                    assert_eq!(w[0].end_age + 1, w[1].start_age);
                    assert_eq!(
                        w[1].pillar.cycle_index() as i64,
                        (w[0].pillar.cycle_index() as i64 + dir.sign()).rem_euclid(60)
                    );
                }
            }
        }
    }
}

#[test]
fn markers_independent_of_input_order() {
    let base = vec![
        (PillarSlot::Year, "庚午".parse::<StemBranch>().unwrap()),
        (PillarSlot::Month, "己卯".parse().unwrap()),
        (PillarSlot::Day, "甲戌".parse().unwrap()),
        (PillarSlot::Hour, "辛未".parse().unwrap()),
    ];
    let expected = detect_markers(&base);
    // every rotation and the reversal
    for r in 0..base.len() {
        let mut v = base.clone();
        v.rotate_left(r);
        assert_eq!(detect_markers(&v), expected);
        v.reverse();
        assert_eq!(detect_markers(&v), expected);
    }
    assert_eq!(ALL_SLOTS.len(), base.len());
}

#[test]
fn ja_and_chuk_only() {
    let set = interactions(&[], &[Branch::Ja, Branch::Chuk]);
    assert_eq!(set.combination_labels(), vec!["子丑합土"]);
    assert!(set.clashes.is_empty());
    assert_eq!(set.trines().count(), 0);
}
