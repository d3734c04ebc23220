//! Outcome scoring and default-preference selection.

use crate::model::{EffectMap, EventOptions, Stat};

pub const W_ENERGY: f64 = 100.0;
pub const W_STAT: f64 = 10.0;
pub const W_SKILL_PTS: f64 = 2.0;
pub const W_HINT: f64 = 1.0;
pub const W_BOND: f64 = 0.3;
pub const W_MOOD: f64 = 2.0;

/// Per-stat weights, each further scaled by [`W_STAT`].
pub const STAT_WEIGHTS: [(Stat, f64); 5] = [
    (Stat::Speed, 5.0),
    (Stat::Stamina, 4.0),
    (Stat::Power, 3.0),
    (Stat::Wit, 2.0),
    (Stat::Guts, 1.0),
];

/// Option picked when no option has any outcome.
pub const FALLBACK_PREFERENCE: u32 = 1;

/// Linear score of a single outcome.
pub fn score_outcome(eff: &EffectMap) -> f64 {
    let stats: f64 = STAT_WEIGHTS
        .iter()
        .map(|(stat, weight)| weight * eff.get(*stat) as f64)
        .sum();

    W_ENERGY * eff.energy as f64
        + W_STAT * stats
        + W_SKILL_PTS * eff.skill_pts as f64
        + W_HINT * eff.hints.len() as f64
        + W_BOND * eff.bond as f64
        + W_MOOD * eff.mood as f64
}

/// Worst-case score of an option, or `None` when it has no outcomes.
pub fn worst_case(outcomes: &[EffectMap]) -> Option<f64> {
    outcomes.iter().map(score_outcome).reduce(f64::min)
}

/// Picks the option whose worst outcome scores highest.
///
/// Ties go to the smaller option number. Options without outcomes are not
/// considered; if none remain the result is [`FALLBACK_PREFERENCE`], whether
/// or not that option exists.
pub fn choose_default_preference(options: &EventOptions) -> u32 {
    let mut best_key = FALLBACK_PREFERENCE;
    let mut best_score = f64::NEG_INFINITY;

    // Keys iterate in ascending order, so keeping the first of equal scores
    // gives ties to the smaller option number.
    for (&key, outcomes) in options {
        let Some(score) = worst_case(outcomes) else {
            continue;
        };
        if score > best_score {
            best_score = score;
            best_key = key;
        }
    }

    best_key
}
