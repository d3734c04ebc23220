//! Flattens a raw event choice (`{"r": [{"t", "v", "d"}, ...]}`) into an
//! [`EffectMap`].

use crate::model::{EffectMap, Stat};
use crate::skills::{SkillLookup, scalar_to_string};
use serde_json::Value;
use tracing::debug;

/// Effect code for a skill hint; its `d` field carries the skill id.
const SKILL_HINT_CODE: &str = "sk";

/// Sums every effect entry of `choice` into an effect map.
///
/// Entries with a missing or malformed value are skipped, as are unknown
/// codes. Skill hints are resolved through `skills` and kept in encounter
/// order, duplicates included.
pub fn extract_effects(choice: &Value, skills: &SkillLookup) -> EffectMap {
    let mut eff = EffectMap::default();

    let Some(entries) = choice.get("r").and_then(Value::as_array) else {
        return eff;
    };

    for entry in entries {
        let Some(value) = entry.get("v").and_then(parse_signed) else {
            continue;
        };
        let Some(code) = entry.get("t").and_then(Value::as_str) else {
            continue;
        };

        if code == SKILL_HINT_CODE {
            let skill_id = match entry.get("d") {
                None => String::new(),
                Some(Value::Null) => "None".to_string(),
                Some(d) => scalar_to_string(d).unwrap_or_else(|| d.to_string()),
            };
            eff.hints.push(skills.resolve(&skill_id));
        } else if let Some(stat) = Stat::from_code(code) {
            if !eff.add(stat, value) {
                debug!("skipping {code} entry {value}: sum overflows");
            }
        }
    }

    eff
}

/// Parses an effect value: an integer, or a string such as `"+10"` / `"-5"`.
pub fn parse_signed(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim_matches('+').trim().parse().ok(),
        _ => None,
    }
}
