//! Data model types shared by both scrapers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A skill as written by the skill scraper.
///
/// Only `id` and `name` are always present; the remaining fields are filled in
/// when enrichment is requested and omitted from the output otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub id: i64,
    /// English display name, stored under `name_en` so the skill lookup can read it back.
    #[serde(rename = "name_en", alias = "name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_symbol: Option<GradeSymbol>,
}

impl SkillRecord {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon_filename: None,
            icon_src: None,
            description: None,
            color_class: None,
            rarity: None,
            grade_symbol: None,
        }
    }
}

/// Grade suffix some skill names carry (e.g. "Right-Handed ◎").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeSymbol {
    #[serde(rename = "◎")]
    DoubleCircle,
    #[serde(rename = "○")]
    Circle,
    #[serde(rename = "×")]
    Cross,
}

impl GradeSymbol {
    /// Checked in this order, so "◎" wins over "○".
    pub const ALL: [GradeSymbol; 3] = [
        GradeSymbol::DoubleCircle,
        GradeSymbol::Circle,
        GradeSymbol::Cross,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GradeSymbol::DoubleCircle => "◎",
            GradeSymbol::Circle => "○",
            GradeSymbol::Cross => "×",
        }
    }

    /// Derives the grade from the end of a skill name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim_end();
        Self::ALL
            .into_iter()
            .find(|symbol| name.ends_with(symbol.as_str()))
    }
}

/// Numeric stats an event effect can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Energy,
    Speed,
    Stamina,
    Power,
    Guts,
    Wit,
    SkillPts,
    Bond,
}

impl Stat {
    /// Maps the site's two-letter effect code onto a stat. `sk` (skill hint)
    /// is not a stat and is handled by the effect extractor.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Stat::Energy),
            "sp" => Some(Stat::Speed),
            "st" => Some(Stat::Stamina),
            "po" => Some(Stat::Power),
            "gu" => Some(Stat::Guts),
            "in" => Some(Stat::Wit),
            "pt" => Some(Stat::SkillPts),
            "bo" => Some(Stat::Bond),
            _ => None,
        }
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Flattened outcome of picking one event option.
///
/// Zero stats and an empty hint list are left out when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectMap {
    #[serde(skip_serializing_if = "is_zero")]
    pub energy: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub speed: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub stamina: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub power: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub guts: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub wit: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub skill_pts: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub bond: i64,
    /// Skill names hinted by the outcome, in encounter order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
    /// Scored but never extracted from event data.
    #[serde(skip_serializing_if = "is_zero")]
    pub mood: i64,
}

impl EffectMap {
    pub fn get(&self, stat: Stat) -> i64 {
        match stat {
            Stat::Energy => self.energy,
            Stat::Speed => self.speed,
            Stat::Stamina => self.stamina,
            Stat::Power => self.power,
            Stat::Guts => self.guts,
            Stat::Wit => self.wit,
            Stat::SkillPts => self.skill_pts,
            Stat::Bond => self.bond,
        }
    }

    /// Adds `value` to `stat`. On overflow the stat is left unchanged and
    /// `false` is returned.
    pub fn add(&mut self, stat: Stat, value: i64) -> bool {
        let slot = match stat {
            Stat::Energy => &mut self.energy,
            Stat::Speed => &mut self.speed,
            Stat::Stamina => &mut self.stamina,
            Stat::Power => &mut self.power,
            Stat::Guts => &mut self.guts,
            Stat::Wit => &mut self.wit,
            Stat::SkillPts => &mut self.skill_pts,
            Stat::Bond => &mut self.bond,
        };
        match slot.checked_add(value) {
            Some(sum) => {
                *slot = sum;
                true
            }
            None => false,
        }
    }

    /// True when every stat is zero and no hints were collected.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Option number (1-based) to the possible outcomes of choosing it.
///
/// Keys serialize as JSON strings ("1", "2", ...) and iterate in numeric order.
pub type EventOptions = BTreeMap<u32, Vec<EffectMap>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Random,
    Chain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub chain_step: u32,
    pub name: String,
    pub options: EventOptions,
    pub default_preference: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Support,
}

/// One scraped support card with its normalized events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportCard {
    #[serde(rename = "type")]
    pub kind: CardKind,
    pub name: String,
    pub rarity: String,
    pub attribute: String,
    /// Composite `<name>_<attribute>_<rarity>` identifier, also the image file stem.
    pub id: String,
    pub choice_events: Vec<Event>,
}
